//! Cheapest-stations command implementation for the refuel CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use refuel_core::DEFAULT_CHEAPEST_LIMIT;
use refuel_planner::cheapest_on_route;
use serde::{Deserialize, Serialize};

use crate::inputs::{InputEnv, ParamOverrides, RequestSource};
use crate::{
    ARG_FUEL_TYPE, ARG_INCLUDE_RESTRICTED, ARG_LIMIT, ARG_ROUTE, ARG_SEARCH_RADIUS, ARG_STATIONS,
    CliError, ENV_CHEAPEST_ROUTE, ENV_CHEAPEST_STATIONS, write_json,
};

/// CLI arguments for the `cheapest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "cheapest",
    long_about = "List the cheapest stations within the search radius of a \
                 route, in route order, for choosing stops by hand.",
    about = "List the cheapest stations along a route"
)]
#[ortho_config(prefix = "REFUEL")]
pub(crate) struct CheapestArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Route file: an OSRM route response or a GeoJSON LineString.
    #[arg(long = ARG_ROUTE, value_name = "path")]
    #[serde(default)]
    pub(crate) route: Option<Utf8PathBuf>,
    /// Station file: a fuel price service export or a JSON station list.
    #[arg(long = ARG_STATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) stations: Option<Utf8PathBuf>,
    /// Fuel type key, for example `gasoleo_a`.
    #[arg(long = ARG_FUEL_TYPE, value_name = "key")]
    #[serde(default)]
    pub(crate) fuel_type: Option<String>,
    /// Maximum station distance from the route in kilometres.
    #[arg(long = ARG_SEARCH_RADIUS, value_name = "km")]
    #[serde(default)]
    pub(crate) search_radius: Option<f64>,
    /// Also consider stations with restricted sale.
    #[arg(
        long = ARG_INCLUDE_RESTRICTED,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) include_restricted: Option<bool>,
    /// Number of stations to list.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl CheapestArgs {
    pub(crate) fn into_config(self) -> Result<CheapestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CheapestConfig::try_from(merged)
    }
}

/// Resolved `cheapest` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheapestConfig {
    pub(crate) source: RequestSource,
    pub(crate) overrides: ParamOverrides,
    pub(crate) limit: usize,
}

impl TryFrom<CheapestArgs> for CheapestConfig {
    type Error = CliError;

    fn try_from(args: CheapestArgs) -> Result<Self, Self::Error> {
        let source = RequestSource::resolve(
            args.request_path,
            args.route,
            args.stations,
            InputEnv {
                route: ENV_CHEAPEST_ROUTE,
                stations: ENV_CHEAPEST_STATIONS,
            },
        )?;
        let overrides = ParamOverrides {
            fuel_type: args.fuel_type,
            search_radius_km: args.search_radius,
            include_restricted: args.include_restricted,
            ..ParamOverrides::default()
        };
        Ok(Self {
            source,
            overrides,
            limit: args.limit.unwrap_or(DEFAULT_CHEAPEST_LIMIT),
        })
    }
}

/// Run `cheapest` and write the station list JSON to `writer`.
pub(crate) fn run_cheapest_with(
    args: CheapestArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_cheapest(config, writer)
}

pub(crate) fn execute_cheapest(
    config: CheapestConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.source.validate_sources()?;
    let request = config.source.load(config.overrides)?;
    let stations = cheapest_on_route(&request, config.limit)
        .map_err(|source| CliError::Plan { source })?;
    write_json(writer, &stations)
}
