//! Plan command implementation for the refuel CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use refuel_core::{PlanOutcome, Strategy, TieBreak};
use refuel_planner::plan_route;
use serde::{Deserialize, Serialize};

use crate::inputs::{InputEnv, ParamOverrides, RequestSource};
use crate::{
    ARG_CONSUMPTION, ARG_CURRENT_FUEL, ARG_DESIRED_FUEL, ARG_FUEL_TYPE, ARG_INCLUDE_RESTRICTED,
    ARG_ROUTE, ARG_SEARCH_RADIUS, ARG_STATIONS, ARG_STRATEGY, ARG_TANK_CAPACITY, ARG_TIE_BREAK,
    CliError, ENV_PLAN_ROUTE, ENV_PLAN_STATIONS, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan refuelling stops along a route. Inputs come from a \
                 JSON-encoded PlanRequest, from separate route and station \
                 files, or from a request whose route or stations are \
                 replaced by those files. Vehicle parameters can be set by \
                 flags, configuration files or environment variables.",
    about = "Plan refuelling stops along a route"
)]
#[ortho_config(prefix = "REFUEL")]
pub(crate) struct PlanArgs {
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
    /// Tank capacity in litres.
    #[arg(long = ARG_TANK_CAPACITY, value_name = "litres")]
    #[serde(default)]
    pub(crate) tank_capacity: Option<f64>,
    /// Consumption in litres per 100 km.
    #[arg(long = ARG_CONSUMPTION, value_name = "l/100km")]
    #[serde(default)]
    pub(crate) consumption: Option<f64>,
    /// Fuel at departure as a percentage of the tank.
    #[arg(long = ARG_CURRENT_FUEL, value_name = "percent")]
    #[serde(default)]
    pub(crate) current_fuel: Option<f64>,
    /// Fuel required on arrival as a percentage of the tank.
    #[arg(long = ARG_DESIRED_FUEL, value_name = "percent")]
    #[serde(default)]
    pub(crate) desired_fuel: Option<f64>,
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
    /// Planner to run: `optimal` or `greedy`.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Greedy tie-break between equal prices: `farthest` or `nearest`.
    #[arg(long = ARG_TIE_BREAK, value_name = "policy")]
    #[serde(default)]
    pub(crate) tie_break: Option<TieBreak>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Where the request comes from.
    pub(crate) source: RequestSource,
    /// Parameter values applied over the request's.
    pub(crate) overrides: ParamOverrides,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let source = RequestSource::resolve(
            args.request_path,
            args.route,
            args.stations,
            InputEnv {
                route: ENV_PLAN_ROUTE,
                stations: ENV_PLAN_STATIONS,
            },
        )?;
        let overrides = ParamOverrides {
            fuel_type: args.fuel_type,
            tank_capacity_l: args.tank_capacity,
            consumption_l_per_100km: args.consumption,
            current_fuel_percent: args.current_fuel,
            desired_fuel_percent: args.desired_fuel,
            search_radius_km: args.search_radius,
            include_restricted: args.include_restricted,
            strategy: args.strategy,
            tie_break: args.tie_break,
        };
        Ok(Self { source, overrides })
    }
}

/// Run `plan` and write the outcome JSON to `writer`.
///
/// The outcome is written for failed plans too; the planning error is then
/// returned so the process exits non-zero.
pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_plan(config, writer)
}

pub(crate) fn execute_plan(config: PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    config.source.validate_sources()?;
    let request = config.source.load(config.overrides)?;
    info!(
        "planning over {:.1} km with {} stations",
        request.route.length_km,
        request.stations.len()
    );
    let result = plan_route(&request);
    write_json(writer, &PlanOutcome::from(result.clone()))?;
    result
        .map(|_| ())
        .map_err(|source| CliError::Plan { source })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
