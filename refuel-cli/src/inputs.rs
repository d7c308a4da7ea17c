//! Input resolution shared by the `plan` and `cheapest` commands.
//!
//! A command reads either a JSON `PlanRequest` file, separate route and
//! station files, or a request file whose route or stations are replaced by
//! the separate files. Parameter flags are applied last.

use camino::{Utf8Path, Utf8PathBuf};
use refuel_core::{PlanParameters, PlanRequest, Strategy, TieBreak};
use refuel_data::{DataError, file_is_file, load_route, load_stations, read_json};

use crate::{ARG_REQUEST, ARG_ROUTE, ARG_STATIONS, CliError};

/// Environment variables that can supply a command's input files.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InputEnv {
    pub(crate) route: &'static str,
    pub(crate) stations: &'static str,
}

/// Where a command's planning request comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestSource {
    /// A request file, optionally with its route or stations replaced.
    Request {
        path: Utf8PathBuf,
        route: Option<Utf8PathBuf>,
        stations: Option<Utf8PathBuf>,
    },
    /// Separate route and station files with default parameters.
    Parts {
        route: Utf8PathBuf,
        stations: Utf8PathBuf,
    },
}

impl RequestSource {
    /// Combine the merged path options into a source.
    pub(crate) fn resolve(
        request: Option<Utf8PathBuf>,
        route: Option<Utf8PathBuf>,
        stations: Option<Utf8PathBuf>,
        env: InputEnv,
    ) -> Result<Self, CliError> {
        if let Some(path) = request {
            return Ok(Self::Request {
                path,
                route,
                stations,
            });
        }
        let route_path = route.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: env.route,
        })?;
        let stations_path = stations.ok_or(CliError::MissingArgument {
            field: ARG_STATIONS,
            env: env.stations,
        })?;
        Ok(Self::Parts {
            route: route_path,
            stations: stations_path,
        })
    }

    fn paths(&self) -> Vec<(&'static str, &Utf8Path)> {
        match self {
            Self::Request {
                path,
                route,
                stations,
            } => {
                let mut paths = vec![(ARG_REQUEST, path.as_path())];
                paths.extend(route.as_deref().map(|file| (ARG_ROUTE, file)));
                paths.extend(stations.as_deref().map(|file| (ARG_STATIONS, file)));
                paths
            }
            Self::Parts { route, stations } => {
                vec![(ARG_ROUTE, route.as_path()), (ARG_STATIONS, stations.as_path())]
            }
        }
    }

    /// Check every referenced path is an existing file.
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        self.paths()
            .into_iter()
            .try_for_each(|(field, path)| require_existing(path, field))
    }

    /// Load the request and apply `overrides` to its parameters.
    pub(crate) fn load(&self, overrides: ParamOverrides) -> Result<PlanRequest, CliError> {
        let mut request = match self {
            Self::Request {
                path,
                route,
                stations,
            } => {
                let mut loaded: PlanRequest =
                    load_input(ARG_REQUEST, path, |file| read_json(file, "plan request"))?;
                if let Some(file) = route {
                    loaded.route = load_input(ARG_ROUTE, file, load_route)?;
                }
                if let Some(file) = stations {
                    loaded.stations = load_input(ARG_STATIONS, file, load_stations)?;
                }
                loaded
            }
            Self::Parts { route, stations } => PlanRequest::new(
                load_input(ARG_ROUTE, route, load_route)?,
                load_input(ARG_STATIONS, stations, load_stations)?,
                PlanParameters::default(),
            ),
        };
        overrides.apply(&mut request.params);
        Ok(request)
    }
}

fn load_input<T>(
    field: &'static str,
    path: &Utf8Path,
    load: impl FnOnce(&Utf8Path) -> Result<T, DataError>,
) -> Result<T, CliError> {
    load(path).map_err(|source| CliError::LoadInput {
        field,
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parameter values given through flags, config files or the environment.
///
/// Unset values leave the request's parameters untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParamOverrides {
    pub(crate) fuel_type: Option<String>,
    pub(crate) tank_capacity_l: Option<f64>,
    pub(crate) consumption_l_per_100km: Option<f64>,
    pub(crate) current_fuel_percent: Option<f64>,
    pub(crate) desired_fuel_percent: Option<f64>,
    pub(crate) search_radius_km: Option<f64>,
    pub(crate) include_restricted: Option<bool>,
    pub(crate) strategy: Option<Strategy>,
    pub(crate) tie_break: Option<TieBreak>,
}

impl ParamOverrides {
    /// Write every set value into `params`.
    pub(crate) fn apply(self, params: &mut PlanParameters) {
        if let Some(fuel_type) = self.fuel_type {
            params.fuel_type = fuel_type;
        }
        if let Some(tank) = self.tank_capacity_l {
            params.tank_capacity_l = tank;
        }
        if let Some(consumption) = self.consumption_l_per_100km {
            params.consumption_l_per_100km = consumption;
        }
        if let Some(current) = self.current_fuel_percent {
            params.current_fuel_percent = current;
        }
        if let Some(desired) = self.desired_fuel_percent {
            params.desired_fuel_percent = desired;
        }
        if let Some(radius) = self.search_radius_km {
            params.search_radius_km = radius;
        }
        if let Some(include) = self.include_restricted {
            params.include_restricted = include;
        }
        if let Some(strategy) = self.strategy {
            params.strategy = strategy;
        }
        if let Some(tie_break) = self.tie_break {
            params.tie_break = tie_break;
        }
    }
}
