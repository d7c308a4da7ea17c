//! Vehicle and search parameters for a planning request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which planner turns candidates into stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Cheapest reachable station at every step.
    Greedy,
    /// Exact minimum-cost plan.
    #[default]
    Optimal,
}

/// How the greedy planner breaks price ties inside one reachable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Prefer the station furthest along the route, which tends to save a
    /// stop when cheap stations cluster.
    #[default]
    Farthest,
    /// Prefer the first station reached.
    Nearest,
}

/// Error returned when parsing a [`Strategy`] or [`TieBreak`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}; expected one of {expected}")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for Strategy {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "optimal" => Ok(Self::Optimal),
            _ => Err(ParseChoiceError {
                kind: "strategy",
                value: s.to_owned(),
                expected: "greedy, optimal",
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::Optimal => f.write_str("optimal"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farthest" => Ok(Self::Farthest),
            "nearest" => Ok(Self::Nearest),
            _ => Err(ParseChoiceError {
                kind: "tie-break policy",
                value: s.to_owned(),
                expected: "farthest, nearest",
            }),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Farthest => f.write_str("farthest"),
            Self::Nearest => f.write_str("nearest"),
        }
    }
}

/// Parameters describing the vehicle and the station search.
///
/// # Examples
/// ```
/// use refuel_core::{PlanParameters, Strategy};
///
/// let params = PlanParameters {
///     tank_capacity_l: 60.0,
///     current_fuel_percent: 25.0,
///     strategy: Strategy::Greedy,
///     ..PlanParameters::default()
/// };
/// assert!(params.validate().is_ok());
/// assert!((params.fuel_model().initial_fuel_l() - 15.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParameters {
    /// Fuel type key looked up in each station's price map.
    pub fuel_type: String,
    /// Usable tank volume in litres.
    pub tank_capacity_l: f64,
    /// Consumption in litres per 100 km.
    pub consumption_l_per_100km: f64,
    /// Fuel in the tank at departure, as a percentage of capacity.
    pub current_fuel_percent: f64,
    /// Minimum fuel on arrival, as a percentage of capacity.
    #[serde(default)]
    pub desired_fuel_percent: f64,
    /// Maximum detour distance from the route, in kilometres.
    pub search_radius_km: f64,
    /// Also consider stations with restricted sale.
    #[serde(default)]
    pub include_restricted: bool,
    /// Planner to run.
    #[serde(default)]
    pub strategy: Strategy,
    /// Greedy tie-break policy.
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for PlanParameters {
    fn default() -> Self {
        Self {
            fuel_type: DEFAULT_FUEL_TYPE.to_owned(),
            tank_capacity_l: 50.0,
            consumption_l_per_100km: 6.5,
            current_fuel_percent: 50.0,
            desired_fuel_percent: 0.0,
            search_radius_km: 5.0,
            include_restricted: false,
            strategy: Strategy::default(),
            tie_break: TieBreak::default(),
        }
    }
}

/// Fuel type used when none is configured.
pub const DEFAULT_FUEL_TYPE: &str = "gasoleo_a";

/// Errors returned by [`PlanParameters::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// No fuel type was named.
    #[error("fuel type must not be empty")]
    EmptyFuelType,
    /// A quantity that must be strictly positive was not.
    #[error("{field} must be a positive number, found {value}")]
    NonPositive {
        /// Offending parameter.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// A percentage fell outside `[0, 100]`.
    #[error("{field} must be between 0 and 100, found {value}")]
    PercentOutOfRange {
        /// Offending parameter.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
}

impl PlanParameters {
    /// Check every field is within its domain.
    ///
    /// # Errors
    /// Returns the first [`ParamsError`] encountered.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.fuel_type.trim().is_empty() {
            return Err(ParamsError::EmptyFuelType);
        }
        require_positive("tank_capacity_l", self.tank_capacity_l)?;
        require_positive("consumption_l_per_100km", self.consumption_l_per_100km)?;
        require_positive("search_radius_km", self.search_radius_km)?;
        require_percent("current_fuel_percent", self.current_fuel_percent)?;
        require_percent("desired_fuel_percent", self.desired_fuel_percent)?;
        Ok(())
    }

    /// Fuel arithmetic derived from these parameters.
    #[must_use]
    pub const fn fuel_model(&self) -> FuelModel {
        FuelModel {
            tank_capacity_l: self.tank_capacity_l,
            consumption_l_per_100km: self.consumption_l_per_100km,
            current_fuel_percent: self.current_fuel_percent,
            desired_fuel_percent: self.desired_fuel_percent,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NonPositive { field, value })
    }
}

fn require_percent(field: &'static str, value: f64) -> Result<(), ParamsError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::PercentOutOfRange { field, value })
    }
}

/// Conversions between litres and kilometres of range for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelModel {
    tank_capacity_l: f64,
    consumption_l_per_100km: f64,
    current_fuel_percent: f64,
    desired_fuel_percent: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "fuel and range conversions are linear floating-point formulas"
)]
impl FuelModel {
    /// Tank volume in litres.
    #[must_use]
    pub const fn tank_capacity_l(&self) -> f64 {
        self.tank_capacity_l
    }

    /// Litres burnt per 100 km.
    #[must_use]
    pub const fn consumption_l_per_100km(&self) -> f64 {
        self.consumption_l_per_100km
    }

    /// Litres in the tank at departure.
    #[must_use]
    pub fn initial_fuel_l(&self) -> f64 {
        self.tank_capacity_l * self.current_fuel_percent / 100.0
    }

    /// Litres required on arrival.
    #[must_use]
    pub fn desired_fuel_l(&self) -> f64 {
        self.tank_capacity_l * self.desired_fuel_percent / 100.0
    }

    /// Kilometres drivable on `fuel_l` litres.
    #[must_use]
    pub fn range_km(&self, fuel_l: f64) -> f64 {
        fuel_l / self.consumption_l_per_100km * 100.0
    }

    /// Litres needed to drive `distance_km`.
    #[must_use]
    pub fn fuel_for_km(&self, distance_km: f64) -> f64 {
        distance_km / 100.0 * self.consumption_l_per_100km
    }

    /// Range of a full tank.
    #[must_use]
    pub fn max_range_km(&self) -> f64 {
        self.range_km(self.tank_capacity_l)
    }

    /// Range available at departure.
    #[must_use]
    pub fn initial_range_km(&self) -> f64 {
        self.range_km(self.initial_fuel_l())
    }

    /// Range that must remain on arrival.
    #[must_use]
    pub fn desired_range_km(&self) -> f64 {
        self.range_km(self.desired_fuel_l())
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point values"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(PlanParameters::default().validate().is_ok());
    }

    #[rstest]
    #[case::tank(PlanParameters { tank_capacity_l: 0.0, ..PlanParameters::default() }, "tank_capacity_l")]
    #[case::consumption(PlanParameters { consumption_l_per_100km: -1.0, ..PlanParameters::default() }, "consumption_l_per_100km")]
    #[case::radius(PlanParameters { search_radius_km: 0.0, ..PlanParameters::default() }, "search_radius_km")]
    fn non_positive_quantities_are_rejected(
        #[case] params: PlanParameters,
        #[case] expected: &'static str,
    ) {
        match params.validate() {
            Err(ParamsError::NonPositive { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected NonPositive, found {other:?}"),
        }
    }

    #[rstest]
    #[case(-0.1)]
    #[case(100.1)]
    #[case(f64::NAN)]
    fn percentages_must_lie_in_range(#[case] value: f64) {
        let params = PlanParameters {
            desired_fuel_percent: value,
            ..PlanParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::PercentOutOfRange { field: "desired_fuel_percent", .. })
        ));
    }

    #[rstest]
    fn blank_fuel_type_is_rejected() {
        let params = PlanParameters {
            fuel_type: "  ".into(),
            ..PlanParameters::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::EmptyFuelType));
    }

    #[rstest]
    fn fuel_model_converts_between_litres_and_range() {
        let params = PlanParameters {
            tank_capacity_l: 30.0,
            consumption_l_per_100km: 10.0,
            current_fuel_percent: 40.0,
            desired_fuel_percent: 10.0,
            ..PlanParameters::default()
        };
        let model = params.fuel_model();
        assert!((model.max_range_km() - 300.0).abs() < 1e-9);
        assert!((model.initial_range_km() - 120.0).abs() < 1e-9);
        assert!((model.desired_range_km() - 30.0).abs() < 1e-9);
        assert!((model.fuel_for_km(50.0) - 5.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("greedy", Strategy::Greedy)]
    #[case(" Optimal ", Strategy::Optimal)]
    fn strategy_parses_case_insensitively(#[case] text: &str, #[case] expected: Strategy) {
        assert_eq!(text.parse::<Strategy>(), Ok(expected));
    }

    #[rstest]
    fn unknown_tie_break_lists_choices() {
        let err = "random".parse::<TieBreak>().expect_err("unknown policy");
        assert!(err.to_string().contains("farthest, nearest"));
    }

    #[rstest]
    fn parameters_deserialise_with_defaults() {
        let json = r#"{
            "fuel_type": "gasolina_95_e5",
            "tank_capacity_l": 45.0,
            "consumption_l_per_100km": 5.8,
            "current_fuel_percent": 30.0,
            "search_radius_km": 3.0
        }"#;
        let params: PlanParameters = serde_json::from_str(json).expect("deserialise");
        assert_eq!(params.strategy, Strategy::Optimal);
        assert_eq!(params.tie_break, TieBreak::Farthest);
        assert!(!params.include_restricted);
    }
}
