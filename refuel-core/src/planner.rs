use crate::candidate::is_route_ordered;
use crate::{CandidateStation, FuelModel, PlanError, PlannedStop, RouteError, Strategy, TieBreak};

/// Everything a planner needs to choose stops on one route.
///
/// Construct with [`RefuelProblem::new`], which checks the candidate order
/// the planners rely on.
///
/// # Examples
/// ```rust
/// use refuel_core::{PlanParameters, RefuelProblem};
///
/// let params = PlanParameters::default();
/// let problem = RefuelProblem::new(&[], 120.0, params.fuel_model()).expect("valid problem");
/// assert!(problem.candidates().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RefuelProblem<'a> {
    candidates: &'a [CandidateStation],
    route_length_km: f64,
    fuel: FuelModel,
}

impl<'a> RefuelProblem<'a> {
    /// Bundle candidates sorted by distance from the start with the route
    /// length and vehicle model.
    ///
    /// # Errors
    /// Returns [`PlanError::UnsortedCandidates`] when the candidates are out
    /// of route order and [`PlanError::InvalidRoute`] for a non-positive
    /// route length.
    pub fn new(
        candidates: &'a [CandidateStation],
        route_length_km: f64,
        fuel: FuelModel,
    ) -> Result<Self, PlanError> {
        if !(route_length_km.is_finite() && route_length_km > 0.0) {
            return Err(RouteError::NonPositiveLength {
                length_km: route_length_km,
            }
            .into());
        }
        if !is_route_ordered(candidates) {
            return Err(PlanError::UnsortedCandidates);
        }
        Ok(Self {
            candidates,
            route_length_km,
            fuel,
        })
    }

    /// Candidate stations in route order.
    #[must_use]
    pub const fn candidates(&self) -> &'a [CandidateStation] {
        self.candidates
    }

    /// Route length in kilometres.
    #[must_use]
    pub const fn route_length_km(&self) -> f64 {
        self.route_length_km
    }

    /// Vehicle fuel model.
    #[must_use]
    pub const fn fuel(&self) -> &FuelModel {
        &self.fuel
    }
}

/// Choose refuelling stops for a [`RefuelProblem`].
///
/// Implementations return stops in route order, or a [`PlanError`] whose
/// [`kind`](PlanError::kind) is `RouteUnreachable` when no valid plan exists.
/// They must not panic on valid problems.
/// Planners must be `Send + Sync` so a single instance can serve concurrent
/// requests.
pub trait Planner: Send + Sync {
    /// Strategy this planner implements.
    fn strategy(&self) -> Strategy;

    /// Plan the stops for `problem`.
    ///
    /// `tie_break` only affects planners that choose between equally priced
    /// stations.
    fn plan_stops(
        &self,
        problem: &RefuelProblem<'_>,
        tie_break: TieBreak,
    ) -> Result<Vec<PlannedStop>, PlanError>;
}
