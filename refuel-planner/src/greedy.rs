//! Greedy planner: cheapest reachable station at every step.
//!
//! The planner walks the route keeping a [`VehicleState`]. While the
//! destination is out of range it drives to the cheapest station it can reach
//! and fills the tank. Once the destination is in range it checks the arrival
//! requirement and, when the fuel left would fall short, adds a final top-up
//! at a station close enough to the destination.
#![expect(
    clippy::float_arithmetic,
    reason = "fuel bookkeeping is floating-point arithmetic"
)]

use std::cmp::Ordering;

use log::debug;
use refuel_core::{
    CandidateStation, EPSILON, FuelModel, PlanError, PlannedStop, Planner, RefuelProblem,
    Strategy, TieBreak,
};

/// Position and fuel of the vehicle during one greedy run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VehicleState {
    distance_km: f64,
    fuel_l: f64,
}

/// Fast heuristic planner.
///
/// May pay more than [`OptimalPlanner`](crate::OptimalPlanner): it fills the
/// tank at every intermediate stop regardless of what lies ahead, and only
/// looks one leg ahead when choosing where to stop.
///
/// # Examples
/// ```
/// use refuel_core::test_support::{candidates, vehicle};
/// use refuel_core::{Planner, RefuelProblem, Strategy, TieBreak};
/// use refuel_planner::GreedyPlanner;
///
/// let params = vehicle(30.0, 10.0, 40.0, 0.0, Strategy::Greedy);
/// let stations = candidates(400.0, &[("a", 100.0, 1.4), ("b", 250.0, 1.3)]);
/// let problem = RefuelProblem::new(&stations, 400.0, params.fuel_model()).expect("valid");
///
/// let stops = GreedyPlanner.plan_stops(&problem, TieBreak::Farthest).expect("plan");
/// assert_eq!(stops.len(), 1);
/// assert_eq!(stops[0].candidate.station.id, "a");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPlanner;

impl Planner for GreedyPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn plan_stops(
        &self,
        problem: &RefuelProblem<'_>,
        tie_break: TieBreak,
    ) -> Result<Vec<PlannedStop>, PlanError> {
        let fuel = problem.fuel();
        let route_km = problem.route_length_km();
        let tank_l = fuel.tank_capacity_l();
        let candidates = problem.candidates();

        let mut state = VehicleState {
            distance_km: 0.0,
            fuel_l: fuel.initial_fuel_l(),
        };
        let mut stops = Vec::new();

        loop {
            let range_km = fuel.range_km(state.fuel_l);
            if state.distance_km + range_km >= route_km - EPSILON {
                break;
            }
            let horizon_km = state.distance_km + range_km + EPSILON;
            let next = cheapest(
                ahead_of(candidates, state.distance_km)
                    .filter(|c| c.distance_from_start_km <= horizon_km),
                tie_break,
            )
            .ok_or(PlanError::NoReachableStation {
                at_km: state.distance_km,
                range_km,
            })?;

            let arrival_l = arrival_fuel(&state, next, fuel);
            let amount_l = (tank_l - arrival_l).max(0.0);
            debug!(
                "greedy stop at {} (km {:.1}): {:.2} L at {:.3}",
                next.station.id, next.distance_from_start_km, amount_l, next.price
            );
            stops.push(PlannedStop::new(next.clone(), amount_l));
            state = VehicleState {
                distance_km: next.distance_from_start_km,
                fuel_l: tank_l,
            };
        }

        let desired_l = fuel.desired_fuel_l();
        let projected_l = state.fuel_l - fuel.fuel_for_km(route_km - state.distance_km);
        if projected_l >= desired_l - EPSILON {
            return Ok(stops);
        }

        // The loop only exits once the destination is in range, so every
        // station ahead is reachable and only the last-leg limit can fail.
        let max_last_leg_km = fuel.range_km(tank_l - desired_l);
        let last = cheapest(
            ahead_of(candidates, state.distance_km)
                .filter(|c| c.distance_from_end_km <= max_last_leg_km + EPSILON),
            tie_break,
        )
        .ok_or(PlanError::NoFinalStop {
            at_km: state.distance_km,
            max_last_leg_km,
        })?;

        let arrival_l = arrival_fuel(&state, last, fuel);
        let needed_l = fuel.fuel_for_km(last.distance_from_end_km) + desired_l - arrival_l;
        let amount_l = needed_l.min(tank_l - arrival_l).max(0.0);
        debug!(
            "greedy final top-up at {} (km {:.1}): {:.2} L",
            last.station.id, last.distance_from_start_km, amount_l
        );
        stops.push(PlannedStop::new(last.clone(), amount_l));
        Ok(stops)
    }
}

/// Candidates strictly ahead of `distance_km`.
fn ahead_of(
    candidates: &[CandidateStation],
    distance_km: f64,
) -> impl Iterator<Item = &CandidateStation> {
    candidates
        .iter()
        .filter(move |c| c.distance_from_start_km > distance_km + EPSILON)
}

/// Fuel left on reaching `station` from the current position.
fn arrival_fuel(state: &VehicleState, station: &CandidateStation, fuel: &FuelModel) -> f64 {
    let leg_l = fuel.fuel_for_km(station.distance_from_start_km - state.distance_km);
    (state.fuel_l - leg_l).max(0.0)
}

/// Lowest-priced candidate; ties resolved by `tie_break`.
///
/// Candidates arrive in route order, so on an exact price tie the later item
/// is the farther one.
fn cheapest<'a>(
    candidates: impl Iterator<Item = &'a CandidateStation>,
    tie_break: TieBreak,
) -> Option<&'a CandidateStation> {
    candidates.reduce(|best, candidate| match candidate.price.total_cmp(&best.price) {
        Ordering::Less => candidate,
        Ordering::Greater => best,
        Ordering::Equal => match tie_break {
            TieBreak::Farthest => candidate,
            TieBreak::Nearest => best,
        },
    })
}
