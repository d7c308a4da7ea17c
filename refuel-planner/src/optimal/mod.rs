//! Exact minimum-cost planner.
//!
//! Works in kilometres of range rather than litres. A state is a station and
//! the range left on arriving there. The arrival ranges a station can ever
//! see form a small finite set: empty, what is left after driving straight
//! from the origin, and what is left after filling up at any earlier station
//! within a tank's reach. States are solved backwards from the last station,
//! so every option out of a state refers to states that are already solved.
//!
//! From a state at station `i` the options are:
//!
//! - finish: drive to the destination, buying whatever the last leg plus the
//!   arrival reserve needs;
//! - go to a later station `v` no more expensive than `i`: buy only what is
//!   needed to reach it;
//! - go to a later, dearer station `v`: fill up before leaving.
#![expect(
    clippy::float_arithmetic,
    reason = "range and cost recurrences are floating-point"
)]

mod table;

use log::{debug, warn};
use refuel_core::{
    CandidateStation, EPSILON, PlanError, PlannedStop, Planner, RefuelProblem, Strategy, TieBreak,
};

use table::{Decision, Hop, StateTable};

/// Cost difference below which two options count as equally cheap.
const COST_TOLERANCE: f64 = 1e-9;

/// Exact planner.
///
/// The default strategy. With `n` candidates and at most `w` of them inside
/// one tank's range, a station holds `O(w)` arrival states and each state
/// weighs `O(w)` onward options, so solving takes `O(n·w²)` time. That is
/// linear in `n` for a fixed station density and only reaches `O(n³)` when a
/// single tank covers every candidate.
///
/// # Examples
/// ```
/// use refuel_core::test_support::{candidates, vehicle};
/// use refuel_core::{Planner, RefuelProblem, Strategy, TieBreak};
/// use refuel_planner::OptimalPlanner;
///
/// // 300 km tank, 120 km in it, 400 km to go.
/// let params = vehicle(30.0, 10.0, 40.0, 0.0, Strategy::Optimal);
/// let stations = candidates(400.0, &[("a", 100.0, 1.4), ("b", 250.0, 1.3)]);
/// let problem = RefuelProblem::new(&stations, 400.0, params.fuel_model()).expect("valid");
///
/// let stops = OptimalPlanner.plan_stops(&problem, TieBreak::default()).expect("plan");
/// let ids: Vec<&str> = stops.iter().map(|s| s.candidate.station.id.as_str()).collect();
/// // Buy only enough at `a` to reach the cheaper `b`, then finish from `b`.
/// assert_eq!(ids, ["a", "b"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimalPlanner;

/// Route and vehicle figures in kilometres of range.
#[derive(Debug, Clone, Copy)]
struct RangeModel {
    route_km: f64,
    tank_km: f64,
    initial_km: f64,
    desired_km: f64,
}

impl RangeModel {
    fn from_problem(problem: &RefuelProblem<'_>) -> Self {
        let fuel = problem.fuel();
        Self {
            route_km: problem.route_length_km(),
            tank_km: fuel.max_range_km(),
            initial_km: fuel.initial_range_km(),
            desired_km: fuel.desired_range_km(),
        }
    }
}

impl Planner for OptimalPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Optimal
    }

    fn plan_stops(
        &self,
        problem: &RefuelProblem<'_>,
        _tie_break: TieBreak,
    ) -> Result<Vec<PlannedStop>, PlanError> {
        let model = RangeModel::from_problem(problem);
        if model.initial_km >= model.route_km + model.desired_km - EPSILON {
            return Ok(Vec::new());
        }

        let candidates = problem.candidates();
        let mut tables = arrival_tables(candidates, &model);
        solve_backwards(candidates, &mut tables, &model, problem);
        debug!(
            "optimal planner solved {} states over {} stations",
            tables.iter().map(StateTable::len).sum::<usize>(),
            candidates.len()
        );

        let unreachable = PlanError::NoFeasibleChain {
            route_km: model.route_km,
            initial_range_km: model.initial_km,
            candidates: candidates.len(),
        };
        let first_hop =
            departure(candidates, &tables, &model).ok_or_else(|| unreachable.clone())?;
        reconstruct(problem, &tables, first_hop).ok_or(unreachable)
    }
}

/// Every arrival range each station can be reached with.
fn arrival_tables(candidates: &[CandidateStation], model: &RangeModel) -> Vec<StateTable> {
    candidates
        .iter()
        .enumerate()
        .map(|(v, station)| {
            let position = station.distance_from_start_km;
            let from_origin = model.initial_km - position;
            let after_fill_ups = candidates
                .iter()
                .take(v)
                .map(|earlier| position - earlier.distance_from_start_km)
                .filter(|leg| *leg <= model.tank_km + EPSILON)
                .map(|leg| (model.tank_km - leg).max(0.0));
            let origin = (from_origin >= -EPSILON).then_some(from_origin.max(0.0));
            StateTable::from_ranges(std::iter::once(0.0).chain(origin).chain(after_fill_ups))
        })
        .collect()
}

/// Fill in the cost and decision of every state, last station first.
fn solve_backwards(
    candidates: &[CandidateStation],
    tables: &mut [StateTable],
    model: &RangeModel,
    problem: &RefuelProblem<'_>,
) {
    for index in (0..tables.len()).rev() {
        let (head, later) = tables.split_at_mut(index + 1);
        let (Some(current), Some(station)) = (head.last_mut(), candidates.get(index)) else {
            continue;
        };
        let ahead = candidates.get(index + 1..).unwrap_or_default();
        for entry in current.entries_mut() {
            if let Some((cost, decision)) =
                best_option(index, station, entry.range_km, ahead, later, model, problem)
            {
                entry.cost = cost;
                entry.decision = Some(decision);
            }
        }
    }
}

/// Cheapest feasible option from station `index` arriving with `range_km`.
fn best_option(
    index: usize,
    station: &CandidateStation,
    range_km: f64,
    ahead: &[CandidateStation],
    later: &[StateTable],
    model: &RangeModel,
    problem: &RefuelProblem<'_>,
) -> Option<(f64, Decision)> {
    let fuel = problem.fuel();
    let cost_of = |km: f64| station.price * fuel.fuel_for_km(km);
    let mut best: Option<(f64, Decision)> = None;
    let mut consider = |cost: f64, decision: Decision| {
        if best.is_none_or(|(best_cost, _)| cost < best_cost - COST_TOLERANCE) {
            best = Some((cost, decision));
        }
    };

    let finish_km = model.route_km - station.distance_from_start_km + model.desired_km;
    if finish_km <= model.tank_km + EPSILON {
        let purchase_km = (finish_km - range_km).max(0.0);
        consider(
            cost_of(purchase_km),
            Decision {
                purchase_km,
                hop: Hop::End,
            },
        );
    }

    for (offset, (next, next_table)) in ahead.iter().zip(later).enumerate() {
        let leg_km = next.distance_from_start_km - station.distance_from_start_km;
        if leg_km > model.tank_km + EPSILON {
            break;
        }
        let (purchase_km, arrival_km) = if next.price <= station.price {
            ((leg_km - range_km).max(0.0), (range_km - leg_km).max(0.0))
        } else {
            ((model.tank_km - range_km).max(0.0), (model.tank_km - leg_km).max(0.0))
        };
        let Some(target) = next_table.lookup(arrival_km) else {
            warn!(
                "no state for {arrival_km:.6} km of range at {}; skipping the option",
                next.station.id
            );
            continue;
        };
        if !target.cost.is_finite() {
            continue;
        }
        consider(
            cost_of(purchase_km) + target.cost,
            Decision {
                purchase_km,
                hop: Hop::Station {
                    index: index + 1 + offset,
                    key: target.key,
                },
            },
        );
    }
    best
}

/// Cheapest first stop reachable on the fuel in the tank at departure.
fn departure(
    candidates: &[CandidateStation],
    tables: &[StateTable],
    model: &RangeModel,
) -> Option<Hop> {
    let mut best: Option<(f64, Hop)> = None;
    for (index, (station, table)) in candidates.iter().zip(tables).enumerate() {
        let arrival_km = model.initial_km - station.distance_from_start_km;
        if arrival_km < -EPSILON {
            break;
        }
        let Some(target) = table.lookup(arrival_km.max(0.0)) else {
            continue;
        };
        if target.cost.is_finite()
            && best.is_none_or(|(best_cost, _)| target.cost < best_cost - COST_TOLERANCE)
        {
            best = Some((
                target.cost,
                Hop::Station {
                    index,
                    key: target.key,
                },
            ));
        }
    }
    best.map(|(_, hop)| hop)
}

/// Follow decisions from the first hop to the destination.
///
/// Pass-through states that buy nothing are not reported as stops.
fn reconstruct(
    problem: &RefuelProblem<'_>,
    tables: &[StateTable],
    first_hop: Hop,
) -> Option<Vec<PlannedStop>> {
    let fuel = problem.fuel();
    let mut stops = Vec::new();
    let mut hop = first_hop;
    while let Hop::Station { index, key } = hop {
        let state = tables.get(index).and_then(|table| table.get(key));
        let Some(decision) = state.and_then(|entry| entry.decision) else {
            warn!("optimal plan references unsolved state at station {index}");
            return None;
        };
        if decision.purchase_km > EPSILON {
            let candidate = problem.candidates().get(index)?;
            let litres = fuel
                .fuel_for_km(decision.purchase_km)
                .min(fuel.tank_capacity_l());
            stops.push(PlannedStop::new(candidate.clone(), litres));
        }
        hop = decision.hop;
    }
    Some(stops)
}
