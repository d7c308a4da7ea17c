//! Refuelling planners and the end-to-end planning pipeline.
//!
//! Two [`Planner`](refuel_core::Planner) implementations are provided:
//! [`OptimalPlanner`], an exact dynamic programme and the default, and
//! [`GreedyPlanner`], a one-leg-lookahead heuristic. [`plan_route`] runs the
//! whole pipeline for a [`PlanRequest`]: validation, candidate filtering,
//! the selected planner and cost evaluation. [`spawn_plan`] runs the same
//! pipeline on a background thread.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod greedy;
mod optimal;
mod worker;

pub use greedy::GreedyPlanner;
pub use optimal::OptimalPlanner;
pub use worker::{PlanHandle, WorkerError, spawn_plan};

use log::info;
use refuel_core::{
    CandidateStation, PlanError, PlanOutcome, PlanRequest, Planner, RefuelProblem, StopPlan,
    Strategy, cheapest_candidates, evaluate_plan, filter_candidates,
};

/// The planner implementing `strategy`.
#[must_use]
pub fn planner_for(strategy: Strategy) -> &'static dyn Planner {
    match strategy {
        Strategy::Greedy => &GreedyPlanner,
        Strategy::Optimal => &OptimalPlanner,
    }
}

/// Plan refuelling stops for `request`.
///
/// The request is validated first; failures there are `InvalidInput`. A
/// route that no chain of stops can cover fails with `RouteUnreachable`.
///
/// # Errors
/// Returns a [`PlanError`] describing why no plan could be produced.
///
/// # Examples
/// ```
/// use refuel_core::test_support::{equator_route, station_at, vehicle};
/// use refuel_core::{PlanRequest, Strategy};
/// use refuel_planner::plan_route;
///
/// let route = equator_route(400.0, 4);
/// let stations = vec![station_at("a", 100.0, 1.0, 1.45), station_at("b", 250.0, -0.5, 1.32)];
/// let request = PlanRequest::new(route, stations, vehicle(30.0, 10.0, 40.0, 0.0, Strategy::Optimal));
///
/// let plan = plan_route(&request).expect("route is coverable");
/// assert_eq!(plan.stops.len(), 2);
/// assert!(plan.optimal_cost <= plan.max_price_cost);
/// ```
pub fn plan_route(request: &PlanRequest) -> Result<StopPlan, PlanError> {
    request.validate()?;
    let candidates = filter_candidates(&request.stations, &request.route, &request.params)?;
    let problem = RefuelProblem::new(
        &candidates,
        request.route.length_km,
        request.params.fuel_model(),
    )?;
    let planner = planner_for(request.params.strategy);
    let stops = planner.plan_stops(&problem, request.params.tie_break)?;
    let plan = evaluate_plan(planner.strategy(), stops, &candidates);
    let summary = plan.summary();
    info!(
        "{} plan over {:.1} km: {} stops, {:.2} L for {:.2} (saves {:.2} against the average price)",
        plan.strategy,
        request.route.length_km,
        summary.stop_count,
        summary.total_liters,
        summary.total_cost,
        summary.savings_vs_average,
    );
    Ok(plan)
}

/// Run [`plan_route`] and wrap the result for transport.
#[must_use]
pub fn plan_outcome(request: &PlanRequest) -> PlanOutcome {
    plan_route(request).into()
}

/// The `limit` cheapest candidates on the request's route, in route order.
///
/// # Errors
/// Returns [`PlanError::InvalidRoute`] or [`PlanError::InvalidParameters`]
/// for malformed requests.
pub fn cheapest_on_route(
    request: &PlanRequest,
    limit: usize,
) -> Result<Vec<CandidateStation>, PlanError> {
    request.validate()?;
    let candidates = filter_candidates(&request.stations, &request.route, &request.params)?;
    Ok(cheapest_candidates(&candidates, limit))
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point values"
)]
mod tests {
    use super::*;
    use refuel_core::ErrorKind;
    use refuel_core::test_support::{equator_route, station_at, vehicle};
    use rstest::rstest;

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Optimal)]
    fn dispatch_selects_the_requested_planner(#[case] strategy: Strategy) {
        assert_eq!(planner_for(strategy).strategy(), strategy);
    }

    #[rstest]
    fn invalid_parameters_fail_before_planning() {
        let mut params = vehicle(30.0, 10.0, 40.0, 0.0, Strategy::Optimal);
        params.current_fuel_percent = 140.0;
        let request = PlanRequest::new(equator_route(100.0, 1), Vec::new(), params);
        let outcome = plan_outcome(&request);
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[rstest]
    fn cheapest_listing_respects_the_limit() {
        let prices = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6].into_iter().cycle();
        let stations = (0_u32..20)
            .zip(prices)
            .map(|(i, price)| {
                let km = f64::from(i) * 10.0 + 5.0;
                station_at(&format!("s{i:02}"), km, 0.5, price)
            })
            .collect();
        let request = PlanRequest::new(
            equator_route(250.0, 5),
            stations,
            vehicle(50.0, 6.5, 50.0, 0.0, Strategy::Optimal),
        );
        let listing = cheapest_on_route(&request, 5).expect("valid request");
        assert_eq!(listing.len(), 5);
        assert!(listing.iter().all(|c| c.price <= 1.2 + 1e-9));
    }
}
