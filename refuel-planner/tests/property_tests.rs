//! Property-based tests for the planners.
//!
//! # Invariants tested
//!
//! - **Dominance:** whenever the greedy planner finds a plan, the optimal
//!   planner finds one that costs no more.
//! - **Drivability:** refuel amounts stay within the tank, fuel never runs
//!   out between stops and the arrival reserve is met.
//! - **Determinism:** planning twice, or with the stations in another order,
//!   gives the same plan.
//! - **Radius monotonicity:** widening the search radius never makes the
//!   optimal plan dearer.
//! - **Zero-stop boundary:** when the tank already covers the route and the
//!   reserve, no stop is planned.
#![expect(
    clippy::float_arithmetic,
    reason = "properties compare floating point costs"
)]


use proptest::prelude::*;
use refuel_core::{PlanParameters, Strategy};
use refuel_planner::plan_route;

use proptest_support::{ROUTE_KM, assert_plan_is_drivable, request, station_set, vehicle_params};

/// Cost tolerance when comparing plans.
const COST_TOLERANCE: f64 = 1e-6;

fn fail(err: impl ToString) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The optimal plan never costs more than the greedy plan.
    #[test]
    fn optimal_never_costs_more_than_greedy(
        stations in station_set(0, 30),
        params in vehicle_params(),
    ) {
        let greedy = plan_route(&request(&stations, &params, Strategy::Greedy));
        let optimal = plan_route(&request(&stations, &params, Strategy::Optimal));
        if let Ok(greedy_plan) = greedy {
            let optimal_plan = optimal.map_err(|err| {
                fail(format!("optimal failed where greedy succeeded: {err}"))
            })?;
            prop_assert!(
                optimal_plan.optimal_cost <= greedy_plan.optimal_cost + COST_TOLERANCE,
                "optimal {} > greedy {}",
                optimal_plan.optimal_cost,
                greedy_plan.optimal_cost
            );
        }
    }

    /// Every plan either strategy returns can actually be driven.
    #[test]
    fn plans_are_drivable(
        stations in station_set(0, 30),
        params in vehicle_params(),
        strategy in prop_oneof![Just(Strategy::Greedy), Just(Strategy::Optimal)],
    ) {
        if let Ok(plan) = plan_route(&request(&stations, &params, strategy)) {
            assert_plan_is_drivable(&plan, &params)?;
            prop_assert!(plan.optimal_cost <= plan.max_price_cost + COST_TOLERANCE);
        }
    }

    /// Planning is deterministic and ignores station input order.
    #[test]
    fn planning_is_deterministic(
        stations in station_set(1, 25),
        params in vehicle_params(),
        strategy in prop_oneof![Just(Strategy::Greedy), Just(Strategy::Optimal)],
    ) {
        let first = plan_route(&request(&stations, &params, strategy));
        let second = plan_route(&request(&stations, &params, strategy));
        prop_assert_eq!(&first, &second);

        let mut reversed = stations.clone();
        reversed.reverse();
        let shuffled = plan_route(&request(&reversed, &params, strategy));
        prop_assert_eq!(first, shuffled);
    }

    /// A wider search radius never makes the optimal plan dearer.
    #[test]
    fn wider_radius_never_costs_more(
        stations in station_set(0, 30),
        params in vehicle_params(),
        narrow in 0.5..3.0_f64,
        extra in 0.0..3.0_f64,
    ) {
        let narrow_params = PlanParameters { search_radius_km: narrow, ..params.clone() };
        let wide_params = PlanParameters { search_radius_km: narrow + extra, ..params };
        if let Ok(narrow_plan) = plan_route(&request(&stations, &narrow_params, Strategy::Optimal)) {
            let wide_plan = plan_route(&request(&stations, &wide_params, Strategy::Optimal))
                .map_err(|err| fail(format!("wider radius failed: {err}")))?;
            prop_assert!(wide_plan.optimal_cost <= narrow_plan.optimal_cost + COST_TOLERANCE);
        }
    }

    /// A tank that covers the route and the reserve needs no stops.
    #[test]
    fn covered_routes_need_no_stops(
        stations in station_set(0, 20),
        tank in 60.0..90.0_f64,
        consumption in 4.5..8.0_f64,
        desired in 0.0..10.0_f64,
        strategy in prop_oneof![Just(Strategy::Greedy), Just(Strategy::Optimal)],
    ) {
        // Full tank; the smallest tank and highest consumption still give
        // 750 km of range against at most 600 km plus a 10% reserve.
        let params = PlanParameters {
            tank_capacity_l: tank,
            consumption_l_per_100km: consumption,
            current_fuel_percent: 100.0,
            desired_fuel_percent: desired,
            ..proptest_support_params()
        };
        let fuel = params.fuel_model();
        prop_assume!(fuel.initial_range_km() >= ROUTE_KM + fuel.desired_range_km());
        let plan = plan_route(&request(&stations, &params, strategy)).map_err(fail)?;
        prop_assert!(plan.stops.is_empty());
        prop_assert!(plan.optimal_cost.abs() < f64::EPSILON);
    }
}

fn proptest_support_params() -> PlanParameters {
    PlanParameters {
        fuel_type: refuel_core::test_support::TEST_FUEL.to_owned(),
        ..PlanParameters::default()
    }
}
