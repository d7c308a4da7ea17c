//! Command execution against temporary input files.

use super::helpers::{ROUTE_KM, Workspace, two_stations};
use super::*;
use crate::cheapest::{CheapestConfig, execute_cheapest};
use crate::inputs::{ParamOverrides, RequestSource};
use crate::plan::{PlanConfig, execute_plan};
use refuel_core::test_support::{equator_route, station_at};
use refuel_core::{
    CandidateStation, ErrorKind, PlanOutcome, PlanParameters, PlanRequest, Strategy,
};
use rstest::rstest;

fn vehicle_overrides() -> ParamOverrides {
    ParamOverrides {
        tank_capacity_l: Some(30.0),
        consumption_l_per_100km: Some(10.0),
        current_fuel_percent: Some(40.0),
        ..ParamOverrides::default()
    }
}

fn parts(workspace: &Workspace, stations: &[refuel_core::Station]) -> RequestSource {
    RequestSource::Parts {
        route: workspace.write_route("route.json"),
        stations: workspace.write_stations("stations.json", stations),
    }
}

fn decode_outcome(stdout: &[u8]) -> PlanOutcome {
    serde_json::from_slice(stdout).expect("stdout should hold a plan outcome")
}

#[rstest]
#[case::optimal(Strategy::Optimal)]
#[case::greedy(Strategy::Greedy)]
fn plan_prints_a_success_outcome(#[case] strategy: Strategy) {
    let workspace = Workspace::new();
    let config = PlanConfig {
        source: parts(&workspace, &two_stations()),
        overrides: ParamOverrides {
            strategy: Some(strategy),
            ..vehicle_overrides()
        },
    };
    let mut stdout = Vec::new();

    execute_plan(config, &mut stdout).expect("plan should succeed");

    let outcome = decode_outcome(&stdout);
    let plan = outcome.plan().expect("success outcome");
    assert_eq!(plan.strategy, strategy);
    assert!(!plan.stops.is_empty());
    assert!(plan.optimal_cost <= plan.max_price_cost);
}

#[rstest]
fn unreachable_routes_print_a_failure_outcome() {
    let workspace = Workspace::new();
    let config = PlanConfig {
        source: parts(&workspace, &[]),
        overrides: vehicle_overrides(),
    };
    let mut stdout = Vec::new();

    let err = execute_plan(config, &mut stdout).expect_err("no stations to stop at");

    match err {
        CliError::Plan { source } => assert_eq!(source.kind(), ErrorKind::RouteUnreachable),
        other => panic!("expected a planning error, found {other:?}"),
    }
    let outcome = decode_outcome(&stdout);
    assert_eq!(outcome.error_kind(), Some(ErrorKind::RouteUnreachable));
}

#[rstest]
fn request_files_take_station_replacements_and_flags() {
    let workspace = Workspace::new();
    let request = PlanRequest::new(
        equator_route(ROUTE_KM, 3),
        Vec::new(),
        PlanParameters {
            tank_capacity_l: 30.0,
            consumption_l_per_100km: 10.0,
            current_fuel_percent: 100.0,
            ..PlanParameters::default()
        },
    );
    let config = PlanConfig {
        source: RequestSource::Request {
            path: workspace.write_request("request.json", &request),
            route: None,
            stations: Some(workspace.write_stations("stations.json", &two_stations())),
        },
        overrides: ParamOverrides {
            current_fuel_percent: Some(40.0),
            ..ParamOverrides::default()
        },
    };
    let mut stdout = Vec::new();

    execute_plan(config, &mut stdout).expect("replacement stations make the route coverable");

    let outcome = decode_outcome(&stdout);
    let plan = outcome.plan().expect("success outcome");
    let ids: Vec<&str> = plan
        .stops
        .iter()
        .map(|stop| stop.candidate.station.id.as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[rstest]
fn cheapest_lists_stations_in_route_order() {
    let workspace = Workspace::new();
    let stations = vec![
        station_at("dear", 50.0, 0.5, 1.60),
        station_at("cheap", 150.0, 0.5, 1.20),
        station_at("mid", 250.0, 0.5, 1.35),
        station_at("far", 150.0, 20.0, 0.90),
    ];
    let config = CheapestConfig {
        source: parts(&workspace, &stations),
        overrides: ParamOverrides::default(),
        limit: 2,
    };
    let mut stdout = Vec::new();

    execute_cheapest(config, &mut stdout).expect("listing should succeed");

    let listed: Vec<CandidateStation> =
        serde_json::from_slice(&stdout).expect("stdout should hold candidates");
    let ids: Vec<&str> = listed.iter().map(|c| c.station.id.as_str()).collect();
    assert_eq!(ids, ["cheap", "mid"]);
}
