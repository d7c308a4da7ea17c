#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the candidate filter.

mod support;

use std::cell::RefCell;

use refuel_core::{
    CandidateStation, ErrorKind, PlanError, PlanParameters, Route, SaleType, Station,
    filter_candidates,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use support::{FUEL, coord_at_km, station, straight_route};

/// World state for candidate filter scenarios.
#[derive(Debug, Default)]
struct FilterWorld {
    route: RefCell<Option<Route>>,
    stations: RefCell<Vec<Station>>,
    result: RefCell<Option<Result<Vec<CandidateStation>, PlanError>>>,
}

#[fixture]
fn world() -> FilterWorld {
    FilterWorld::default()
}

fn clean(id: &str) -> String {
    id.trim_matches('"').to_owned()
}

#[given("a straight route of {length} km")]
fn given_route(world: &FilterWorld, length: f64) {
    world.route.replace(Some(straight_route(length)));
}

#[given("a route with a single coordinate")]
fn given_single_point_route(world: &FilterWorld) {
    world
        .route
        .replace(Some(Route::new(vec![coord_at_km(0.0, 0.0)], 10.0)));
}

#[given("a public station {id} at km {km} offset {offset} km selling at {price}")]
fn given_public_station(world: &FilterWorld, id: String, km: f64, offset: f64, price: f64) {
    world
        .stations
        .borrow_mut()
        .push(station(&clean(&id), km, offset, price, SaleType::Public));
}

#[given("a restricted station {id} at km {km} offset {offset} km selling at {price}")]
fn given_restricted_station(world: &FilterWorld, id: String, km: f64, offset: f64, price: f64) {
    world
        .stations
        .borrow_mut()
        .push(station(&clean(&id), km, offset, price, SaleType::Restricted));
}

#[when("candidates are filtered within {radius} km")]
fn when_filtered(world: &FilterWorld, radius: f64) {
    let route = world.route.borrow();
    let route = route.as_ref().expect("route should be configured");
    let params = PlanParameters {
        fuel_type: FUEL.to_owned(),
        search_radius_km: radius,
        ..PlanParameters::default()
    };
    let outcome = filter_candidates(&world.stations.borrow(), route, &params);
    world.result.replace(Some(outcome));
}

#[then("the candidates are {ids}")]
fn then_candidates_are(world: &FilterWorld, ids: String) {
    let result = world.result.borrow();
    let candidates = result
        .as_ref()
        .expect("filter should have run")
        .as_ref()
        .expect("filter should succeed");
    let found: Vec<&str> = candidates.iter().map(|c| c.station.id.as_str()).collect();
    let listed = clean(&ids);
    let expected: Vec<&str> = listed.split(',').collect();
    assert_eq!(found, expected);
}

#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point distances"
)]
#[then("candidate {id} lies {km} km from the end")]
fn then_distance_from_end(world: &FilterWorld, id: String, km: f64) {
    let result = world.result.borrow();
    let candidates = result
        .as_ref()
        .expect("filter should have run")
        .as_ref()
        .expect("filter should succeed");
    let wanted = clean(&id);
    let candidate = candidates
        .iter()
        .find(|c| c.station.id == wanted)
        .expect("candidate should be present");
    assert!((candidate.distance_from_end_km - km).abs() < 1e-3);
}

#[then("filtering fails with an invalid input error")]
fn then_invalid_input(world: &FilterWorld) {
    let result = world.result.borrow();
    let err = result
        .as_ref()
        .expect("filter should have run")
        .as_ref()
        .expect_err("filter should fail");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[scenario(path = "tests/features/candidate_filter.feature", index = 0)]
fn nearby_stations_in_route_order(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_filter.feature", index = 1)]
fn stations_outside_radius_are_dropped(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_filter.feature", index = 2)]
fn wider_radius_admits_more(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_filter.feature", index = 3)]
fn restricted_stations_excluded(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_filter.feature", index = 4)]
fn single_point_route_rejected(world: FilterWorld) {
    let _ = world;
}
