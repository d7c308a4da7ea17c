//! Benchmark support utilities for the planners.
//!
//! Generates deterministic station sets spread along a straight route with a
//! seeded RNG, so every run plans over the same input.
#![expect(
    clippy::float_arithmetic,
    reason = "station placement is floating-point"
)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use refuel_core::test_support::{TEST_FUEL, equator_route, station_at};
use refuel_core::{PlanParameters, PlanRequest, Station, Strategy};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Length of the benchmark route in kilometres.
pub const ROUTE_KM: f64 = 1_200.0;

/// Maximum lateral distance of a generated station from the route.
const MAX_OFFSET_KM: f64 = 4.0;

/// Generate `count` stations spread uniformly along the route.
#[must_use]
pub fn generate_stations(count: usize, seed: u64) -> Vec<Station> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let along = rng.gen_range(0.0..ROUTE_KM);
            let offset = rng.gen_range(-MAX_OFFSET_KM..MAX_OFFSET_KM);
            let price = rng.gen_range(1.25..1.95);
            station_at(&format!("bench-{i:04}"), along, offset, price)
        })
        .collect()
}

/// A request over the benchmark route for `strategy`.
#[must_use]
pub fn build_request(stations: Vec<Station>, strategy: Strategy) -> PlanRequest {
    PlanRequest::new(
        equator_route(ROUTE_KM, 24),
        stations,
        PlanParameters {
            fuel_type: TEST_FUEL.to_owned(),
            tank_capacity_l: 45.0,
            consumption_l_per_100km: 7.5,
            current_fuel_percent: 35.0,
            desired_fuel_percent: 15.0,
            search_radius_km: MAX_OFFSET_KM,
            strategy,
            ..PlanParameters::default()
        },
    )
}
