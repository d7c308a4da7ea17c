//! Fixtures shared by unit, behaviour and property tests.
//!
//! Routes run east along the equator, where one kilometre of route equals
//! `1 / KM_PER_DEGREE` degrees of longitude, so station positions can be
//! written directly in route kilometres.
#![expect(
    clippy::float_arithmetic,
    reason = "fixtures convert kilometres to degrees"
)]

use geo::Coord;

use crate::geometry::KM_PER_DEGREE;
use crate::{CandidateStation, PlanParameters, Route, SaleType, Station, Strategy};

/// Fuel type used by every fixture.
pub const TEST_FUEL: &str = "gasoleo_a";

/// Coordinate `along_km` east of the origin and `offset_km` north of the
/// equator.
#[must_use]
pub fn coord_at_km(along_km: f64, offset_km: f64) -> Coord<f64> {
    Coord {
        x: along_km / KM_PER_DEGREE,
        y: offset_km / KM_PER_DEGREE,
    }
}

/// A straight equatorial route of `length_km`, split into `segments` legs.
///
/// The reported length is exactly `length_km`.
#[must_use]
pub fn equator_route(length_km: f64, segments: u32) -> Route {
    let count = segments.max(1);
    let coordinates = (0..=count)
        .map(|i| coord_at_km(length_km * f64::from(i) / f64::from(count), 0.0))
        .collect();
    Route::new(coordinates, length_km)
}

/// A public station at route kilometre `along_km`, `offset_km` off the
/// route, selling [`TEST_FUEL`] at `price`.
#[must_use]
pub fn station_at(id: &str, along_km: f64, offset_km: f64, price: f64) -> Station {
    Station::new(id, format!("Station {id}"), coord_at_km(along_km, offset_km), SaleType::Public)
        .with_price(TEST_FUEL, price)
}

/// A candidate placed directly at `along_km` on a route of `route_km`.
#[must_use]
pub fn candidate_at(id: &str, along_km: f64, price: f64, route_km: f64) -> CandidateStation {
    CandidateStation::at_position(station_at(id, along_km, 0.0, price), price, along_km, route_km)
}

/// Build route-ordered candidates from `(id, km, price)` triples.
#[must_use]
pub fn candidates(route_km: f64, stations: &[(&str, f64, f64)]) -> Vec<CandidateStation> {
    let mut built: Vec<CandidateStation> = stations
        .iter()
        .map(|(id, km, price)| candidate_at(id, *km, *price, route_km))
        .collect();
    built.sort_by(CandidateStation::route_order);
    built
}

/// Parameters for a vehicle expressed directly in test terms.
#[must_use]
pub fn vehicle(
    tank_capacity_l: f64,
    consumption_l_per_100km: f64,
    current_fuel_percent: f64,
    desired_fuel_percent: f64,
    strategy: Strategy,
) -> PlanParameters {
    PlanParameters {
        fuel_type: TEST_FUEL.to_owned(),
        tank_capacity_l,
        consumption_l_per_100km,
        current_fuel_percent,
        desired_fuel_percent,
        search_radius_km: 5.0,
        strategy,
        ..PlanParameters::default()
    }
}
