//! Helpers shared by the integration tests of this crate.
//!
//! Routes run east along the equator so that station positions can be given
//! in route kilometres.
#![expect(
    clippy::float_arithmetic,
    reason = "fixtures convert kilometres to degrees"
)]

use geo::Coord;
use refuel_core::geometry::KM_PER_DEGREE;
use refuel_core::{Route, SaleType, Station};

/// Fuel type sold by every fixture station.
pub const FUEL: &str = "gasoleo_a";

/// Coordinate `along_km` east of the origin and `offset_km` north of it.
pub fn coord_at_km(along_km: f64, offset_km: f64) -> Coord<f64> {
    Coord {
        x: along_km / KM_PER_DEGREE,
        y: offset_km / KM_PER_DEGREE,
    }
}

/// A two-vertex equatorial route of `length_km`.
pub fn straight_route(length_km: f64) -> Route {
    Route::new(
        vec![coord_at_km(0.0, 0.0), coord_at_km(length_km, 0.0)],
        length_km,
    )
}

/// A station at route kilometre `along_km`, `offset_km` off the route.
pub fn station(id: &str, along_km: f64, offset_km: f64, price: f64, sale: SaleType) -> Station {
    Station::new(id, id, coord_at_km(along_km, offset_km), sale).with_price(FUEL, price)
}
