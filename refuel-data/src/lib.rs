//! File adapters feeding the refuel planner.
//!
//! Responsibilities:
//! - Load fuel station datasets, either the Spanish fuel price service export
//!   or a plain JSON array of [`Station`](refuel_core::Station) records.
//! - Load route geometry from an OSRM route response or a GeoJSON line.
//! - Read JSON documents such as saved plan requests.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `refuel-core` and
//!   `refuel-planner`).
//! - No network access; fetching datasets and routes is the caller's job.
//!
//! Invariants:
//! - Every station returned carries finite WGS84 coordinates.
//! - Every route returned has a positive length.

mod error;
mod fs;
mod route;
mod stations;

pub use error::DataError;
pub use fs::{file_is_file, open_utf8_file, read_json};
pub use route::{load_route, parse_route};
pub use stations::{PRICE_COLUMNS, load_stations, parse_stations};
