//! Temporary input files for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use refuel_core::test_support::{equator_route, station_at};
use refuel_core::{PlanRequest, Station};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// Length of the route written by [`Workspace::write_route`].
pub(super) const ROUTE_KM: f64 = 300.0;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test input");
}

/// Two stations on the test route; the later one is cheaper.
pub(super) fn two_stations() -> Vec<Station> {
    vec![
        station_at("a", 100.0, 0.5, 1.45),
        station_at("b", 200.0, 0.5, 1.30),
    ]
}

/// Flags giving a 30 L tank at 10 L/100 km with 120 km of initial range.
pub(super) fn vehicle_flags() -> Vec<String> {
    [
        "--tank-capacity",
        "30",
        "--consumption",
        "10",
        "--current-fuel",
        "40",
    ]
    .map(str::to_owned)
    .to_vec()
}

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write a GeoJSON line along the equator.
    pub(super) fn write_route(&self, name: &str) -> Utf8PathBuf {
        let route = equator_route(ROUTE_KM, 3);
        let coordinates: Vec<[f64; 2]> = route.coordinates.iter().map(|c| [c.x, c.y]).collect();
        let document = json!({ "type": "LineString", "coordinates": coordinates });
        let path = self.path(name);
        write_utf8(&path, document.to_string().as_bytes());
        path
    }

    pub(super) fn write_stations(&self, name: &str, stations: &[Station]) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec(stations).expect("serialise stations");
        write_utf8(&path, &payload);
        path
    }

    pub(super) fn write_request(&self, name: &str, request: &PlanRequest) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(request).expect("serialise request");
        write_utf8(&path, &payload);
        path
    }
}
