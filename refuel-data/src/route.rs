//! Route loading from routing service responses and GeoJSON lines.
//!
//! Routing responses follow the OSRM route service with GeoJSON geometries
//! (`geometries=geojson`); see
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>.

use camino::Utf8Path;
use geo::Coord;
use log::debug;
use refuel_core::Route;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{DataError, read_json};

const WHAT: &str = "route";

/// Status code of a successful routing response.
const OK_CODE: &str = "Ok";

const METRES_PER_KM: f64 = 1000.0;

/// OSRM route service response.
#[derive(Debug, Deserialize)]
struct RouteResponse {
    /// Status code; absent in hand-trimmed responses.
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    /// Driving distance in metres.
    distance: Option<f64>,
    geometry: LineGeometry,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: LineGeometry,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

impl LineGeometry {
    fn into_coordinates(self) -> Result<Vec<Coord<f64>>, DataError> {
        if self.kind != "LineString" {
            return Err(DataError::UnsupportedGeometry { found: self.kind });
        }
        self.coordinates
            .iter()
            .enumerate()
            .map(|(index, position)| match position.as_slice() {
                [lon, lat, ..] => Ok(Coord { x: *lon, y: *lat }),
                _ => Err(DataError::ShortPosition { index }),
            })
            .collect()
    }
}

/// Load a route from a JSON file.
///
/// See [`parse_route`] for the accepted layouts.
///
/// # Errors
/// Returns [`DataError::Open`] when the file cannot be opened and the
/// [`parse_route`] errors otherwise.
pub fn load_route(path: &Utf8Path) -> Result<Route, DataError> {
    let document: Value = read_json(path, WHAT)?;
    route_from_value(document)
}

/// Parse a route document.
///
/// Accepted layouts:
/// - an OSRM route response with GeoJSON geometry; the first route is used
///   and its `distance` (metres) becomes the route length;
/// - a GeoJSON `Feature` whose geometry is a `LineString`;
/// - a bare GeoJSON `LineString`.
///
/// When no positive distance is reported the length is measured along the
/// polyline.
///
/// # Errors
/// Returns [`DataError::RoutingFailed`] for a failed routing response,
/// [`DataError::MissingRoute`] when it holds no route, geometry errors for
/// anything but a line, and [`DataError::InvalidRoute`] when the decoded
/// route fails validation.
///
/// # Examples
/// ```
/// use refuel_data::parse_route;
///
/// let json = r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 0.0]]}"#;
/// let route = parse_route(json).expect("valid line");
/// assert_eq!(route.coordinates.len(), 2);
/// assert!((route.length_km - 111.195).abs() < 0.01);
/// ```
pub fn parse_route(json: &str) -> Result<Route, DataError> {
    let document: Value =
        serde_json::from_str(json).map_err(|source| DataError::Decode { source, what: WHAT })?;
    route_from_value(document)
}

fn decode<T: DeserializeOwned>(document: Value) -> Result<T, DataError> {
    serde_json::from_value(document).map_err(|source| DataError::Decode { source, what: WHAT })
}

fn route_from_value(document: Value) -> Result<Route, DataError> {
    let route = if document.get("routes").is_some() {
        route_from_response(decode(document)?)?
    } else {
        let kind = document
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(DataError::UnrecognisedRoute)?;
        let geometry = if kind == "Feature" {
            decode::<Feature>(document)?.geometry
        } else {
            decode::<LineGeometry>(document)?
        };
        Route::from_coordinates(geometry.into_coordinates()?)
    };
    route
        .validate()
        .map_err(|source| DataError::InvalidRoute { source })?;
    debug!(
        "loaded route with {} vertices over {:.1} km",
        route.coordinates.len(),
        route.length_km
    );
    Ok(route)
}

#[expect(
    clippy::float_arithmetic,
    reason = "converts the reported distance to kilometres"
)]
fn route_from_response(response: RouteResponse) -> Result<Route, DataError> {
    if let Some(code) = response.code.filter(|code| code != OK_CODE) {
        return Err(DataError::RoutingFailed {
            code,
            message: response.message.unwrap_or_default(),
        });
    }
    let entry = response
        .routes
        .into_iter()
        .next()
        .ok_or(DataError::MissingRoute)?;
    let coordinates = entry.geometry.into_coordinates()?;
    let reported_km = entry
        .distance
        .filter(|metres| metres.is_finite() && *metres > 0.0)
        .map(|metres| metres / METRES_PER_KM);
    Ok(match reported_km {
        Some(length_km) => Route::new(coordinates, length_km),
        None => Route::from_coordinates(coordinates),
    })
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point lengths"
)]
mod tests {
    use super::*;
    use refuel_core::RouteError;
    use rstest::rstest;

    const LINE: &str = "[[-3.70, 40.41], [-3.60, 40.45], [-3.50, 40.50]]";

    #[rstest]
    fn osrm_distance_becomes_the_route_length() {
        let json = format!(
            r#"{{"code": "Ok", "routes": [{{"distance": 25400.0, "duration": 1500.0,
                "geometry": {{"type": "LineString", "coordinates": {LINE}}}}}],
                "waypoints": []}}"#
        );
        let route = parse_route(&json).expect("valid response");
        assert_eq!(route.coordinates.len(), 3);
        assert!((route.length_km - 25.4).abs() < 1e-9);
    }

    #[rstest]
    fn missing_distance_is_measured() {
        let json = format!(
            r#"{{"routes": [{{"geometry": {{"type": "LineString", "coordinates": {LINE}}}}}]}}"#
        );
        let route = parse_route(&json).expect("valid response");
        assert!((route.length_km - route.measured_length_km()).abs() < 1e-9);
    }

    #[rstest]
    fn geojson_features_are_accepted() {
        let json = format!(
            r#"{{"type": "Feature", "properties": {{}},
                "geometry": {{"type": "LineString", "coordinates": {LINE}}}}}"#
        );
        let route = parse_route(&json).expect("valid feature");
        assert_eq!(route.origin(), Some(Coord { x: -3.70, y: 40.41 }));
        assert_eq!(route.destination(), Some(Coord { x: -3.50, y: 40.50 }));
    }

    #[rstest]
    fn elevations_are_ignored() {
        let json = r#"{"type": "LineString", "coordinates": [[0.0, 0.0, 650.0], [0.5, 0.0, 700.0]]}"#;
        let route = parse_route(json).expect("valid line");
        assert_eq!(route.coordinates.get(1), Some(&Coord { x: 0.5, y: 0.0 }));
    }

    #[rstest]
    fn failed_routing_responses_are_reported() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points", "routes": []}"#;
        match parse_route(json) {
            Err(DataError::RoutingFailed { code, message }) => {
                assert_eq!(code, "NoRoute");
                assert_eq!(message, "Impossible route between points");
            }
            other => panic!("expected routing failure, got {other:?}"),
        }
    }

    #[rstest]
    fn empty_route_lists_are_reported() {
        let result = parse_route(r#"{"code": "Ok", "routes": []}"#);
        assert!(matches!(result, Err(DataError::MissingRoute)));
    }

    #[rstest]
    #[case(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#)]
    #[case(r#"{"type": "Feature", "geometry": {"type": "Polygon", "coordinates": []}}"#)]
    fn non_line_geometries_are_rejected(#[case] json: &str) {
        assert!(matches!(
            parse_route(json),
            Err(DataError::UnsupportedGeometry { .. } | DataError::Decode { .. })
        ));
    }

    #[rstest]
    fn short_positions_are_rejected() {
        let json = r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0]]}"#;
        assert!(matches!(
            parse_route(json),
            Err(DataError::ShortPosition { index: 1 })
        ));
    }

    #[rstest]
    fn single_point_lines_fail_validation() {
        let json = r#"{"type": "LineString", "coordinates": [[0.0, 0.0]]}"#;
        assert!(matches!(
            parse_route(json),
            Err(DataError::InvalidRoute {
                source: RouteError::TooFewCoordinates { found: 1 }
            })
        ));
    }

    #[rstest]
    fn untyped_documents_are_unrecognised() {
        assert!(matches!(
            parse_route(r#"{"coordinates": []}"#),
            Err(DataError::UnrecognisedRoute)
        ));
    }
}
