//! Errors raised while loading datasets and routes.

use std::io;

use camino::Utf8PathBuf;
use refuel_core::RouteError;
use thiserror::Error;

/// Failure to load or decode an input document.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
        /// File that was requested.
        path: Utf8PathBuf,
    },
    /// The document is not valid JSON, or not the expected shape.
    #[error("failed to decode {what}")]
    Decode {
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
        /// Kind of document being decoded.
        what: &'static str,
    },
    /// The station document is neither a service export nor a station list.
    #[error("station document must be a service export or a JSON array of stations")]
    UnrecognisedStations,
    /// The route document matches none of the supported layouts.
    #[error("route document must be an OSRM response or a GeoJSON LineString")]
    UnrecognisedRoute,
    /// The routing service reported a failure.
    #[error("routing service returned {code}: {message}")]
    RoutingFailed {
        /// Status code reported by the service.
        code: String,
        /// Service message, empty when none was given.
        message: String,
    },
    /// The routing response contains no route.
    #[error("routing response contains no route")]
    MissingRoute,
    /// The route geometry is not a line.
    #[error("route geometry must be a LineString, found {found}")]
    UnsupportedGeometry {
        /// Geometry type that was found.
        found: String,
    },
    /// A route position has fewer than two ordinates.
    #[error("route position {index} needs a longitude and a latitude")]
    ShortPosition {
        /// Zero-based index of the offending position.
        index: usize,
    },
    /// The decoded route cannot be planned on.
    #[error("route is unusable")]
    InvalidRoute {
        /// Validation failure.
        #[source]
        source: RouteError,
    },
}
