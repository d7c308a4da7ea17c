//! Driving routes supplied by the routing collaborator.

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::line_length_km;

/// An ordered polyline with its total driving length.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use refuel_core::Route;
///
/// let route = Route::from_coordinates(vec![
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
/// ]);
/// assert!(route.validate().is_ok());
/// assert!((route.length_km - 111.195).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline vertices, origin first, as `(longitude, latitude)`.
    pub coordinates: Vec<Coord<f64>>,
    /// Total length in kilometres.
    pub length_km: f64,
}

/// Errors returned by [`Route::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Fewer than two vertices were supplied.
    #[error("route needs at least two coordinates, found {found}")]
    TooFewCoordinates {
        /// Number of vertices present.
        found: usize,
    },
    /// A vertex was NaN, infinite or outside the WGS84 range.
    #[error("route coordinate {index} is not a valid longitude/latitude pair")]
    InvalidCoordinate {
        /// Position of the offending vertex.
        index: usize,
    },
    /// The length was zero, negative or not finite.
    #[error("route length must be a positive number of kilometres, found {length_km}")]
    NonPositiveLength {
        /// Length that was supplied.
        length_km: f64,
    },
}

impl Route {
    /// Construct a route from vertices and a length reported by the router.
    pub const fn new(coordinates: Vec<Coord<f64>>, length_km: f64) -> Self {
        Self {
            coordinates,
            length_km,
        }
    }

    /// Construct a route whose length is measured along the polyline.
    pub fn from_coordinates(coordinates: Vec<Coord<f64>>) -> Self {
        let line = LineString::from(coordinates);
        let length_km = line_length_km(&line);
        Self::new(line.0, length_km)
    }

    /// Great-circle length of the polyline, which may differ from the
    /// router-reported `length_km`.
    #[must_use]
    pub fn measured_length_km(&self) -> f64 {
        line_length_km(&LineString::from(self.coordinates.clone()))
    }

    /// First vertex, if any.
    #[must_use]
    pub fn origin(&self) -> Option<Coord<f64>> {
        self.coordinates.first().copied()
    }

    /// Last vertex, if any.
    #[must_use]
    pub fn destination(&self) -> Option<Coord<f64>> {
        self.coordinates.last().copied()
    }

    /// Check the route is usable for planning.
    ///
    /// # Errors
    /// Returns a [`RouteError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.coordinates.len() < 2 {
            return Err(RouteError::TooFewCoordinates {
                found: self.coordinates.len(),
            });
        }
        if let Some(index) = self.coordinates.iter().position(|c| !is_wgs84(*c)) {
            return Err(RouteError::InvalidCoordinate { index });
        }
        if !(self.length_km.is_finite() && self.length_km > 0.0) {
            return Err(RouteError::NonPositiveLength {
                length_km: self.length_km,
            });
        }
        Ok(())
    }
}

fn is_wgs84(coord: Coord<f64>) -> bool {
    (-180.0..=180.0).contains(&coord.x) && (-90.0..=90.0).contains(&coord.y)
}
