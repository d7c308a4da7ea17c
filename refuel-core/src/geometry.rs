//! Spherical and planar geometry helpers for route-relative positioning.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, in degrees.
//! Distances are great-circle kilometres. Nearest-segment search runs in a
//! local equirectangular plane centred on the route, which is accurate enough
//! to pick the closest segment; the reported distances are then measured on
//! the sphere again.
#![expect(
    clippy::float_arithmetic,
    reason = "geodesic measurements are floating-point by nature"
)]

use geo::{
    BoundingRect, Closest, ClosestPoint, Coord, Distance, Euclidean, Haversine, Length, Line,
    LineString, Point, Rect,
};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// Mean Earth radius in kilometres, the radius `geo`'s [`Haversine`] uses.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometres spanned by one degree of latitude.
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

const METRES_PER_KM: f64 = 1000.0;

/// Smallest cosine used when widening longitudes near the poles.
const MIN_LATITUDE_COSINE: f64 = 0.01;

/// Squared plane distance (km²) under which two segments count as equally
/// close to a query point.
const TIE_TOLERANCE_SQ: f64 = 1e-12;

/// Great-circle distance between two coordinates in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use refuel_core::geometry::{KM_PER_DEGREE, distance_km};
///
/// let d = distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 });
/// assert!((d - KM_PER_DEGREE).abs() < 1e-6);
/// ```
#[must_use]
pub fn distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / METRES_PER_KM
}

/// Great-circle length of a polyline in kilometres.
#[must_use]
pub fn line_length_km(line: &LineString<f64>) -> f64 {
    Haversine.length(line) / METRES_PER_KM
}

/// Bounding box of the polyline widened by `radius_km` on every side.
///
/// The longitude margin is computed at the latitude closest to a pole so the
/// box never undershoots the true buffer. Returns `None` for an empty slice.
#[must_use]
pub fn buffered_bounds(coordinates: &[Coord<f64>], radius_km: f64) -> Option<Rect<f64>> {
    let bounds = LineString::from(coordinates.to_vec()).bounding_rect()?;
    let lat_margin = radius_km / KM_PER_DEGREE;
    let extreme_lat = bounds.min().y.abs().max(bounds.max().y.abs()) + lat_margin;
    let cosine = extreme_lat.min(90.0).to_radians().cos().max(MIN_LATITUDE_COSINE);
    let lon_margin = radius_km / (KM_PER_DEGREE * cosine);
    Some(Rect::new(
        Coord {
            x: bounds.min().x - lon_margin,
            y: bounds.min().y - lat_margin,
        },
        Coord {
            x: bounds.max().x + lon_margin,
            y: bounds.max().y + lat_margin,
        },
    ))
}

/// Equirectangular plane anchored at a reference latitude, in kilometres.
#[derive(Debug, Clone, Copy)]
struct LocalFrame {
    lon_scale: f64,
}

impl LocalFrame {
    fn centred_on(bounds: Rect<f64>) -> Self {
        let reference = f64::midpoint(bounds.min().y, bounds.max().y);
        Self {
            lon_scale: KM_PER_DEGREE * reference.to_radians().cos().max(MIN_LATITUDE_COSINE),
        }
    }

    fn to_plane(self, coord: Coord<f64>) -> Point<f64> {
        Point::new(coord.x * self.lon_scale, coord.y * KM_PER_DEGREE)
    }

    fn to_coord(self, point: Point<f64>) -> Coord<f64> {
        Coord {
            x: point.x() / self.lon_scale,
            y: point.y() / KM_PER_DEGREE,
        }
    }
}

/// One polyline segment stored in the R-tree.
#[derive(Debug, Clone, Copy)]
struct RouteSegment {
    /// The segment in plane coordinates.
    line: Line<f64>,
    /// Segment start in WGS84.
    start: Coord<f64>,
    /// Great-circle distance from the route origin to `start`.
    offset_km: f64,
}

impl RouteSegment {
    /// Closest plane point on the segment to `point`.
    fn snap(&self, point: Point<f64>) -> Point<f64> {
        match self.line.closest_point(&point) {
            Closest::Intersection(hit) | Closest::SinglePoint(hit) => hit,
            // Zero-length segment.
            Closest::Indeterminate => self.line.start_point(),
        }
    }
}

fn corner(point: Point<f64>) -> [f64; 2] {
    [point.x(), point.y()]
}

impl RTreeObject for RouteSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            corner(self.line.start_point()),
            corner(self.line.end_point()),
        )
    }
}

impl PointDistance for RouteSegment {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [x, y] = *point;
        let query = Point::new(x, y);
        Euclidean.distance(query, self.snap(query)).powi(2)
    }
}

/// Where a point lands when snapped onto a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Nearest point on the polyline.
    pub point: Coord<f64>,
    /// Great-circle distance from the input point to [`Projection::point`].
    pub distance_to_route_km: f64,
    /// Arc distance from the route origin to [`Projection::point`].
    pub distance_along_km: f64,
}

/// Spatial index over a route polyline answering nearest-point queries.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use refuel_core::geometry::RouteProjector;
///
/// let projector = RouteProjector::new(&[
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
/// ])
/// .expect("two coordinates form a polyline");
/// let hit = projector.project(Coord { x: 0.5, y: 0.01 });
/// assert!((hit.distance_along_km - projector.length_km() / 2.0).abs() < 0.01);
/// ```
#[derive(Debug)]
pub struct RouteProjector {
    frame: LocalFrame,
    segments: RTree<RouteSegment>,
    length_km: f64,
    origin: Coord<f64>,
}

impl RouteProjector {
    /// Index the polyline. Returns `None` when fewer than two coordinates are
    /// supplied.
    #[must_use]
    pub fn new(coordinates: &[Coord<f64>]) -> Option<Self> {
        if coordinates.len() < 2 {
            return None;
        }
        let polyline = LineString::from(coordinates.to_vec());
        let frame = LocalFrame::centred_on(polyline.bounding_rect()?);
        let mut offset_km = 0.0;
        let mut segments = Vec::with_capacity(coordinates.len() - 1);
        for segment in polyline.lines() {
            segments.push(RouteSegment {
                line: Line::new(frame.to_plane(segment.start), frame.to_plane(segment.end)),
                start: segment.start,
                offset_km,
            });
            offset_km += distance_km(segment.start, segment.end);
        }
        Some(Self {
            frame,
            segments: RTree::bulk_load(segments),
            length_km: line_length_km(&polyline),
            origin: coordinates.first().copied()?,
        })
    }

    /// Measured great-circle length of the indexed polyline.
    #[must_use]
    pub const fn length_km(&self) -> f64 {
        self.length_km
    }

    /// Snap `point` onto the route.
    ///
    /// When several segments are equally close (for instance on an
    /// out-and-back route) the one earliest along the route wins, so results
    /// do not depend on R-tree traversal order.
    #[must_use]
    pub fn project(&self, point: Coord<f64>) -> Projection {
        let query = self.frame.to_plane(point);
        let mut best: Option<(f64, &RouteSegment)> = None;
        for (segment, distance_sq) in self
            .segments
            .nearest_neighbor_iter_with_distance_2(&corner(query))
        {
            if let Some((best_sq, best_segment)) = best {
                if distance_sq > best_sq + TIE_TOLERANCE_SQ {
                    break;
                }
                if segment.offset_km >= best_segment.offset_km {
                    continue;
                }
            }
            best = Some((distance_sq, segment));
        }
        let Some((_, segment)) = best else {
            return Projection {
                point: self.origin,
                distance_to_route_km: distance_km(point, self.origin),
                distance_along_km: 0.0,
            };
        };
        let snapped = self.frame.to_coord(segment.snap(query));
        Projection {
            point: snapped,
            distance_to_route_km: distance_km(point, snapped),
            distance_along_km: segment.offset_km + distance_km(segment.start, snapped),
        }
    }
}
