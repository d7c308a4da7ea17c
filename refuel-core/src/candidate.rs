//! Candidate filtering: which stations a route can use, and where they sit
//! along it.
//!
//! Filtering runs in three passes so cost stays proportional to the stations
//! that matter: a policy pass (fuel type and sale type), a broad pass against
//! the route's buffered bounding box, and a narrow pass measuring the true
//! distance to the polyline.
#![expect(
    clippy::float_arithmetic,
    reason = "route-relative distances are floating-point measurements"
)]

use std::cmp::Ordering;

use geo::Intersects;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{RouteProjector, buffered_bounds};
use crate::{PlanError, PlanParameters, ParamsError, Route, RouteError, SaleType, Station};

/// Default size of the cheapest-on-route listing.
pub const DEFAULT_CHEAPEST_LIMIT: usize = 15;

/// A station usable on a specific route, with its route-relative position.
///
/// Built by [`filter_candidates`]; the wrapped [`Station`] is a copy, so the
/// caller's records are never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStation {
    /// The underlying station record.
    pub station: Station,
    /// Price per litre for the requested fuel type.
    pub price: f64,
    /// Arc distance from the route origin to the station's projection.
    pub distance_from_start_km: f64,
    /// Remaining route length after the station's projection.
    pub distance_from_end_km: f64,
    /// Detour distance from the route to the station.
    pub distance_to_route_km: f64,
}

impl CandidateStation {
    /// Build a candidate from an already-known route position.
    ///
    /// Useful when positions come from elsewhere (for instance a cached
    /// snapping step, or tests); `distance_from_end_km` is derived from
    /// `route_length_km`.
    pub fn at_position(
        station: Station,
        price: f64,
        distance_from_start_km: f64,
        route_length_km: f64,
    ) -> Self {
        Self {
            station,
            price,
            distance_from_start_km,
            distance_from_end_km: (route_length_km - distance_from_start_km).max(0.0),
            distance_to_route_km: 0.0,
        }
    }

    /// Ordering used for the candidate list: distance from start, then
    /// station id so equal positions do not depend on input order.
    #[must_use]
    pub fn route_order(&self, other: &Self) -> Ordering {
        self.distance_from_start_km
            .total_cmp(&other.distance_from_start_km)
            .then_with(|| self.station.id.cmp(&other.station.id))
    }
}

/// Does the sale-type policy admit `sale_type`?
const fn sale_type_allowed(sale_type: SaleType, include_restricted: bool) -> bool {
    match sale_type {
        SaleType::Public => true,
        SaleType::Restricted => include_restricted,
    }
}

/// Reduce `stations` to the candidates usable on `route`.
///
/// The result is sorted by distance from the route origin (then by station
/// id). Distances along the polyline are scaled so the destination sits at
/// exactly `route.length_km`, which keeps positions consistent with the
/// router-reported length used by the planners.
///
/// # Errors
/// Returns [`PlanError::InvalidRoute`] for a degenerate route and
/// [`PlanError::InvalidParameters`] for a non-positive search radius or an
/// empty fuel type.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use refuel_core::{PlanParameters, Route, SaleType, Station, filter_candidates};
///
/// let route = Route::from_coordinates(vec![
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
/// ]);
/// let near = Station::new("near", "A", Coord { x: 0.5, y: 0.01 }, SaleType::Public)
///     .with_price("gasoleo_a", 1.40);
/// let far = Station::new("far", "B", Coord { x: 0.5, y: 0.5 }, SaleType::Public)
///     .with_price("gasoleo_a", 1.30);
///
/// let candidates =
///     filter_candidates(&[near, far], &route, &PlanParameters::default()).expect("valid input");
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].station.id, "near");
/// ```
pub fn filter_candidates(
    stations: &[Station],
    route: &Route,
    params: &PlanParameters,
) -> Result<Vec<CandidateStation>, PlanError> {
    route.validate()?;
    if params.fuel_type.trim().is_empty() {
        return Err(ParamsError::EmptyFuelType.into());
    }
    let radius_km = params.search_radius_km;
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(ParamsError::NonPositive {
            field: "search_radius_km",
            value: radius_km,
        }
        .into());
    }

    let projector = RouteProjector::new(&route.coordinates).ok_or(
        RouteError::TooFewCoordinates {
            found: route.coordinates.len(),
        },
    )?;
    let bounds = buffered_bounds(&route.coordinates, radius_km).ok_or(
        RouteError::TooFewCoordinates {
            found: route.coordinates.len(),
        },
    )?;
    let scale = if projector.length_km() > 0.0 {
        route.length_km / projector.length_km()
    } else {
        1.0
    };

    let priced: Vec<(&Station, f64)> = stations
        .iter()
        .filter(|s| sale_type_allowed(s.sale_type, params.include_restricted))
        .filter_map(|s| s.price(&params.fuel_type).map(|price| (s, price)))
        .collect();
    let boxed: Vec<(&Station, f64)> = priced
        .iter()
        .copied()
        .filter(|(s, _)| bounds.intersects(&s.location))
        .collect();

    let mut candidates: Vec<CandidateStation> = boxed
        .iter()
        .filter_map(|(station, price)| {
            let hit = projector.project(station.location);
            (hit.distance_to_route_km <= radius_km).then(|| {
                let from_start = (hit.distance_along_km * scale).clamp(0.0, route.length_km);
                CandidateStation {
                    station: (*station).clone(),
                    price: *price,
                    distance_from_start_km: from_start,
                    distance_from_end_km: route.length_km - from_start,
                    distance_to_route_km: hit.distance_to_route_km,
                }
            })
        })
        .collect();
    candidates.sort_by(CandidateStation::route_order);

    debug!(
        "candidate filter for {}: {} stations, {} priced, {} in buffered box, {} within {radius_km} km",
        params.fuel_type,
        stations.len(),
        priced.len(),
        boxed.len(),
        candidates.len(),
    );
    Ok(candidates)
}

/// The `limit` cheapest candidates, returned in route order.
///
/// Price ties keep the earlier station. Used to offer a short list for
/// manual stop selection.
#[must_use]
pub fn cheapest_candidates(candidates: &[CandidateStation], limit: usize) -> Vec<CandidateStation> {
    let mut by_price: Vec<&CandidateStation> = candidates.iter().collect();
    by_price.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.route_order(b)));
    by_price.truncate(limit);
    let mut selected: Vec<CandidateStation> = by_price.into_iter().cloned().collect();
    selected.sort_by(CandidateStation::route_order);
    selected
}

/// Check a candidate slice is in route order.
pub(crate) fn is_route_ordered(candidates: &[CandidateStation]) -> bool {
    candidates
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if a.distance_from_start_km <= b.distance_from_start_km))
}
