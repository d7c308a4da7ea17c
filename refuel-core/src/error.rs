//! Failure taxonomy for planning requests.
//!
//! Every variant maps onto one of two [`ErrorKind`]s. Callers that only need
//! to decide whether to relax parameters and retry can match on the kind;
//! the variant carries the constraint that failed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ParamsError, RouteError};

/// Coarse classification of a planning failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request was malformed and was rejected before any work.
    InvalidInput,
    /// No chain of stops satisfies the range and arrival constraints.
    RouteUnreachable,
}

/// Errors returned while filtering candidates or planning stops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The route polyline or length was unusable.
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] RouteError),
    /// A vehicle or search parameter was out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParamsError),
    /// Candidates were not ordered by distance from the start.
    #[error("candidate stations must be sorted by distance from start")]
    UnsortedCandidates,
    /// No station lies inside the next leg's reachable window.
    #[error(
        "no station reachable in the next leg: at km {at_km:.1} with {range_km:.1} km of range left"
    )]
    NoReachableStation {
        /// Position along the route where the vehicle ran out of options.
        at_km: f64,
        /// Range left in the tank at that point.
        range_km: f64,
    },
    /// No station near enough to the destination to top up for arrival.
    #[error(
        "no station within {max_last_leg_km:.1} km of the destination after km {at_km:.1} \
         can top up for the required arrival fuel"
    )]
    NoFinalStop {
        /// Position of the last planned stop (or the origin).
        at_km: f64,
        /// Furthest a final stop may be from the destination.
        max_last_leg_km: f64,
    },
    /// No combination of stops reaches the destination with the required fuel.
    #[error(
        "no feasible chain of stops covers {route_km:.1} km from {initial_range_km:.1} km of \
         starting range using {candidates} candidate stations"
    )]
    NoFeasibleChain {
        /// Route length.
        route_km: f64,
        /// Range available at departure.
        initial_range_km: f64,
        /// Number of candidate stations considered.
        candidates: usize,
    },
}

impl PlanError {
    /// Classify the failure.
    ///
    /// # Examples
    /// ```
    /// use refuel_core::{ErrorKind, PlanError};
    ///
    /// let err = PlanError::NoReachableStation { at_km: 10.0, range_km: 5.0 };
    /// assert_eq!(err.kind(), ErrorKind::RouteUnreachable);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRoute(_) | Self::InvalidParameters(_) | Self::UnsortedCandidates => {
                ErrorKind::InvalidInput
            }
            Self::NoReachableStation { .. }
            | Self::NoFinalStop { .. }
            | Self::NoFeasibleChain { .. } => ErrorKind::RouteUnreachable,
        }
    }
}
