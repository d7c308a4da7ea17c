//! Core domain types for the refuel planner.
//!
//! The crate holds everything that does not depend on a particular planning
//! strategy: the route and station models, vehicle parameters, the
//! geometric candidate filter, the [`Planner`] seam, cost evaluation and the
//! request/outcome records exchanged with callers.
//!
//! Planning is a pure computation over an immutable snapshot. Nothing here
//! performs I/O, and every derived record (candidates, stops, plans) is built
//! fresh rather than by mutating caller data.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod contract;
mod cost;
mod error;
pub mod geometry;
mod params;
mod plan;
mod planner;
mod route;
mod station;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{
    CandidateStation, DEFAULT_CHEAPEST_LIMIT, cheapest_candidates, filter_candidates,
};
pub use contract::{PlanOutcome, PlanRequest};
pub use cost::{PriceStats, evaluate_plan};
pub use error::{ErrorKind, PlanError};
pub use params::{
    DEFAULT_FUEL_TYPE, FuelModel, ParamsError, ParseChoiceError, PlanParameters, Strategy,
    TieBreak,
};
pub use plan::{PlanSummary, PlannedStop, StopPlan};
pub use planner::{Planner, RefuelProblem};
pub use route::{Route, RouteError};
pub use station::{FuelPrices, SaleType, Station};

/// Tolerance for fuel and range comparisons, in the unit being compared.
pub const EPSILON: f64 = 1e-6;
