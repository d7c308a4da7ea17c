//! Facade crate for the refuel planning engine.
//!
//! This crate re-exports the core domain types and exposes the planners and
//! file adapters behind feature flags.

#![forbid(unsafe_code)]

pub use refuel_core::{
    CandidateStation, EPSILON, ErrorKind, FuelModel, PlanError, PlanOutcome, PlanParameters,
    PlanRequest, PlanSummary, PlannedStop, Planner, RefuelProblem, Route, SaleType, Station,
    StopPlan, Strategy, TieBreak, cheapest_candidates, evaluate_plan, filter_candidates,
};

#[cfg(feature = "planner")]
pub use refuel_planner::{
    GreedyPlanner, OptimalPlanner, PlanHandle, WorkerError, cheapest_on_route, plan_outcome,
    plan_route, planner_for, spawn_plan,
};

#[cfg(feature = "data")]
pub use refuel_data::{DataError, load_route, load_stations, parse_route, parse_stations};
