//! Request and response records exchanged with callers.
//!
//! The same shapes serve a direct library call, a worker-thread message and a
//! JSON file, so every type here round-trips through `serde`.

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, PlanError, PlanParameters, Route, Station, StopPlan};

/// A complete planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Route to plan along.
    pub route: Route,
    /// Full station snapshot; filtering happens inside the planner.
    pub stations: Vec<Station>,
    /// Vehicle and search parameters.
    pub params: PlanParameters,
}

impl PlanRequest {
    /// Bundle the three inputs.
    pub const fn new(route: Route, stations: Vec<Station>, params: PlanParameters) -> Self {
        Self {
            route,
            stations,
            params,
        }
    }

    /// Reject malformed routes and out-of-range parameters.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRoute`] or [`PlanError::InvalidParameters`].
    pub fn validate(&self) -> Result<(), PlanError> {
        self.route.validate()?;
        self.params.validate()?;
        Ok(())
    }
}

/// Result of a planning request in transportable form.
///
/// # Examples
/// ```
/// use refuel_core::{ErrorKind, PlanError, PlanOutcome};
///
/// let outcome = PlanOutcome::from(PlanError::UnsortedCandidates);
/// let json = serde_json::to_value(&outcome).expect("serialise");
/// assert_eq!(json["status"], "failure");
/// assert_eq!(json["kind"], "invalid_input");
/// assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// A plan was produced.
    Success {
        /// The plan.
        plan: StopPlan,
    },
    /// Planning failed.
    Failure {
        /// Failure classification.
        kind: ErrorKind,
        /// Human-readable reason naming the failed constraint.
        message: String,
    },
}

impl PlanOutcome {
    /// The plan, when planning succeeded.
    #[must_use]
    pub const fn plan(&self) -> Option<&StopPlan> {
        match self {
            Self::Success { plan } => Some(plan),
            Self::Failure { .. } => None,
        }
    }

    /// The failure kind, when planning failed.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<PlanError> for PlanOutcome {
    fn from(err: PlanError) -> Self {
        Self::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<StopPlan, PlanError>> for PlanOutcome {
    fn from(result: Result<StopPlan, PlanError>) -> Self {
        match result {
            Ok(plan) => Self::Success { plan },
            Err(err) => err.into(),
        }
    }
}
