//! Planner output: the stops to make and what they cost.

use serde::{Deserialize, Serialize};

use crate::{CandidateStation, Strategy};

/// One refuelling stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedStop {
    /// Station to stop at.
    pub candidate: CandidateStation,
    /// Litres to buy.
    pub refuel_amount_l: f64,
    /// `refuel_amount_l * candidate.price`.
    pub refuel_cost: f64,
}

impl PlannedStop {
    /// Price a stop at the candidate's advertised rate.
    #[expect(
        clippy::float_arithmetic,
        reason = "stop cost is litres times price"
    )]
    #[must_use]
    pub fn new(candidate: CandidateStation, refuel_amount_l: f64) -> Self {
        let refuel_cost = refuel_amount_l * candidate.price;
        Self {
            candidate,
            refuel_amount_l,
            refuel_cost,
        }
    }
}

/// A complete plan with its cost baselines.
///
/// `avg_price_cost` and `max_price_cost` price the same litres at the mean
/// and the highest candidate price, giving the caller a measure of the
/// savings the chosen stops achieve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPlan {
    /// Planner that produced the stops.
    pub strategy: Strategy,
    /// Stops in route order.
    pub stops: Vec<PlannedStop>,
    /// Sum of the stops' costs.
    pub optimal_cost: f64,
    /// Planned litres priced at the mean candidate price.
    pub avg_price_cost: f64,
    /// Planned litres priced at the highest candidate price.
    pub max_price_cost: f64,
}

/// Headline figures of a [`StopPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of stops.
    pub stop_count: usize,
    /// Litres bought across all stops.
    pub total_liters: f64,
    /// Amount paid across all stops.
    pub total_cost: f64,
    /// Saving against paying the mean price for the same litres.
    pub savings_vs_average: f64,
    /// Saving against paying the highest price for the same litres.
    pub savings_vs_max: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "plan totals and savings are sums and differences of costs"
)]
impl StopPlan {
    /// Litres bought across all stops.
    #[must_use]
    pub fn total_liters(&self) -> f64 {
        self.stops.iter().map(|stop| stop.refuel_amount_l).sum()
    }

    /// Whether the trip needs no stops at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Headline figures for display.
    #[must_use]
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            stop_count: self.stops.len(),
            total_liters: self.total_liters(),
            total_cost: self.optimal_cost,
            savings_vs_average: self.avg_price_cost - self.optimal_cost,
            savings_vs_max: self.max_price_cost - self.optimal_cost,
        }
    }
}
