//! Cost evaluation and baseline comparison for planned stops.
#![expect(
    clippy::float_arithmetic,
    reason = "prices and litres are floating-point quantities"
)]

use crate::{CandidateStation, PlannedStop, StopPlan, Strategy};

/// Price statistics over a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    /// Arithmetic mean price.
    pub mean: f64,
    /// Highest price.
    pub max: f64,
    /// Lowest price.
    pub min: f64,
}

impl PriceStats {
    /// Summarise the prices of `candidates`; `None` when there are none.
    #[must_use]
    pub fn from_candidates(candidates: &[CandidateStation]) -> Option<Self> {
        let first = candidates.first()?;
        let (sum, min, max) = candidates.iter().fold(
            (0.0, first.price, first.price),
            |(sum, min, max), candidate| {
                (
                    sum + candidate.price,
                    min.min(candidate.price),
                    max.max(candidate.price),
                )
            },
        );
        #[expect(
            clippy::cast_precision_loss,
            reason = "candidate counts are far below f64 precision limits"
        )]
        let count = candidates.len() as f64;
        Some(Self {
            mean: sum / count,
            max,
            min,
        })
    }
}

/// Assemble a [`StopPlan`] from planner stops.
///
/// Baselines price the planned litres at the mean and the maximum price of
/// the whole candidate set, not only of the chosen stops. With no stops every
/// figure is zero.
///
/// # Examples
/// ```
/// use refuel_core::{CandidateStation, PlannedStop, Station, SaleType, Strategy, evaluate_plan};
/// use geo::Coord;
///
/// let at = |id: &str, km: f64, price: f64| {
///     let station = Station::new(id, id, Coord { x: 0.0, y: 0.0 }, SaleType::Public);
///     CandidateStation::at_position(station, price, km, 100.0)
/// };
/// let candidates = vec![at("a", 10.0, 1.0), at("b", 50.0, 2.0)];
/// let stops = vec![PlannedStop::new(candidates[0].clone(), 10.0)];
///
/// let plan = evaluate_plan(Strategy::Optimal, stops, &candidates);
/// assert!((plan.optimal_cost - 10.0).abs() < 1e-9);
/// assert!((plan.avg_price_cost - 15.0).abs() < 1e-9);
/// assert!((plan.max_price_cost - 20.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn evaluate_plan(
    strategy: Strategy,
    stops: Vec<PlannedStop>,
    candidates: &[CandidateStation],
) -> StopPlan {
    let total_liters: f64 = stops.iter().map(|stop| stop.refuel_amount_l).sum();
    let optimal_cost: f64 = stops.iter().map(|stop| stop.refuel_cost).sum();
    let (avg_price_cost, max_price_cost) = match PriceStats::from_candidates(candidates) {
        Some(stats) if !stops.is_empty() => (total_liters * stats.mean, total_liters * stats.max),
        _ => (0.0, 0.0),
    };
    StopPlan {
        strategy,
        stops,
        optimal_cost,
        avg_price_cost,
        max_price_cost,
    }
}
