//! Per-station arrival-range states for the optimal planner.
//!
//! Each station owns a fixed list of states, one per distinct arrival range.
//! Ranges are bucketed to [`EPSILON`] kilometres when the table is built, so
//! two ranges that differ only by rounding noise share one state, and lookups
//! are a binary search on the integer bucket.

use refuel_core::EPSILON;

/// Integer bucket identifying an arrival range.
pub(super) type StateKey = i64;

/// Where a decision leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Hop {
    /// Drive to the destination.
    End,
    /// Drive to station `index`, arriving in state `key`.
    Station { index: usize, key: StateKey },
}

/// Purchase made in a state and the hop that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Decision {
    /// Kilometres of range bought at this station.
    pub purchase_km: f64,
    /// Next hop.
    pub hop: Hop,
}

/// Cheapest way to finish the trip from one arrival range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct StateEntry {
    pub key: StateKey,
    pub range_km: f64,
    /// Minimum cost to finish from here; infinite while unsolved or when no
    /// option is feasible.
    pub cost: f64,
    pub decision: Option<Decision>,
}

/// Sorted, deduplicated arrival states of one station.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct StateTable {
    entries: Vec<StateEntry>,
}

/// Bucket for `range_km`.
#[expect(
    clippy::float_arithmetic,
    reason = "bucketing divides by the tolerance"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "ranges are bounded by a tank's reach, far inside i64 at micrometre buckets"
)]
pub(super) fn bucket(range_km: f64) -> StateKey {
    (range_km / EPSILON).round() as StateKey
}

impl StateTable {
    /// Build a table from candidate arrival ranges.
    ///
    /// Negative and non-finite ranges are discarded; ranges falling into the
    /// same bucket collapse onto the first one seen.
    pub(super) fn from_ranges(ranges: impl IntoIterator<Item = f64>) -> Self {
        let mut entries: Vec<StateEntry> = ranges
            .into_iter()
            .filter(|range| range.is_finite() && *range >= 0.0)
            .map(|range_km| StateEntry {
                key: bucket(range_km),
                range_km,
                cost: f64::INFINITY,
                decision: None,
            })
            .collect();
        entries.sort_by_key(|entry| entry.key);
        entries.dedup_by_key(|entry| entry.key);
        Self { entries }
    }

    /// Number of states.
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Mutable access to every state, in range order.
    pub(super) fn entries_mut(&mut self) -> impl Iterator<Item = &mut StateEntry> {
        self.entries.iter_mut()
    }

    /// State with exactly `key`.
    pub(super) fn get(&self, key: StateKey) -> Option<&StateEntry> {
        self.entries
            .binary_search_by_key(&key, |entry| entry.key)
            .ok()
            .and_then(|position| self.entries.get(position))
    }

    /// State for an arrival range computed by the solver.
    ///
    /// Arrival ranges reached along different paths can land one bucket
    /// either side of the stored value, so the neighbours are tried too.
    pub(super) fn lookup(&self, range_km: f64) -> Option<&StateEntry> {
        let key = bucket(range_km);
        self.get(key)
            .or_else(|| self.get(key.saturating_sub(1)))
            .or_else(|| self.get(key.saturating_add(1)))
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point values"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn near_equal_ranges_share_a_state() {
        let table = StateTable::from_ranges([10.0, 10.0 + 1e-9, 0.0, 25.5]);
        assert_eq!(table.len(), 3);
    }

    #[rstest]
    fn invalid_ranges_are_discarded() {
        let table = StateTable::from_ranges([f64::NAN, -1.0, f64::INFINITY, 3.0]);
        assert_eq!(table.len(), 1);
    }

    #[rstest]
    #[case(42.0)]
    #[case(42.0 + 0.9e-6)]
    #[case(42.0 - 0.9e-6)]
    fn lookup_tolerates_neighbouring_buckets(#[case] probe: f64) {
        let table = StateTable::from_ranges([0.0, 42.0, 80.0]);
        let entry = table.lookup(probe).expect("state within tolerance");
        assert_eq!(entry.key, bucket(42.0));
    }

    #[rstest]
    fn lookup_misses_distant_ranges() {
        let table = StateTable::from_ranges([0.0, 42.0]);
        assert!(table.lookup(42.01).is_none());
    }

    #[rstest]
    fn entries_are_sorted_by_range() {
        let mut table = StateTable::from_ranges([30.0, 10.0, 20.0]);
        let ranges: Vec<f64> = table.entries_mut().map(|entry| entry.range_km).collect();
        assert_eq!(ranges, [10.0, 20.0, 30.0]);
    }
}
