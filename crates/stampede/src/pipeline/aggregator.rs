//! Single-owner accounting of request outcomes.
//!
//! The [`StatusTally`] is never shared: workers hand their outcomes over the
//! results queue and [`aggregate`] is the only code that mutates the tally.
//! Counting is order-insensitive, so the same multiset of outcomes always
//! yields the same tally no matter how workers interleave.

use crate::common::Outcome;
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Occurrence count per [`Outcome`].
///
/// Backed by a [`BTreeMap`] so iteration is sorted by status code with
/// [`Outcome::Failed`] last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: BTreeMap<Outcome, u64>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Number of times `outcome` was recorded; zero if never seen.
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of `200` responses.
    pub fn successes(&self) -> u64 {
        self.counts
            .iter()
            .filter(|(outcome, _)| outcome.is_success())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of requests that produced no status code.
    pub fn failures(&self) -> u64 {
        self.count(Outcome::Failed)
    }

    /// Sum of every count. Equals the number of outcomes recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u64)> + '_ {
        self.counts.iter().map(|(outcome, count)| (*outcome, *count))
    }

    /// Every entry except `200`, in report order.
    pub fn others(&self) -> impl Iterator<Item = (Outcome, u64)> + '_ {
        self.iter().filter(|(outcome, _)| !outcome.is_success())
    }
}

impl Extend<Outcome> for StatusTally {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

impl FromIterator<Outcome> for StatusTally {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

/// Drains the results queue until every sender is gone, counting as outcomes
/// arrive.
pub async fn aggregate(mut results: mpsc::Receiver<Outcome>) -> StatusTally {
    let mut tally = StatusTally::new();
    while let Some(outcome) = results.recv().await {
        tally.record(outcome);
    }

    tracing::debug!(
        total = tally.total(),
        distinct = tally.len(),
        "Results queue closed"
    );
    tally
}
