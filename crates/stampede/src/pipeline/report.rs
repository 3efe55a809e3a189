//! Human-readable summary of a finished run.

use super::aggregator::StatusTally;
use core::{fmt, time::Duration};

/// Everything printed at the end of a run.
#[derive(Clone, Debug)]
pub struct Report {
    /// Wall-clock time from the start of dispatch to the end of aggregation.
    pub elapsed: Duration,
    /// Number of requests the run was configured to issue.
    pub total_requests: usize,
    pub tally: StatusTally,
}

impl Report {
    pub const fn new(elapsed: Duration, total_requests: usize, tally: StatusTally) -> Self {
        Self {
            elapsed,
            total_requests,
            tally,
        }
    }

    pub fn successes(&self) -> u64 {
        self.tally.successes()
    }

    pub fn failures(&self) -> u64 {
        self.tally.failures()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {:?}", self.elapsed)?;
        writeln!(f, "Total requests: {}", self.total_requests)?;
        writeln!(f, "Requests with HTTP 200: {}", self.tally.successes())?;
        writeln!(f, "Status code distribution:")?;
        for (outcome, count) in self.tally.others() {
            writeln!(f, "{outcome}: {count} requests")?;
        }
        Ok(())
    }
}
