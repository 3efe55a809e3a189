//! Values exchanged between the dispatcher, the workers and the aggregator.

use core::fmt;

/// HTTP status code counted as a success in the report.
pub const SUCCESS_STATUS: u16 = 200;

/// A unit of work representing one request to perform.
///
/// Tokens are fungible: the index only records dispatch order and is used for
/// log correlation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkToken(pub usize);

impl WorkToken {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The result of attempting one request.
///
/// Variants are ordered so that status codes sort numerically and
/// [`Outcome::Failed`] sorts after every status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// A response was received with this status code. Redirects, 4xx and 5xx
    /// are all valid outcomes.
    Status(u16),
    /// No status code was obtained: connection refused, DNS failure, timeout,
    /// or the run deadline cancelled the request.
    Failed,
}

impl Outcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Status(SUCCESS_STATUS))
    }
}

impl From<reqwest::StatusCode> for Outcome {
    fn from(status: reqwest::StatusCode) -> Self {
        Self::Status(status.as_u16())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "Status {code}"),
            Self::Failed => f.write_str("Network error or timeout"),
        }
    }
}
