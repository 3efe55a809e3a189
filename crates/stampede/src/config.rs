//! Command-line parsing and validated run configuration.
//!
//! [`CliArgs`] is the raw `clap` surface. It is converted into a
//! [`LoadConfig`] through [`TryFrom`], which is where every constraint is
//! enforced. Nothing downstream re-validates.
//!
//! Flags may be written Go-style with a single dash (`-url`, `-requests=10`);
//! [`normalize_args`] rewrites them to their double-dash form before parsing.

use crate::common::{Error, Result};
use clap::{CommandFactory, Parser};
use core::time::Duration;
use reqwest::Url;
use std::ffi::OsString;

/// Default per-request timeout, applied at the client level.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Maximum number of hops followed when `--follow-redirects` is set.
pub const MAX_REDIRECTS: usize = 10;

/// Largest request count a single run accepts. Both queues are sized to the
/// request count, and `tokio` channels cannot hold more than this.
pub const MAX_REQUESTS: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Largest worker count a single run accepts.
pub const MAX_CONCURRENCY: usize = 65_536;

/// Runtime configuration for the `stampede` binary.
///
/// Only the target URL is functionally required; every other setting has a
/// default that reproduces a single sequential request.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stampede",
    version,
    about = "Fire a fixed number of concurrent GET requests and tally the status codes"
)]
pub struct CliArgs {
    /// Target URL to load-test.
    #[arg(long, default_value = "", hide_default_value = true)]
    pub url: String,

    /// Total number of GET requests to issue.
    #[arg(long, default_value_t = 1)]
    pub requests: usize,

    /// Number of concurrent workers.
    ///
    /// Workers beyond the number of requests are never spawned.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Per-request timeout in milliseconds, identical for every worker.
    ///
    /// A request that does not complete in time is counted as a network
    /// error.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Follow redirects instead of recording the first 3xx status.
    #[arg(long, default_value_t = false)]
    pub follow_redirects: bool,

    /// Optional deadline for the whole run in milliseconds.
    ///
    /// When it expires, in-flight requests are cancelled and every request
    /// that has not completed is counted as a network error.
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

impl CliArgs {
    /// Renders the help text shown alongside configuration errors.
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub url: Url,
    pub total_requests: usize,
    pub concurrency: usize,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub deadline: Option<Duration>,
}

impl LoadConfig {
    /// Builds a configuration with the default timeout, no redirect
    /// following and no run deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the URL is empty or unparseable,
    /// if `total_requests` exceeds [`MAX_REQUESTS`], or if `concurrency` is
    /// zero or exceeds [`MAX_CONCURRENCY`].
    pub fn new(url: &str, total_requests: usize, concurrency: usize) -> Result<Self> {
        if total_requests > MAX_REQUESTS {
            return Err(Error::invalid_config(format!(
                "requests must not exceed {MAX_REQUESTS}"
            )));
        }
        if concurrency == 0 {
            return Err(Error::invalid_config("concurrency must be greater than 0"));
        }
        if concurrency > MAX_CONCURRENCY {
            return Err(Error::invalid_config(format!(
                "concurrency must not exceed {MAX_CONCURRENCY}"
            )));
        }

        Ok(Self {
            url: parse_target(url)?,
            total_requests,
            concurrency,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            follow_redirects: false,
            deadline: None,
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

impl TryFrom<CliArgs> for LoadConfig {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        if args.timeout_ms == 0 {
            return Err(Error::invalid_config("timeout-ms must be greater than 0"));
        }

        let deadline = match args.deadline_ms {
            Some(0) => {
                return Err(Error::invalid_config("deadline-ms must be greater than 0"));
            }
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        };

        Ok(Self::new(&args.url, args.requests, args.concurrency)?
            .with_timeout(Duration::from_millis(args.timeout_ms))
            .with_follow_redirects(args.follow_redirects)
            .with_deadline(deadline))
    }
}

fn parse_target(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid_config("URL is required"));
    }

    let url = Url::parse(raw)
        .map_err(|e| Error::invalid_config(format!("invalid URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_config(format!(
            "unsupported URL scheme '{other}' (expected http or https)"
        ))),
    }
}

/// Rewrites single-dash long flags (`-url`, `-requests=5`) into the
/// double-dash form `clap` expects.
///
/// The program name, short flags (`-h`), negative numbers and everything
/// after a bare `--` are passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                return None;
            }
            let rest = s.strip_prefix('-')?;
            let is_long = !rest.starts_with('-')
                && rest.len() > 1
                && rest.starts_with(|c: char| c.is_ascii_alphabetic());
            is_long.then(|| OsString::from(format!("-{s}")))
        });

        if arg == "--" {
            passthrough = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<LoadConfig> {
        let argv = normalize_args(std::iter::once("stampede").chain(args.iter().copied()));
        let cli = CliArgs::try_parse_from(argv).expect("clap should accept arguments");
        LoadConfig::try_from(cli)
    }

    #[test]
    fn go_style_flags_are_normalized() {
        let argv = normalize_args(["stampede", "-url", "http://x", "-requests=5", "-h", "-3"]);
        assert_eq!(
            argv,
            vec!["stampede", "--url", "http://x", "--requests=5", "-h", "-3"]
        );
    }

    #[test]
    fn arguments_after_separator_pass_through() {
        let argv = normalize_args(["stampede", "--", "-url"]);
        assert_eq!(argv, vec!["stampede", "--", "-url"]);
    }

    #[test]
    fn defaults_match_a_single_sequential_request() {
        let config = parse(&["-url", "http://localhost:8080/health"]).unwrap();
        assert_eq!(config.url.as_str(), "http://localhost:8080/health");
        assert_eq!(config.total_requests, 1);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert!(!config.follow_redirects);
        assert!(config.deadline.is_none());
    }

    #[test]
    fn all_flags_are_applied() {
        let config = parse(&[
            "-url=https://example.com",
            "-requests",
            "100",
            "-concurrency",
            "8",
            "-timeout-ms",
            "250",
            "-follow-redirects",
            "-deadline-ms",
            "3000",
        ])
        .unwrap();
        assert_eq!(config.total_requests, 100);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.follow_redirects);
        assert_eq!(config.deadline, Some(Duration::from_secs(3)));
    }

    #[test]
    fn empty_url_is_a_config_error() {
        let err = parse(&[]).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "URL is required");

        let err = parse(&["-url", "   "]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn malformed_or_non_http_urls_are_rejected() {
        assert!(parse(&["-url", "not a url"]).unwrap_err().is_config());
        assert!(parse(&["-url", "ftp://example.com"]).unwrap_err().is_config());
    }

    #[test]
    fn zero_concurrency_timeout_or_deadline_is_rejected() {
        let base = ["-url", "http://localhost"];
        for extra in [["-concurrency", "0"], ["-timeout-ms", "0"], ["-deadline-ms", "0"]] {
            let args: Vec<&str> = base.iter().chain(extra.iter()).copied().collect();
            assert!(parse(&args).unwrap_err().is_config(), "{extra:?}");
        }
    }

    #[test]
    fn oversized_request_or_worker_counts_are_rejected() {
        let too_many = (MAX_REQUESTS + 1).to_string();
        let err = parse(&["-url", "http://localhost", "-requests", &too_many]).unwrap_err();
        assert!(err.is_config());

        let huge = (usize::MAX / 4).to_string();
        let err = parse(&["-url", "http://localhost", "-concurrency", &huge]).unwrap_err();
        assert!(err.is_config());

        assert!(LoadConfig::new("http://localhost", usize::MAX, 1).unwrap_err().is_config());
        assert!(LoadConfig::new("http://localhost", MAX_REQUESTS, MAX_CONCURRENCY).is_ok());
    }

    #[test]
    fn zero_requests_is_allowed() {
        let config = parse(&["-url", "http://localhost", "-requests", "0"]).unwrap();
        assert_eq!(config.total_requests, 0);
    }

    #[test]
    fn usage_lists_every_flag() {
        let usage = CliArgs::usage();
        for flag in [
            "--url",
            "--requests",
            "--concurrency",
            "--timeout-ms",
            "--follow-redirects",
            "--deadline-ms",
        ] {
            assert!(usage.contains(flag), "missing {flag}");
        }
    }
}
