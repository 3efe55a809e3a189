//! The request seam between workers and the network.
//!
//! Workers only know about [`Target`]: something that, when asked, performs
//! one attempt and reports an [`Outcome`]. [`HttpTarget`] is the production
//! implementation; tests and benchmarks plug in scripted targets.

use crate::{
    common::{Outcome, Result},
    config::{LoadConfig, MAX_REDIRECTS},
};
use core::future::Future;
use reqwest::{Client, Url, redirect};

/// A destination that can be hit once per work token.
///
/// Implementations must never fail: any error is reported as
/// [`Outcome::Failed`].
pub trait Target: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Outcome> + Send;
}

/// Issues a `GET` against a fixed URL using a shared [`reqwest::Client`].
///
/// The client carries the per-request timeout and redirect policy, so every
/// worker observes identical settings. Cloning is cheap; the connection pool
/// is shared.
#[derive(Clone, Debug)]
pub struct HttpTarget {
    client: Client,
    url: Url,
}

impl HttpTarget {
    /// Builds the shared client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`](crate::Error::Client) if the TLS backend or
    /// client fails to initialize.
    pub fn new(config: &LoadConfig) -> Result<Self> {
        let policy = if config.follow_redirects {
            redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(policy)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl Target for HttpTarget {
    async fn fetch(&self) -> Outcome {
        match self.client.get(self.url.clone()).send().await {
            // The body is never read; dropping the response releases it.
            Ok(response) => Outcome::from(response.status()),
            Err(e) => {
                tracing::debug!(class = failure_class(&e), "Request failed: {e}");
                Outcome::Failed
            }
        }
    }
}

fn failure_class(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else {
        "other"
    }
}
