//! HTTP client for the controlled-vocabulary endpoint
//!
//! One best-effort GET at startup. Every failure mode — malformed proxy,
//! unreachable host, non-200 response, unparseable body — collapses into
//! the `Degraded` variant so nothing propagates to the caller beyond a
//! warning; the affected form field then accepts free text.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::VocabSource;

/// Outcome of the one best-effort vocabulary fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabFetch {
    /// The endpoint answered with a usable list of terms
    Fetched(Vec<String>),
    /// The fetch failed; the field falls back to free-text entry
    Degraded { reason: String },
}

impl VocabFetch {
    /// The fetched terms; empty when degraded
    pub fn terms(&self) -> &[String] {
        match self {
            VocabFetch::Fetched(terms) => terms,
            VocabFetch::Degraded { .. } => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, VocabFetch::Degraded { .. })
    }
}

/// Client for the vocabulary endpoint
pub struct VocabClient {
    /// `None` when the client could not be built (malformed proxy)
    client: Option<reqwest::Client>,
    endpoint: String,
    build_error: Option<String>,
}

impl VocabClient {
    /// Create a client for `endpoint`, optionally routed through an
    /// HTTP proxy given as `host:port`.
    pub fn new(endpoint: &str, proxy: Option<&str>, timeout: Duration) -> Self {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(proxy) = proxy {
            match reqwest::Proxy::all(format!("http://{proxy}")) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => {
                    return Self {
                        client: None,
                        endpoint: endpoint.to_string(),
                        build_error: Some(format!("malformed proxy '{proxy}': {e}")),
                    }
                }
            }
        }

        match builder.build() {
            Ok(client) => Self {
                client: Some(client),
                endpoint: endpoint.to_string(),
                build_error: None,
            },
            Err(e) => Self {
                client: None,
                endpoint: endpoint.to_string(),
                build_error: Some(format!("could not build HTTP client: {e}")),
            },
        }
    }

    fn degraded(&self, reason: String) -> VocabFetch {
        warn!("vocabulary fetch degraded: {reason}");
        VocabFetch::Degraded { reason }
    }
}

#[async_trait]
impl VocabSource for VocabClient {
    async fn fetch(&self) -> VocabFetch {
        let Some(client) = &self.client else {
            let reason = self
                .build_error
                .clone()
                .unwrap_or_else(|| "HTTP client unavailable".to_string());
            return self.degraded(reason);
        };

        let response = match client.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(e) => return self.degraded(format!("request failed: {e}")),
        };

        if !response.status().is_success() {
            return self.degraded(format!("endpoint answered {}", response.status()));
        }

        match response.json::<Vec<String>>().await {
            Ok(terms) => {
                debug!("fetched {} vocabulary terms", terms.len());
                VocabFetch::Fetched(terms)
            }
            Err(e) => self.degraded(format!("unparseable vocabulary: {e}")),
        }
    }
}
