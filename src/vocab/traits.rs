//! Trait abstraction for the vocabulary client to enable mocking in tests

use async_trait::async_trait;

use super::client::VocabFetch;

/// A source of controlled-vocabulary terms
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabSource: Send + Sync {
    /// Perform the one best-effort fetch of vocabulary terms.
    /// Never errors: failures are reported as [`VocabFetch::Degraded`].
    async fn fetch(&self) -> VocabFetch;
}
