//! Sample store trait and implementations.
//!
//! Provides the [`SampleStore`] trait for abstracting queries against the
//! time-series store holding aggregated samples, a `ClickHouse`-backed
//! implementation, and an in-memory implementation for development and
//! testing.

pub mod clickhouse;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use self::clickhouse::{ClickHouseSampleStore, StoreConfig};
pub use self::memory::InMemorySampleStore;

/// Errors that can occur during sample store operations.
///
/// Adapter-level faults are always surfaced as a value of this type; no
/// panic crosses from a store implementation into the evaluator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A query against the store failed.
    #[error("Store query failed: {cause}")]
    Query {
        /// Description of the underlying failure.
        cause: String,
    },

    /// A bucket or series identifier failed validation.
    ///
    /// Identifiers are interpolated into query text (they cannot be bound
    /// as parameters), so anything that is not a strict identifier is
    /// rejected before a query is built.
    #[error("Invalid store identifier: '{name}'")]
    InvalidIdentifier {
        /// The rejected identifier.
        name: String,
    },

    /// Failed to acquire a lock on an in-memory store.
    #[error("Failed to acquire lock on sample store")]
    Lock,
}

/// Trait for querying aggregated samples per (policy, measurement, host).
///
/// Implementations must be thread-safe (Send + Sync). Each method returns
/// a typed failure rather than raising; callers decide whether a failure
/// is fatal (startup ping) or degrades a single verdict (audit queries).
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Returns the observed row count of aggregated samples for the triple.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the query cannot be executed.
    async fn count(&self, policy: &str, measurement: &str, host: &str)
        -> Result<u64, StoreError>;

    /// Returns the earliest available sample timestamp for the triple, or
    /// `None` when the triple has no data.
    ///
    /// Retention buckets expire old data without backfilling, so "earliest
    /// available" degrades to "oldest currently retained" once expiry has
    /// started. That approximation is accepted, not corrected.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the query cannot be executed.
    async fn first_observation(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Probes store connectivity. Used once at startup; a failure here is
    /// fatal to the process, unlike per-triple query failures.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), StoreError>;
}
