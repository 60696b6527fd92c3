//! In-memory sample store implementation.
//!
//! Holds aggregated sample rows in a `Vec` behind an `RwLock`. Used for
//! development and testing; the audit only ever asks for counts and the
//! oldest timestamp, so no indexing is needed.

use crate::store::{SampleStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

/// One stored aggregated sample row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SampleRow {
    policy: String,
    measurement: String,
    host: String,
    timestamp: DateTime<Utc>,
}

/// In-memory sample store.
#[derive(Debug, Default)]
pub struct InMemorySampleStore {
    rows: Arc<RwLock<Vec<SampleRow>>>,
}

impl InMemorySampleStore {
    /// Creates a new empty in-memory sample store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory sample store wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Inserts one aggregated sample row for the given triple.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Lock`] if the store lock is poisoned.
    pub fn insert(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Lock)?;
        rows.push(SampleRow {
            policy: policy.to_string(),
            measurement: measurement.to_string(),
            host: host.to_string(),
            timestamp,
        });
        Ok(())
    }

    /// Inserts `count` rows for the triple, spaced `spacing` apart and
    /// ending at `newest`. Convenience for seeding test fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Lock`] if the store lock is poisoned.
    pub fn insert_series(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
        newest: DateTime<Utc>,
        spacing: chrono::Duration,
        count: u32,
    ) -> Result<(), StoreError> {
        for i in 0..count {
            // Cast is acceptable here: fixture sizes stay far below i32::MAX
            #[allow(clippy::cast_possible_wrap)]
            let offset = spacing * i as i32;
            self.insert(policy, measurement, host, newest - offset)?;
        }
        Ok(())
    }
}

#[async_trait]
impl SampleStore for InMemorySampleStore {
    async fn count(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
    ) -> Result<u64, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Lock)?;
        let count = rows
            .iter()
            .filter(|r| r.policy == policy && r.measurement == measurement && r.host == host)
            .count();
        Ok(count as u64)
    }

    async fn first_observation(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Lock)?;
        Ok(rows
            .iter()
            .filter(|r| r.policy == policy && r.measurement == measurement && r.host == host)
            .map(|r| r.timestamp)
            .min())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
