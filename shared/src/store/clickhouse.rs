//! `ClickHouse`-backed sample store.
//!
//! Each aggregation policy writes into a retention bucket materialized as a
//! table named after the policy, with `measurement`, `host`, `timestamp`
//! and `value` columns. Host and measurement are bound query parameters;
//! the bucket name is a table identifier and is validated before it is
//! interpolated into query text.

use crate::store::{SampleStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clickhouse::Client;
use std::sync::Arc;

/// Store connection configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `ClickHouse` URL (e.g., <http://localhost:8123>)
    pub url: String,
    /// Database name to use
    pub database: String,
    /// Username for authentication
    pub user: String,
    /// Password for authentication
    pub password: String,
}

impl StoreConfig {
    /// Load store configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CQWATCH_DB_URL`: Store URL (default: <http://localhost:8123>)
    /// - `CQWATCH_DB_NAME`: Database name (default: "cqwatch")
    /// - `CQWATCH_DB_USER`: Database user (default: "cqwatch")
    /// - `CQWATCH_DB_PASSWORD`: Database password (default: empty)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("CQWATCH_DB_URL")
                .unwrap_or_else(|_| "http://localhost:8123".to_string()),
            database: std::env::var("CQWATCH_DB_NAME").unwrap_or_else(|_| "cqwatch".to_string()),
            user: std::env::var("CQWATCH_DB_USER").unwrap_or_else(|_| "cqwatch".to_string()),
            password: std::env::var("CQWATCH_DB_PASSWORD").unwrap_or_default(),
        }
    }
}

/// Sample store backed by a `ClickHouse` client.
#[derive(Clone)]
pub struct ClickHouseSampleStore {
    client: Arc<Client>,
}

impl ClickHouseSampleStore {
    /// Creates a new store from connection configuration.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database)
            .with_user(&config.user)
            .with_password(&config.password);

        Self {
            client: Arc::new(client),
        }
    }
}

/// Validates a bucket/table identifier before interpolation into a query.
///
/// Identifiers cannot be bound as query parameters, so anything outside
/// `[A-Za-z_][A-Za-z0-9_]*` is rejected to keep untrusted values out of
/// query text.
fn validate_identifier(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_first && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl SampleStore for ClickHouseSampleStore {
    async fn count(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
    ) -> Result<u64, StoreError> {
        validate_identifier(policy)?;
        let sql = format!("SELECT count() FROM `{policy}` WHERE measurement = ? AND host = ?");

        self.client
            .query(&sql)
            .bind(measurement)
            .bind(host)
            .fetch_one::<u64>()
            .await
            .map_err(|e| StoreError::Query {
                cause: e.to_string(),
            })
    }

    async fn first_observation(
        &self,
        policy: &str,
        measurement: &str,
        host: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        validate_identifier(policy)?;
        let sql = format!(
            "SELECT toUnixTimestamp(timestamp) FROM `{policy}` \
             WHERE measurement = ? AND host = ? ORDER BY timestamp ASC LIMIT 1"
        );

        let seconds = self
            .client
            .query(&sql)
            .bind(measurement)
            .bind(host)
            .fetch_optional::<u32>()
            .await
            .map_err(|e| StoreError::Query {
                cause: e.to_string(),
            })?;

        Ok(seconds.and_then(|s| DateTime::<Utc>::from_timestamp(i64::from(s), 0)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .map_err(|e| StoreError::Query {
                cause: e.to_string(),
            })?;
        Ok(())
    }
}
