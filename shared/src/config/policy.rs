//! Aggregation policy declarations.
//!
//! An aggregation policy describes one scheduled aggregation job: the
//! retention bucket its output lives in, the nominal datapoint capacity of
//! that bucket, and how often the job runs.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised when a configuration value is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A policy was declared with an empty name.
    #[error("Aggregation policy name must not be empty")]
    EmptyPolicyName,

    /// A policy was declared with a zero datapoint capacity.
    #[error("Aggregation policy '{policy}' must declare a capacity greater than zero")]
    ZeroCapacity {
        /// The name of the rejected policy.
        policy: String,
    },

    /// A policy was declared with a zero run cadence.
    #[error("Aggregation policy '{policy}' must declare a cadence greater than zero")]
    ZeroCadence {
        /// The name of the rejected policy.
        policy: String,
    },

    /// A host was registered with an empty identifier.
    #[error("Host identifier must not be empty")]
    EmptyHost,

    /// A measurement was registered with an empty identifier.
    #[error("Measurement identifier must not be empty")]
    EmptyMeasurement,

    /// The host list file could not be read.
    #[error("Could not read host list '{path}': {source}")]
    HostFile {
        /// The path that failed to open or read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A declared aggregation job and the retention bucket it writes to.
///
/// The policy name doubles as the identifier of the retention bucket the
/// aggregated samples live in, so the audit can query the bucket directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPolicy {
    /// Name of the policy, and of the retention bucket holding its output.
    pub name: String,
    /// Maximum meaningful datapoint count for a fully warmed-up bucket.
    pub expected_capacity: u32,
    /// Minutes between successive runs of the aggregation job.
    pub cadence_minutes: u32,
}

impl AggregationPolicy {
    /// Creates a validated aggregation policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the rejected field if:
    /// - `name` is empty
    /// - `expected_capacity` is zero
    /// - `cadence_minutes` is zero
    pub fn new(
        name: impl Into<String>,
        expected_capacity: u32,
        cadence_minutes: u32,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyPolicyName);
        }
        if expected_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { policy: name });
        }
        if cadence_minutes == 0 {
            return Err(ConfigError::ZeroCadence { policy: name });
        }
        Ok(Self {
            name,
            expected_capacity,
            cadence_minutes,
        })
    }

    /// Returns the run cadence as a `Duration`.
    #[must_use]
    pub fn cadence(&self) -> Duration {
        Duration::from_secs(u64::from(self.cadence_minutes) * 60)
    }
}

impl std::fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (capacity {}, every {} min)",
            self.name, self.expected_capacity, self.cadence_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_new_valid() {
        let policy = AggregationPolicy::new("samples_1h", 60, 1).unwrap();
        assert_eq!(policy.name, "samples_1h");
        assert_eq!(policy.expected_capacity, 60);
        assert_eq!(policy.cadence_minutes, 1);
    }

    #[test]
    fn test_policy_new_empty_name() {
        let result = AggregationPolicy::new("", 10, 5);
        assert!(matches!(result, Err(ConfigError::EmptyPolicyName)));
    }

    #[test]
    fn test_policy_new_zero_capacity() {
        let result = AggregationPolicy::new("x", 0, 5);
        assert!(matches!(result, Err(ConfigError::ZeroCapacity { .. })));
        assert!(result.unwrap_err().to_string().contains("'x'"));
    }

    #[test]
    fn test_policy_new_zero_cadence() {
        let result = AggregationPolicy::new("x", 10, 0);
        assert!(matches!(result, Err(ConfigError::ZeroCadence { .. })));
    }

    #[test]
    fn test_policy_cadence_duration() {
        let policy = AggregationPolicy::new("samples_1d", 288, 5).unwrap();
        assert_eq!(policy.cadence(), Duration::from_secs(300));
    }

    #[test]
    fn test_policy_serialization() {
        let policy = AggregationPolicy::new("samples_52w", 364, 1440).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        let deserialized: AggregationPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, deserialized);
    }
}
