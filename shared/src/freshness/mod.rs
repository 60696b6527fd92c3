//! The freshness evaluation engine.
//!
//! Given what the store reported for one (policy, measurement, host)
//! triple (the observed datapoint count and the timestamp of the earliest
//! retained sample) and the policy's declared cadence and capacity, this
//! module derives an elapsed-time expectation and classifies the triple
//! into a three-level health status.

pub mod audit;

use crate::config::AggregationPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use audit::run_audit;

/// Sentinel carried in [`HealthVerdict::observed_count`] when the count
/// query failed.
pub const COUNT_UNAVAILABLE: i64 = -1;

/// Tri-state health classification for one audited triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Observed count meets both the capacity target and the elapsed-time
    /// expectation.
    Ok,
    /// Below nominal capacity but keeping pace with the elapsed-time
    /// expectation; commonly a policy younger than its retention window.
    Warning,
    /// Falling behind, or no meaningful expectation could be derived.
    Critical,
}

impl HealthStatus {
    /// Returns the status as an uppercase report label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the store reported for one triple.
///
/// `count` is `None` when the count query failed; `first_seen` is `None`
/// when the first-observation query failed or found no data. Ephemeral:
/// built from the two store round-trips and consumed by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Observation {
    /// Observed datapoint count, if the count query succeeded.
    pub count: Option<u64>,
    /// Earliest retained sample timestamp, if one exists.
    pub first_seen: Option<DateTime<Utc>>,
}

/// Health verdict for one (policy, measurement, host) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    /// Name of the audited aggregation policy (retention bucket).
    pub policy: String,
    /// Audited measurement (metric series name).
    pub measurement: String,
    /// Audited source host.
    pub host: String,
    /// Observed datapoint count; [`COUNT_UNAVAILABLE`] when the count
    /// query failed.
    pub observed_count: i64,
    /// Datapoint count implied by the age of the earliest retained sample;
    /// 0 when no expectation could be derived.
    pub expected_from_elapsed: u64,
    /// The policy's declared capacity, copied for the report.
    pub declared_capacity: u32,
    /// The classification.
    pub status: HealthStatus,
}

/// Evaluates one triple.
///
/// The elapsed-time expectation is `floor(elapsed_minutes / cadence)`: a
/// job that runs once every cadence minutes has had that many
/// opportunities to write a datapoint since the first one still visible.
/// No backfill credit is given; an audit that only sees a recent first
/// sample computes a smaller expectation, which is accepted.
///
/// A missing first observation means the triple cannot be evaluated
/// meaningfully and is classified CRITICAL with an expectation of 0.
#[must_use]
pub fn evaluate(
    policy: &AggregationPolicy,
    measurement: &str,
    host: &str,
    observation: Observation,
    now: DateTime<Utc>,
) -> HealthVerdict {
    let observed_count = observation
        .count
        .and_then(|c| i64::try_from(c).ok())
        .unwrap_or(COUNT_UNAVAILABLE);

    let expected_from_elapsed = match observation.first_seen {
        Some(first) => {
            // A first sample in the future (clock skew) clamps to zero
            // elapsed, landing in the no-expectation branch.
            let elapsed_minutes =
                u64::try_from(now.signed_duration_since(first).num_minutes()).unwrap_or(0);
            elapsed_minutes / u64::from(policy.cadence_minutes)
        }
        None => 0,
    };

    HealthVerdict {
        policy: policy.name.clone(),
        measurement: measurement.to_string(),
        host: host.to_string(),
        observed_count,
        expected_from_elapsed,
        declared_capacity: policy.expected_capacity,
        status: classify(observed_count, expected_from_elapsed, policy.expected_capacity),
    }
}

/// Classifies a triple from its three numeric signals.
///
/// Total function of its arguments; branch precedence is significant:
/// an underivable expectation is CRITICAL (failure, not "nothing expected
/// yet"), then falling behind both signals is CRITICAL, then below
/// capacity while keeping pace is WARNING, everything else is OK.
#[must_use]
pub fn classify(observed: i64, expected_from_elapsed: u64, capacity: u32) -> HealthStatus {
    let expected = i64::try_from(expected_from_elapsed).unwrap_or(i64::MAX);
    let capacity = i64::from(capacity);

    if expected_from_elapsed == 0 {
        HealthStatus::Critical
    } else if observed < expected && observed < capacity {
        HealthStatus::Critical
    } else if observed < capacity && observed >= expected {
        HealthStatus::Warning
    } else {
        HealthStatus::Ok
    }
}
