//! The audit runner.
//!
//! Walks the registry's policies × measurements × hosts matrix, issues the
//! two store round-trips per triple, and folds each pair of results into a
//! [`HealthVerdict`](crate::freshness::HealthVerdict). Strictly sequential:
//! each pair is issued and consumed before the next triple is visited.

use crate::config::AuditRegistry;
use crate::freshness::{evaluate, HealthVerdict, Observation};
use crate::store::SampleStore;
use chrono::{DateTime, Utc};

/// Runs one full audit pass over the registry's triple matrix.
///
/// Verdicts come back in registry iteration order, grouped policy →
/// measurement → host. A store failure on either query degrades that
/// single triple's verdict and is logged with the triple identity; it
/// never aborts evaluation of the remaining triples.
pub async fn run_audit(
    registry: &AuditRegistry,
    store: &dyn SampleStore,
    now: DateTime<Utc>,
) -> Vec<HealthVerdict> {
    let mut verdicts = Vec::with_capacity(registry.triple_count());

    for policy in registry.policies() {
        for measurement in registry.measurements() {
            for host in registry.hosts() {
                let count = match store.count(&policy.name, measurement, host).await {
                    Ok(count) => Some(count),
                    Err(e) => {
                        tracing::warn!(
                            policy = %policy.name,
                            measurement = %measurement,
                            host = %host,
                            error = %e,
                            "Count query failed"
                        );
                        None
                    }
                };

                let first_seen = match store
                    .first_observation(&policy.name, measurement, host)
                    .await
                {
                    Ok(Some(first)) => Some(first),
                    Ok(None) => {
                        tracing::warn!(
                            policy = %policy.name,
                            measurement = %measurement,
                            host = %host,
                            "No retained samples found for triple"
                        );
                        None
                    }
                    Err(e) => {
                        tracing::warn!(
                            policy = %policy.name,
                            measurement = %measurement,
                            host = %host,
                            error = %e,
                            "First observation query failed"
                        );
                        None
                    }
                };

                verdicts.push(evaluate(
                    policy,
                    measurement,
                    host,
                    Observation { count, first_seen },
                    now,
                ));
            }
        }
    }

    verdicts
}
