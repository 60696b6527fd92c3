//! The audit registry: which policies, measurements and hosts to check.
//!
//! The registry is built once at startup through [`RegistryBuilder`] and is
//! immutable afterwards. Iteration order matters only for report ordering:
//! policies, hosts and measurements are walked in first-seen order.

use crate::config::policy::{AggregationPolicy, ConfigError};
use serde::{Deserialize, Serialize};

/// Builder for [`AuditRegistry`].
///
/// Registration methods validate their input and fail with a
/// [`ConfigError`] naming the rejected field; nothing is silently dropped.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    policies: Vec<AggregationPolicy>,
    hosts: Vec<String>,
    measurements: Vec<String>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an aggregation policy to audit.
    ///
    /// Re-declaring a name overwrites the earlier entry but keeps its
    /// first-seen position in iteration order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the name is empty or either numeric
    /// field is zero.
    pub fn policy(
        mut self,
        name: impl Into<String>,
        expected_capacity: u32,
        cadence_minutes: u32,
    ) -> Result<Self, ConfigError> {
        let policy = AggregationPolicy::new(name, expected_capacity, cadence_minutes)?;
        match self.policies.iter_mut().find(|p| p.name == policy.name) {
            Some(existing) => *existing = policy,
            None => self.policies.push(policy),
        }
        Ok(self)
    }

    /// Adds one host to the audit matrix.
    ///
    /// Duplicates are permitted and will cause duplicate evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] if the identifier is empty.
    pub fn host(mut self, host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        self.hosts.push(host);
        Ok(self)
    }

    /// Adds every host from an iterator, typically the host list file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] on the first empty identifier.
    pub fn hosts<I, S>(mut self, hosts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for host in hosts {
            self = self.host(host)?;
        }
        Ok(self)
    }

    /// Adds one measurement (metric series name) to the audit matrix.
    ///
    /// Duplicates are permitted and will cause duplicate evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMeasurement`] if the identifier is empty.
    pub fn measurement(mut self, measurement: impl Into<String>) -> Result<Self, ConfigError> {
        let measurement = measurement.into();
        if measurement.is_empty() {
            return Err(ConfigError::EmptyMeasurement);
        }
        self.measurements.push(measurement);
        Ok(self)
    }

    /// Freezes the builder into an immutable registry.
    #[must_use]
    pub fn build(self) -> AuditRegistry {
        AuditRegistry {
            policies: self.policies,
            hosts: self.hosts,
            measurements: self.measurements,
        }
    }
}

/// The immutable audit configuration: the cross product of its policies,
/// measurements and hosts defines the full audit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRegistry {
    policies: Vec<AggregationPolicy>,
    hosts: Vec<String>,
    measurements: Vec<String>,
}

impl AuditRegistry {
    /// The declared policies, in first-seen order.
    #[must_use]
    pub fn policies(&self) -> &[AggregationPolicy] {
        &self.policies
    }

    /// The hosts to audit, in registration order.
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// The measurements to audit, in registration order.
    #[must_use]
    pub fn measurements(&self) -> &[String] {
        &self.measurements
    }

    /// Looks up a policy by name.
    #[must_use]
    pub fn policy(&self, name: &str) -> Option<&AggregationPolicy> {
        self.policies.iter().find(|p| p.name == name)
    }

    /// Number of (policy, measurement, host) triples the audit will visit.
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.policies.len() * self.measurements.len() * self.hosts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_insertion_order() {
        let registry = RegistryBuilder::new()
            .policy("samples_1h", 60, 1)
            .unwrap()
            .policy("samples_1d", 288, 5)
            .unwrap()
            .policy("samples_1w", 336, 30)
            .unwrap()
            .build();

        let names: Vec<&str> = registry.policies().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["samples_1h", "samples_1d", "samples_1w"]);
    }

    #[test]
    fn test_builder_overwrite_keeps_first_seen_position() {
        let registry = RegistryBuilder::new()
            .policy("a", 10, 1)
            .unwrap()
            .policy("b", 20, 2)
            .unwrap()
            .policy("a", 99, 3)
            .unwrap()
            .build();

        assert_eq!(registry.policies().len(), 2);
        assert_eq!(registry.policies()[0].name, "a");
        assert_eq!(registry.policies()[0].expected_capacity, 99);
        assert_eq!(registry.policies()[1].name, "b");
    }

    #[test]
    fn test_builder_rejects_invalid_policy() {
        assert!(RegistryBuilder::new().policy("", 10, 5).is_err());
        assert!(RegistryBuilder::new().policy("x", 0, 5).is_err());

        // A rejected registration adds no retrievable entry.
        let registry = RegistryBuilder::new().build();
        assert!(registry.policy("x").is_none());
        assert!(registry.policies().is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_host_and_measurement() {
        assert!(matches!(
            RegistryBuilder::new().host(""),
            Err(ConfigError::EmptyHost)
        ));
        assert!(matches!(
            RegistryBuilder::new().measurement(""),
            Err(ConfigError::EmptyMeasurement)
        ));
    }

    #[test]
    fn test_builder_keeps_duplicate_hosts() {
        let registry = RegistryBuilder::new()
            .host("web01")
            .unwrap()
            .host("web01")
            .unwrap()
            .build();

        assert_eq!(registry.hosts(), &["web01", "web01"]);
    }

    #[test]
    fn test_builder_bulk_hosts() {
        let registry = RegistryBuilder::new()
            .hosts(["web01", "web02", "db01"])
            .unwrap()
            .build();

        assert_eq!(registry.hosts().len(), 3);
        assert_eq!(registry.hosts()[2], "db01");
    }

    #[test]
    fn test_triple_count() {
        let registry = RegistryBuilder::new()
            .policy("a", 10, 1)
            .unwrap()
            .policy("b", 10, 1)
            .unwrap()
            .measurement("load")
            .unwrap()
            .hosts(["h1", "h2", "h3"])
            .unwrap()
            .build();

        assert_eq!(registry.triple_count(), 6);
    }

    #[test]
    fn test_policy_lookup() {
        let registry = RegistryBuilder::new()
            .policy("samples_4w", 336, 120)
            .unwrap()
            .build();

        let policy = registry.policy("samples_4w").unwrap();
        assert_eq!(policy.cadence_minutes, 120);
        assert!(registry.policy("missing").is_none());
    }
}
