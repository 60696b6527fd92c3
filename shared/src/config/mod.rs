//! Configuration module for cqwatch.
//!
//! This module contains the aggregation policy declarations, the audit
//! registry built from them, and host list loading.

pub mod hosts;
pub mod policy;
pub mod registry;

pub use hosts::load_hosts;
pub use policy::{AggregationPolicy, ConfigError};
pub use registry::{AuditRegistry, RegistryBuilder};
