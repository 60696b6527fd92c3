//! Cqwatch Shared Library
//!
//! This crate contains the types and logic shared across the cqwatch
//! continuous-aggregation audit tool.
//!
//! # Modules
//!
//! - [`config`] - Aggregation policies, the audit registry, host list loading
//! - [`store`] - Sample store trait and implementations (`ClickHouse`, in-memory)
//! - [`freshness`] - The freshness evaluation engine and the audit runner
//! - [`report`] - Console rendering of audit verdicts
//!
//! # Example
//!
//! ```
//! use shared::config::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .policy("samples_1h", 60, 1)
//!     .unwrap()
//!     .measurement("load-midterm")
//!     .unwrap()
//!     .host("web01")
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(registry.policies().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod freshness;
pub mod report;
pub mod store;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
