//! Console rendering of audit verdicts.
//!
//! Formatting only: the status drives the row color, one row per audited
//! triple, blank line between policy groups. With color disabled the
//! numeric columns alone convey the status for non-interactive consumers.

use crate::freshness::{HealthStatus, HealthVerdict};

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    /// Whether rows are wrapped in ANSI color codes.
    pub use_color: bool,
}

impl ConsoleReporter {
    /// Creates a reporter.
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, status: HealthStatus) -> &'static str {
        if !self.use_color {
            return "";
        }
        match status {
            HealthStatus::Ok => "\x1b[32m",       // green
            HealthStatus::Warning => "\x1b[33m",  // yellow
            HealthStatus::Critical => "\x1b[31m", // red
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }

    /// Renders verdicts as a table.
    ///
    /// Verdicts are expected in audit order (grouped by policy); a blank
    /// line separates policy groups.
    #[must_use]
    pub fn generate(&self, verdicts: &[HealthVerdict]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<16} {:<24} {:<12} {:>10} {:>10} {:>14}\n",
            "Host", "Measurement", "Bucket", "Datapoints", "Expected", "From 1st seen"
        ));
        output.push_str(&"=".repeat(92));
        output.push('\n');

        let mut current_policy: Option<&str> = None;
        for verdict in verdicts {
            if let Some(previous) = current_policy {
                if previous != verdict.policy {
                    output.push('\n');
                }
            }
            current_policy = Some(&verdict.policy);

            output.push_str(&format!(
                "{}{:<16} {:<24} {:<12} {:>10} {:>10} {:>14}{}\n",
                self.color_start(verdict.status),
                verdict.host,
                verdict.measurement,
                verdict.policy,
                verdict.observed_count,
                verdict.declared_capacity,
                verdict.expected_from_elapsed,
                self.color_end(),
            ));
        }

        output
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(policy: &str, host: &str, status: HealthStatus) -> HealthVerdict {
        HealthVerdict {
            policy: policy.to_string(),
            measurement: "load-midterm".to_string(),
            host: host.to_string(),
            observed_count: 42,
            expected_from_elapsed: 40,
            declared_capacity: 60,
            status,
        }
    }

    #[test]
    fn test_generate_header_and_rows() {
        let reporter = ConsoleReporter::new(false);
        let verdicts = vec![
            verdict("samples_1h", "web01", HealthStatus::Ok),
            verdict("samples_1h", "web02", HealthStatus::Warning),
        ];

        let output = reporter.generate(&verdicts);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("Host"));
        assert!(lines[1].starts_with("==="));
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("web01"));
        assert!(lines[3].contains("web02"));
    }

    #[test]
    fn test_generate_blank_line_between_policy_groups() {
        let reporter = ConsoleReporter::new(false);
        let verdicts = vec![
            verdict("samples_1h", "web01", HealthStatus::Ok),
            verdict("samples_1d", "web01", HealthStatus::Ok),
        ];

        let output = reporter.generate(&verdicts);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[2].contains("samples_1h"));
        assert_eq!(lines[3], "");
        assert!(lines[4].contains("samples_1d"));
    }

    #[test]
    fn test_generate_colors_by_status() {
        let reporter = ConsoleReporter::new(true);
        let verdicts = vec![
            verdict("samples_1h", "web01", HealthStatus::Ok),
            verdict("samples_1h", "web02", HealthStatus::Warning),
            verdict("samples_1h", "web03", HealthStatus::Critical),
        ];

        let output = reporter.generate(&verdicts);

        assert!(output.contains("\x1b[32m"));
        assert!(output.contains("\x1b[33m"));
        assert!(output.contains("\x1b[31m"));
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn test_generate_no_color_has_no_escapes() {
        let reporter = ConsoleReporter::new(false);
        let verdicts = vec![verdict("samples_1h", "web01", HealthStatus::Critical)];

        let output = reporter.generate(&verdicts);
        assert!(!output.contains('\x1b'));

        // Status stays recoverable from the numeric fields alone.
        assert!(output.contains("42"));
        assert!(output.contains("60"));
        assert!(output.contains("40"));
    }

    #[test]
    fn test_generate_empty_verdicts() {
        let reporter = ConsoleReporter::default();
        let output = reporter.generate(&[]);

        assert_eq!(output.lines().count(), 2);
    }
}
