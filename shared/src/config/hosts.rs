//! Host list loading.
//!
//! Hosts are read from a line-delimited file at startup. A missing or
//! unreadable file is a startup failure, not a per-triple one.

use crate::config::policy::ConfigError;
use std::io::BufRead;
use std::path::Path;

/// Reads host identifiers from a line-delimited file.
///
/// Blank lines are skipped; surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`ConfigError::HostFile`] if the file cannot be opened or read.
pub fn load_hosts(path: impl AsRef<Path>) -> Result<Vec<String>, ConfigError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ConfigError::HostFile {
        path: path.display().to_string(),
        source,
    })?;
    read_hosts(std::io::BufReader::new(file)).map_err(|source| ConfigError::HostFile {
        path: path.display().to_string(),
        source,
    })
}

/// Reads host identifiers from any buffered reader, one per line.
///
/// # Errors
///
/// Returns the underlying I/O error if a line cannot be read.
pub fn read_hosts(reader: impl BufRead) -> Result<Vec<String>, std::io::Error> {
    let mut hosts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let host = line.trim();
        if !host.is_empty() {
            hosts.push(host.to_string());
        }
    }
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_hosts_line_delimited() {
        let input = "web01\nweb02\ndb01\n";
        let hosts = read_hosts(input.as_bytes()).unwrap();
        assert_eq!(hosts, vec!["web01", "web02", "db01"]);
    }

    #[test]
    fn test_read_hosts_skips_blank_lines_and_trims() {
        let input = "web01\n\n  web02  \n\n";
        let hosts = read_hosts(input.as_bytes()).unwrap();
        assert_eq!(hosts, vec!["web01", "web02"]);
    }

    #[test]
    fn test_read_hosts_empty_input() {
        let hosts = read_hosts("".as_bytes()).unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn test_load_hosts_missing_file() {
        let result = load_hosts("/nonexistent/cqwatch-servers");
        match result {
            Err(ConfigError::HostFile { path, .. }) => {
                assert!(path.contains("cqwatch-servers"));
            }
            other => panic!("expected HostFile error, got {other:?}"),
        }
    }
}
