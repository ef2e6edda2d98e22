//! Tracing setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install a file-backed tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Without a log file no
/// subscriber is installed and tracing events are discarded, since stdout
/// and stderr belong to the terminal UI. Returns whether a subscriber was
/// installed.
pub fn init(log_file: Option<&Path>, default_filter: &str) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("Invalid log filter {:?}", default_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(!init(None, "info").unwrap());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("ecmo.log");
        assert!(init(Some(&path), "info").is_err());
    }
}
