//! Layered configuration.
//!
//! Settings come from an optional TOML file, then `ECMO_`-prefixed
//! environment variables, then command-line flags (applied by `main`).
//!
//! ```toml
//! theme = "dark"
//! log_file = "/var/log/ecmo-watch.log"
//! log_filter = "ecmo_core=debug,info"
//! connect = "10.0.0.12:7070"
//! tick_ms = 100
//!
//! [circuit]
//! drainage_cannula = 25
//! return_cannula = 19
//! oxygenator = "quadrox_adult"
//! ```
//!
//! Nested keys use a double underscore in the environment, for example
//! `ECMO_CIRCUIT__OXYGENATOR=nautilus`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::CircuitSettings;

/// Which colour theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeChoice,
    /// Where to write tracing output. The terminal belongs to the UI, so
    /// nothing is logged without one.
    pub log_file: Option<PathBuf>,
    /// Filter directives used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Bedside gateway to read commands from (`host:port`).
    pub connect: Option<String>,
    /// UI tick in milliseconds.
    pub tick_ms: u64,
    pub circuit: CircuitSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Auto,
            log_file: None,
            log_filter: "info".to_string(),
            connect: None,
            tick_ms: 100,
            circuit: CircuitSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("ECMO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::Oxygenator;

    #[test]
    fn test_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
theme = "light"
connect = "127.0.0.1:7070"
tick_ms = 250

[circuit]
drainage_cannula = 29
oxygenator = "nautilus"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.connect.as_deref(), Some("127.0.0.1:7070"));
        assert_eq!(settings.tick_ms, 250);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.circuit.drainage_cannula, 29);
        assert_eq!(settings.circuit.return_cannula, 19);
        assert_eq!(settings.circuit.oxygenator, Oxygenator::Nautilus);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "theme = \"sepia\"").unwrap();
        assert!(Settings::load(Some(file.path())).is_err());
    }
}
