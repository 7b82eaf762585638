//! minpress configuration
//!
//! Loaded from `minpress.yaml` in the working directory when present.
//! Every field has a default, so an empty file is a valid configuration.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`Settings::load_from_dir`]
pub const CONFIG_FILE: &str = "minpress.yaml";

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Settings {
    /// Search behaviour
    #[serde(default)]
    pub solver: SolverConfig,

    /// Diagnostic output of the binary
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Solver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SolverConfig {
    /// How the per-parameter search window `[-L, L]` is derived
    #[serde(default)]
    pub window: WindowPolicy,

    /// Stop after this many queue pops / plateau probes (unbounded if absent)
    #[serde(default)]
    pub max_expansions: Option<u64>,

    /// Emit a progress event every this many search steps
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_progress_interval() -> u64 {
    200_000
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            window: WindowPolicy::default(),
            max_expansions: None,
            progress_interval: default_progress_interval(),
        }
    }
}

/// Window bound `L` for the free-parameter search
///
/// `target_sum` holds for 0/1 actions with non-negative targets in practice,
/// but it is an assumption rather than a theorem; the other policies widen or
/// pin it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowPolicy {
    /// `L = Σ targets`
    #[default]
    TargetSum,
    /// `L = bound`
    Fixed { bound: u64 },
    /// `L = factor · Σ targets`
    Scaled { factor: u64 },
}

impl WindowPolicy {
    /// The bound `L` for a machine with these targets
    pub fn bound(&self, targets: &[u64]) -> u64 {
        let mass = targets.iter().fold(0u64, |acc, &t| acc.saturating_add(t));
        match *self {
            WindowPolicy::TargetSum => mass,
            WindowPolicy::Fixed { bound } => bound,
            WindowPolicy::Scaled { factor } => mass.saturating_mul(factor),
        }
    }
}

/// Logging settings for the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `minpress::search=debug`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize settings to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load settings from an explicit file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        serde_norway::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load `minpress.yaml` from `dir` if it exists
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let file = dir.join(CONFIG_FILE);
        if !file.exists() {
            return Ok(None);
        }
        Self::load(&file).map(Some)
    }

    /// Validate values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(Error::Config("logging.filter cannot be empty".into()));
        }
        if self.solver.progress_interval == 0 {
            return Err(Error::Config(
                "solver.progress_interval must be positive".into(),
            ));
        }
        if let WindowPolicy::Scaled { factor: 0 } = self.solver.window {
            return Err(Error::Config("solver.window.factor must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let settings = Settings::from_yaml("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.solver.window, WindowPolicy::TargetSum);
        assert_eq!(settings.logging.filter, "warn");
    }

    #[test]
    fn test_window_policies() {
        let yaml = r#"
solver:
  window:
    kind: scaled
    factor: 3
  max_expansions: 1000
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.solver.window, WindowPolicy::Scaled { factor: 3 });
        assert_eq!(settings.solver.window.bound(&[1, 2]), 9);
        assert_eq!(settings.solver.max_expansions, Some(1000));
        assert_eq!(WindowPolicy::Fixed { bound: 4 }.bound(&[100]), 4);
        assert_eq!(WindowPolicy::TargetSum.bound(&[3, 4]), 7);
    }

    #[test]
    fn test_yaml_roundtrip_of_non_default() {
        let mut settings = Settings::default();
        settings.solver.window = WindowPolicy::Fixed { bound: 12 };
        settings.logging.filter = "minpress=debug".into();
        let yaml = settings.to_yaml().unwrap();
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), settings);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.solver.window = WindowPolicy::Scaled { factor: 0 };
        assert!(settings.validate().is_err());

        settings.solver.window = WindowPolicy::TargetSum;
        settings.logging.filter = "  ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_window_kind_is_an_error() {
        let yaml = "solver:\n  window:\n    kind: galaxy\n";
        assert!(matches!(Settings::from_yaml(yaml), Err(Error::Config(_))));
    }
}
