//! TOML configuration for the controls front-ends.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [controls]
//! enabled = ["is_safe_sql_input", "sanitize_sql_input"]
//!
//! [metrics]
//! enabled = true
//! ```
//!
//! Every section is optional. An empty `controls.enabled` list enables all
//! builtin controls.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ControlsError, Result};
use crate::observability::ControlMetrics;
use crate::registry::ControlRegistry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `controls_core=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ControlsSection {
    pub enabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ControlsConfig {
    pub logging: LoggingConfig,
    pub controls: ControlsSection,
    pub metrics: MetricsConfig,
}

impl ControlsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ControlsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ControlsError::InvalidConfig(
                "logging.level must not be empty".to_string(),
            ));
        }

        let builtin = ControlRegistry::builtin();
        let unknown: Vec<&str> = self
            .controls
            .enabled
            .iter()
            .map(String::as_str)
            .filter(|name| builtin.lookup(name).is_err())
            .collect();

        if !unknown.is_empty() {
            return Err(ControlsError::InvalidConfig(format!(
                "unknown controls in controls.enabled: {}",
                unknown.join(", ")
            )));
        }

        Ok(())
    }

    /// Registry restricted to the enabled controls, with metrics attached
    /// when `metrics.enabled` is set.
    pub fn build_registry(&self) -> Result<ControlRegistry> {
        let registry = ControlRegistry::with_enabled(&self.controls.enabled)?;
        if self.metrics.enabled {
            Ok(registry.with_metrics(ControlMetrics::new()?))
        } else {
            Ok(registry)
        }
    }
}
