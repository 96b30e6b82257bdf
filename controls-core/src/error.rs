use thiserror::Error;
use prometheus::Error as PrometheusError;
use std::io::Error as IoError;
use toml::de::Error as TomlError;

#[derive(Error, Debug)]
pub enum ControlsError {
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Scenario {scenario} expects {expected} argument(s), got {actual}")]
    Arity {
        scenario: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] TomlError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] PrometheusError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, ControlsError>;
