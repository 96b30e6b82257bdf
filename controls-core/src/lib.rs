pub mod config;
pub mod error;
pub mod observability;
pub mod registry;
pub mod remediation;
pub mod security;

pub use config::ControlsConfig;
pub use error::{ControlsError, Result};
pub use registry::{ControlRegistry, Outcome};
pub use remediation::{Rejection, Scenario};
