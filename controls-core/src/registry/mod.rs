//! Catalogue of the security controls, for listing and dispatch by name

pub mod catalog;
pub mod control;

pub use catalog::ControlRegistry;
pub use control::{Category, ControlFn, ControlKind, ControlSpec, ControlSummary, Outcome};
