use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ControlsError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Validator,
    Sanitizer,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Validator => f.pad("validator"),
            ControlKind::Sanitizer => f.pad("sanitizer"),
        }
    }
}

/// Vulnerability class a control defends against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sql,
    Xss,
    Command,
    PathTraversal,
    Ldap,
    Email,
    Url,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Sql,
        Category::Xss,
        Category::Command,
        Category::PathTraversal,
        Category::Ldap,
        Category::Email,
        Category::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sql => "sql",
            Category::Xss => "xss",
            Category::Command => "command",
            Category::PathTraversal => "path_traversal",
            Category::Ldap => "ldap",
            Category::Email => "email",
            Category::Url => "url",
        }
    }

    /// Module under `security` that holds the category's controls.
    pub fn module(&self) -> &'static str {
        match self {
            Category::Sql => "sql",
            Category::Xss => "html",
            Category::Command => "command",
            Category::PathTraversal => "path",
            Category::Ldap => "ldap",
            Category::Email => "email",
            Category::Url => "url",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ControlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized || category.module() == normalized)
            .ok_or_else(|| ControlsError::UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Copy)]
pub enum ControlFn {
    Validator(fn(Option<&str>) -> bool),
    Sanitizer(fn(Option<&str>) -> Option<String>),
}

impl fmt::Debug for ControlFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlFn::Validator(_) => f.write_str("Validator(..)"),
            ControlFn::Sanitizer(_) => f.write_str("Sanitizer(..)"),
        }
    }
}

/// A named control together with the function that implements it.
#[derive(Debug, Clone)]
pub struct ControlSpec {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub function: ControlFn,
}

impl ControlSpec {
    pub fn kind(&self) -> ControlKind {
        match self.function {
            ControlFn::Validator(_) => ControlKind::Validator,
            ControlFn::Sanitizer(_) => ControlKind::Sanitizer,
        }
    }

    /// Signature the control is registered under with an IAST agent. The
    /// `*` marks the argument whose data flow is tracked.
    pub fn signature(&self) -> String {
        format!(
            "controls_core::security::{}::{}(Option<&str>*)",
            self.category.module(),
            self.name
        )
    }

    pub fn run(&self, input: Option<&str>) -> Outcome {
        match self.function {
            ControlFn::Validator(check) => Outcome::Verdict(check(input)),
            ControlFn::Sanitizer(transform) => Outcome::Sanitized(transform(input)),
        }
    }

    pub fn summary(&self) -> ControlSummary {
        ControlSummary {
            name: self.name.to_string(),
            kind: self.kind(),
            category: self.category,
            description: self.description.to_string(),
            signature: self.signature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlSummary {
    pub name: String,
    pub kind: ControlKind,
    pub category: Category,
    pub description: String,
    pub signature: String,
}

/// Result of running one control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Verdict(bool),
    Sanitized(Option<String>),
}

impl Outcome {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Outcome::Verdict(false))
    }

    /// Short label used for log fields and metric labels.
    pub fn label(&self, input: Option<&str>) -> &'static str {
        match self {
            Outcome::Verdict(true) => "safe",
            Outcome::Verdict(false) => "unsafe",
            Outcome::Sanitized(None) => "absent",
            Outcome::Sanitized(Some(output)) if Some(output.as_str()) == input => "unchanged",
            Outcome::Sanitized(Some(_)) => "sanitized",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Verdict(true) => write!(f, "SAFE"),
            Outcome::Verdict(false) => write!(f, "UNSAFE"),
            Outcome::Sanitized(Some(output)) => write!(f, "{}", output),
            Outcome::Sanitized(None) => write!(f, "<absent>"),
        }
    }
}
