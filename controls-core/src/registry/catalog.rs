use crate::error::{ControlsError, Result};
use crate::log_control;
use crate::observability::ControlMetrics;
use crate::security::{command, email, html, ldap, path, sql, url};

use super::control::{Category, ControlFn, ControlSpec, Outcome};

fn spec(
    name: &'static str,
    category: Category,
    description: &'static str,
    function: ControlFn,
) -> ControlSpec {
    ControlSpec {
        name,
        category,
        description,
        function,
    }
}

fn builtin_controls() -> Vec<ControlSpec> {
    use Category::{Command, Email, Ldap, PathTraversal, Sql, Url, Xss};
    use ControlFn::{Sanitizer, Validator};

    vec![
        spec("is_safe_sql_input", Sql, "Only letters, digits, _ - . @", Validator(sql::is_safe_sql_input)),
        spec("is_safe_username", Sql, "3-20 letters, digits or _", Validator(sql::is_safe_username)),
        spec("is_numeric", Sql, "Parses as a 64-bit signed integer", Validator(sql::is_numeric)),
        spec("sanitize_sql_input", Sql, "Double quotes, drop ; -- /* */ xp_ sp_", Sanitizer(sql::sanitize_sql_input)),
        spec("is_safe_html_input", Xss, "No script markers or angle brackets", Validator(html::is_safe_html_input)),
        spec("is_safe_text_pattern", Xss, "Letters, digits, space and . , ! ? - @", Validator(html::is_safe_text_pattern)),
        spec("sanitize_html_output", Xss, "HTML-encode & < > \" ' /", Sanitizer(html::sanitize_html_output)),
        spec("strip_html_tags", Xss, "Remove <...> tags, keep text", Sanitizer(html::strip_html_tags)),
        spec("is_safe_command_input", Command, "No shell metacharacters", Validator(command::is_safe_command_input)),
        spec("is_valid_host", Command, "Hostname or dotted quad", Validator(command::is_valid_host)),
        spec("sanitize_command_input", Command, "Remove shell metacharacters, trim", Sanitizer(command::sanitize_command_input)),
        spec("is_safe_path", PathTraversal, "Relative, no .. ./ or ~", Validator(path::is_safe_path)),
        spec("sanitize_path", PathTraversal, "Remove .. ./ ~ and leading /", Sanitizer(path::sanitize_path)),
        spec("is_safe_ldap_input", Ldap, "No * ( ) \\ / or NUL", Validator(ldap::is_safe_ldap_input)),
        spec("sanitize_ldap_input", Ldap, "Hex-escape \\ * ( ) NUL", Sanitizer(ldap::sanitize_ldap_input)),
        spec("is_valid_email", Email, "local-part@domain.tld", Validator(email::is_valid_email)),
        spec("is_safe_url", Url, "http:// or https:// scheme", Validator(url::is_safe_url)),
    ]
}

/// Accepts `is-safe-url` as well as `is_safe_url`.
fn normalize_name(name: &str) -> String {
    name.trim().replace('-', "_")
}

/// Immutable catalogue of controls with dispatch by name.
#[derive(Clone)]
pub struct ControlRegistry {
    controls: Vec<ControlSpec>,
    metrics: Option<ControlMetrics>,
}

impl ControlRegistry {
    pub fn builtin() -> Self {
        Self {
            controls: builtin_controls(),
            metrics: None,
        }
    }

    /// Registry holding only the named controls, in builtin order. An empty
    /// list enables everything.
    pub fn with_enabled(names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(Self::builtin());
        }

        let wanted: Vec<String> = names.iter().map(|name| normalize_name(name)).collect();
        let all = builtin_controls();

        if let Some(unknown) = wanted
            .iter()
            .find(|name| !all.iter().any(|spec| spec.name == name.as_str()))
        {
            return Err(ControlsError::UnknownControl(unknown.clone()));
        }

        let controls = all
            .into_iter()
            .filter(|spec| wanted.iter().any(|name| name == spec.name))
            .collect();

        Ok(Self {
            controls,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: ControlMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&ControlMetrics> {
        self.metrics.as_ref()
    }

    pub fn lookup(&self, name: &str) -> Result<&ControlSpec> {
        let normalized = normalize_name(name);
        self.controls
            .iter()
            .find(|spec| spec.name == normalized)
            .ok_or_else(|| ControlsError::UnknownControl(name.to_string()))
    }

    pub fn apply(&self, name: &str, input: Option<&str>) -> Result<Outcome> {
        let spec = self.lookup(name)?;
        Ok(self.run(spec, input))
    }

    /// Run every enabled control against the same input, in registry order.
    pub fn scan(&self, input: Option<&str>) -> Vec<(&ControlSpec, Outcome)> {
        self.controls
            .iter()
            .map(|spec| (spec, self.run(spec, input)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlSpec> {
        self.controls.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ControlSpec> {
        self.controls
            .iter()
            .filter(move |spec| spec.category == category)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    fn run(&self, spec: &ControlSpec, input: Option<&str>) -> Outcome {
        let outcome = spec.run(input);

        log_control!(
            debug,
            spec.name,
            kind = %spec.kind(),
            absent = input.is_none(),
            outcome = outcome.label(input),
            "control applied"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record(spec.name, &outcome, input);
        }

        outcome
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
