//! Validators and sanitizers grouped by vulnerability class.
//!
//! Every function takes `Option<&str>` so the absent-value case is explicit.
//! Validators return a verdict; sanitizers return a new string and hand an
//! absent input back unchanged. Which validators treat absent/empty input as
//! safe differs per function and callers depend on that asymmetry.
//!
//! Several controls carry known bypass gaps (single-pass removals, octets
//! that are not range-checked). They are reproduced as-is because the
//! controls are fixtures for exercising a security testing agent.

pub mod command;
pub mod email;
pub mod html;
pub mod ldap;
pub mod path;
pub mod sql;
pub mod url;

pub use command::{is_safe_command_input, is_valid_host, sanitize_command_input};
pub use email::is_valid_email;
pub use html::{is_safe_html_input, is_safe_text_pattern, sanitize_html_output, strip_html_tags};
pub use ldap::{is_safe_ldap_input, sanitize_ldap_input};
pub use path::{is_safe_path, sanitize_path};
pub use sql::{is_numeric, is_safe_sql_input, is_safe_username, sanitize_sql_input};
pub use url::is_safe_url;

/// A literal substitution: every occurrence of `.0` becomes `.1`.
pub(crate) type Replacement = (&'static str, &'static str);

/// Apply substitutions in table order, each over the output of the previous.
pub(crate) fn replace_in_order(input: &str, table: &[Replacement]) -> String {
    table
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}
