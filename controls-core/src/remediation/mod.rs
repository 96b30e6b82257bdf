//! Guarded flows that put the controls in front of a query, command, LDAP
//! filter or HTML fragment.
//!
//! Three shapes recur: validate and reject, sanitize and use, or validate
//! strictly and fall back to sanitizing. The flows only build the guarded
//! string; nothing is executed.

pub mod flows;
pub mod scenario;

pub use flows::{
    accept_email, accept_url, comment_sanitized, comment_stripped, comment_validated,
    ldap_filter_sanitized, ldap_filter_validated, ping_command_validated, sql_login_combined,
    sql_login_sanitized, sql_login_validated, Guarded, Rejection,
};
pub use scenario::Scenario;
