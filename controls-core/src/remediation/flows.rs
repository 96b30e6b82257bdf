use thiserror::Error;
use tracing::debug;

use crate::security;

/// Why a guarded flow refused its input. The message is what the caller
/// shows to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid input detected. Only alphanumeric characters allowed.")]
    UnsafeSqlInput,

    #[error("Invalid username format")]
    InvalidUsername,

    #[error("HTML tags and scripts are not allowed")]
    UnsafeHtml,

    #[error("Invalid hostname format")]
    InvalidHost,

    #[error("Dangerous characters detected")]
    UnsafeCommand,

    #[error("Invalid characters for LDAP query")]
    UnsafeLdap,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Only http:// and https:// URLs are allowed")]
    UnsafeUrl,
}

pub type Guarded = std::result::Result<String, Rejection>;

fn login_query(username: &str, password: &str) -> String {
    format!(
        "SELECT * FROM users WHERE username = '{}' AND password = '{}'",
        username, password
    )
}

fn comment_page(comment: &str) -> String {
    format!(
        "<html><body><h2>Comment Posted:</h2><div>{}</div></body></html>",
        comment
    )
}

fn uid_filter(username: &str) -> String {
    format!("(&(uid={})(objectClass=person))", username)
}

fn sanitized(transform: fn(Option<&str>) -> Option<String>, value: &str) -> String {
    transform(Some(value)).unwrap_or_default()
}

// ========== SQL ==========

/// Both fields must pass the SQL allow-list before they are concatenated.
pub fn sql_login_validated(username: &str, password: &str) -> Guarded {
    if !security::is_safe_sql_input(Some(username)) || !security::is_safe_sql_input(Some(password)) {
        debug!(flow = "sql_login_validated", "rejected");
        return Err(Rejection::UnsafeSqlInput);
    }
    Ok(login_query(username, password))
}

pub fn sql_login_sanitized(username: &str, password: &str) -> String {
    login_query(
        &sanitized(security::sanitize_sql_input, username),
        &sanitized(security::sanitize_sql_input, password),
    )
}

/// Strict username check first, the looser allow-list plus escaping as a
/// fallback. The password is always escaped.
pub fn sql_login_combined(username: &str, password: &str) -> Guarded {
    let username = if security::is_safe_username(Some(username)) {
        username.to_string()
    } else if security::is_safe_sql_input(Some(username)) {
        sanitized(security::sanitize_sql_input, username)
    } else {
        debug!(flow = "sql_login_combined", "rejected");
        return Err(Rejection::InvalidUsername);
    };

    let password = sanitized(security::sanitize_sql_input, password);
    Ok(login_query(&username, &password))
}

// ========== XSS ==========

pub fn comment_validated(comment: &str) -> Guarded {
    if !security::is_safe_html_input(Some(comment)) {
        debug!(flow = "comment_validated", "rejected");
        return Err(Rejection::UnsafeHtml);
    }
    Ok(comment_page(comment))
}

pub fn comment_sanitized(comment: &str) -> String {
    comment_page(&sanitized(security::sanitize_html_output, comment))
}

pub fn comment_stripped(comment: &str) -> String {
    comment_page(&sanitized(security::strip_html_tags, comment))
}

// ========== Command ==========

/// Host format first, then shell metacharacters. The command is returned,
/// never executed.
pub fn ping_command_validated(host: &str) -> Guarded {
    if !security::is_valid_host(Some(host)) {
        debug!(flow = "ping_command_validated", "invalid host");
        return Err(Rejection::InvalidHost);
    }
    if !security::is_safe_command_input(Some(host)) {
        debug!(flow = "ping_command_validated", "metacharacters");
        return Err(Rejection::UnsafeCommand);
    }
    Ok(format!("ping -c 3 {}", host))
}

// ========== LDAP ==========

pub fn ldap_filter_validated(username: &str) -> Guarded {
    if !security::is_safe_ldap_input(Some(username)) {
        debug!(flow = "ldap_filter_validated", "rejected");
        return Err(Rejection::UnsafeLdap);
    }
    Ok(uid_filter(username))
}

pub fn ldap_filter_sanitized(username: &str) -> String {
    uid_filter(&sanitized(security::sanitize_ldap_input, username))
}

// ========== Email / URL ==========

pub fn accept_email(email: &str) -> Guarded {
    if security::is_valid_email(Some(email)) {
        Ok(email.to_string())
    } else {
        Err(Rejection::InvalidEmail)
    }
}

pub fn accept_url(url: &str) -> Guarded {
    if security::is_safe_url(Some(url)) {
        Ok(url.to_string())
    } else {
        Err(Rejection::UnsafeUrl)
    }
}
