//! SQL injection controls

use lazy_static::lazy_static;
use regex::Regex;

use super::{replace_in_order, Replacement};

lazy_static! {
    static ref SAFE_SQL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9_@.\-]+$").expect("Failed to compile SQL input regex");

    /// 3-20 characters, alphanumeric and underscore
    static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("Failed to compile username regex");
}

/// Escapes run first so the removals below see doubled quotes, not single ones.
const SQL_REPLACEMENTS: &[Replacement] = &[
    ("'", "''"),
    ("\"", "\"\""),
    ("\\", "\\\\"),
    (";", ""),
    ("--", ""),
    ("/*", ""),
    ("*/", ""),
    ("xp_", ""),
    ("sp_", ""),
];

/// Check that input only holds characters that cannot break out of a
/// quoted SQL literal: ASCII letters, digits, `_`, `-`, `.` and `@`.
///
/// Absent or empty input is considered safe.
pub fn is_safe_sql_input(input: Option<&str>) -> bool {
    match input {
        None | Some("") => true,
        Some(value) => SAFE_SQL_REGEX.is_match(value),
    }
}

/// Stricter username check. Absent or empty input is rejected.
pub fn is_safe_username(username: Option<&str>) -> bool {
    match username {
        None | Some("") => false,
        Some(value) => USERNAME_REGEX.is_match(value),
    }
}

/// True when the input is a 64-bit signed integer: an optional `+` or `-`
/// followed by ASCII digits. Non-ASCII decimal digits such as `١٢٣` are
/// rejected, unlike parsers that accept any Unicode `Nd` digit.
pub fn is_numeric(input: Option<&str>) -> bool {
    match input {
        None | Some("") => false,
        Some(value) => value.parse::<i64>().is_ok(),
    }
}

/// Escape quotes and backslashes, then drop statement separators, comment
/// markers and stored procedure prefixes.
///
/// Each rule runs once over the whole string. Removing a token can join its
/// neighbours into a new one (`-xp_-` becomes `--`), which is not re-scanned.
pub fn sanitize_sql_input(input: Option<&str>) -> Option<String> {
    input.map(|value| replace_in_order(value, SQL_REPLACEMENTS))
}
