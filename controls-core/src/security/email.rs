//! Email address format check

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).expect("Failed to compile email regex");
}

/// Validate `local-part@domain.tld` shape. Format only, not deliverability.
/// Absent or empty input is rejected.
pub fn is_valid_email(email: Option<&str>) -> bool {
    match email {
        None | Some("") => false,
        Some(value) => EMAIL_REGEX.is_match(value),
    }
}
