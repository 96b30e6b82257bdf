//! OS command injection controls

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Hostname, or four dot-separated groups of 1-3 digits. Octets are not
    /// range-checked, so `999.999.999.999` passes.
    static ref HOST_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9.-]{0,61}[a-zA-Z0-9]$|^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$"
    ).expect("Failed to compile host regex");

    static ref SHELL_METACHAR_REGEX: Regex =
        Regex::new(r"[;|&$`\n()<>\\!]").expect("Failed to compile shell metacharacter regex");
}

const SHELL_METACHARS: &[char] = &[';', '|', '&', '$', '`', '\n', '(', ')', '<', '>', '\\', '!'];

/// Reject shell metacharacters. Absent or empty input is considered safe.
pub fn is_safe_command_input(input: Option<&str>) -> bool {
    match input {
        None | Some("") => true,
        Some(value) => !value.contains(SHELL_METACHARS),
    }
}

/// Hostname or dotted-quad check. Absent or empty input is rejected.
pub fn is_valid_host(host: Option<&str>) -> bool {
    match host {
        None | Some("") => false,
        Some(value) => HOST_REGEX.is_match(value),
    }
}

/// Remove every shell metacharacter, then trim the ends.
///
/// Trimming drops ASCII control characters and spaces only; other Unicode
/// whitespace is kept.
pub fn sanitize_command_input(input: Option<&str>) -> Option<String> {
    input.map(|value| {
        SHELL_METACHAR_REGEX
            .replace_all(value, "")
            .trim_matches(|c: char| c <= ' ')
            .to_string()
    })
}
