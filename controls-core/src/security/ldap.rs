//! LDAP injection controls

use super::{replace_in_order, Replacement};

const LDAP_METACHARS: &[char] = &['*', '(', ')', '\\', '/', '\0'];

/// RFC 4515 hex escapes. Backslash goes first so the escapes added for the
/// other characters are not escaped again.
const LDAP_ESCAPES: &[Replacement] = &[
    ("\\", "\\5c"),
    ("*", "\\2a"),
    ("(", "\\28"),
    (")", "\\29"),
    ("\0", "\\00"),
];

/// Reject filter metacharacters. Absent or empty input is considered safe.
pub fn is_safe_ldap_input(input: Option<&str>) -> bool {
    match input {
        None | Some("") => true,
        Some(value) => !value.contains(LDAP_METACHARS),
    }
}

/// Escape `\ * ( ) NUL` for use inside a search filter. `/` is rejected by
/// [`is_safe_ldap_input`] but passes through here unchanged.
pub fn sanitize_ldap_input(input: Option<&str>) -> Option<String> {
    input.map(|value| replace_in_order(value, LDAP_ESCAPES))
}
