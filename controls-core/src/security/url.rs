//! URL scheme allow-list

const ALLOWED_SCHEMES: &[&str] = &["http://", "https://"];

/// Accept only `http://` and `https://` URLs, scheme case-insensitive.
/// Nothing after the scheme is inspected. Absent or empty input is rejected.
pub fn is_safe_url(url: Option<&str>) -> bool {
    match url {
        None | Some("") => false,
        Some(value) => {
            let lower = value.to_lowercase();
            ALLOWED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        }
    }
}
