//! Path traversal controls

use super::{replace_in_order, Replacement};

const TRAVERSAL_MARKERS: &[&str] = &["..", "./", "~"];

const TRAVERSAL_REMOVALS: &[Replacement] = &[("..", ""), ("./", ""), ("~", "")];

/// Relative path with no traversal sequences. Absent or empty input is
/// rejected.
pub fn is_safe_path(path: Option<&str>) -> bool {
    match path {
        None | Some("") => false,
        Some(value) => {
            !TRAVERSAL_MARKERS.iter().any(|marker| value.contains(marker)) && !value.starts_with('/')
        }
    }
}

/// Strip `..`, `./` and `~`, then any leading slashes.
///
/// This is a text filter, not a path resolver. Removals are single-pass, so
/// a later removal can rebuild an earlier token: `.~.` comes out as `..`.
pub fn sanitize_path(path: Option<&str>) -> Option<String> {
    path.map(|value| {
        replace_in_order(value, TRAVERSAL_REMOVALS)
            .trim_start_matches('/')
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_safe_path_safe() {
        assert!(is_safe_path(Some("file.txt")));
        assert!(is_safe_path(Some("folder/file.txt")));
        assert!(is_safe_path(Some("docs/report.pdf")));
        assert!(is_safe_path(Some("a.b/c")));
    }

    #[test]
    fn test_is_safe_path_dangerous() {
        assert!(!is_safe_path(Some("../etc/passwd")));
        assert!(!is_safe_path(Some("./config")));
        assert!(!is_safe_path(Some("/etc/passwd")));
        assert!(!is_safe_path(Some("~/secrets")));
        assert!(!is_safe_path(Some("docs/../../etc")));
        assert!(!is_safe_path(Some("")));
        assert!(!is_safe_path(None));
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path(Some("../etc/passwd")).as_deref(), Some("etc/passwd"));
        assert_eq!(sanitize_path(Some("./config")).as_deref(), Some("config"));
        assert_eq!(sanitize_path(Some("../../../file.txt")).as_deref(), Some("file.txt"));
        assert_eq!(sanitize_path(Some("///etc/passwd")).as_deref(), Some("etc/passwd"));
        assert_eq!(sanitize_path(Some("~/notes")).as_deref(), Some("notes"));
        assert_eq!(sanitize_path(Some("docs/report.pdf")).as_deref(), Some("docs/report.pdf"));
        assert_eq!(sanitize_path(Some("")).as_deref(), Some(""));
        assert_eq!(sanitize_path(None), None);
    }

    #[test]
    fn test_sanitize_path_is_single_pass() {
        assert_eq!(sanitize_path(Some(".../x")).as_deref(), Some("x"));
        assert_eq!(sanitize_path(Some("x/.~.")).as_deref(), Some("x/.."));
        assert_eq!(sanitize_path(Some("~/../x")).as_deref(), Some("x"));
    }
}
