use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ControlsError, Result};

use super::flows::{self, Guarded};

/// Named remediation flow, addressable from the CLI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    SqlValidated,
    SqlSanitized,
    SqlCombined,
    XssValidated,
    XssSanitized,
    XssStripped,
    CommandValidated,
    LdapValidated,
    LdapSanitized,
    EmailValidated,
    UrlValidated,
}

impl Scenario {
    pub const ALL: [Scenario; 11] = [
        Scenario::SqlValidated,
        Scenario::SqlSanitized,
        Scenario::SqlCombined,
        Scenario::XssValidated,
        Scenario::XssSanitized,
        Scenario::XssStripped,
        Scenario::CommandValidated,
        Scenario::LdapValidated,
        Scenario::LdapSanitized,
        Scenario::EmailValidated,
        Scenario::UrlValidated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::SqlValidated => "sql-validated",
            Scenario::SqlSanitized => "sql-sanitized",
            Scenario::SqlCombined => "sql-combined",
            Scenario::XssValidated => "xss-validated",
            Scenario::XssSanitized => "xss-sanitized",
            Scenario::XssStripped => "xss-stripped",
            Scenario::CommandValidated => "command-validated",
            Scenario::LdapValidated => "ldap-validated",
            Scenario::LdapSanitized => "ldap-sanitized",
            Scenario::EmailValidated => "email-validated",
            Scenario::UrlValidated => "url-validated",
        }
    }

    /// Names of the values the flow takes, in order.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            Scenario::SqlValidated | Scenario::SqlSanitized | Scenario::SqlCombined => {
                &["username", "password"]
            }
            Scenario::XssValidated | Scenario::XssSanitized | Scenario::XssStripped => &["comment"],
            Scenario::CommandValidated => &["host"],
            Scenario::LdapValidated | Scenario::LdapSanitized => &["username"],
            Scenario::EmailValidated => &["email"],
            Scenario::UrlValidated => &["url"],
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters().len()
    }

    /// Run the flow. The outer error is a wrong argument count; the inner
    /// result is the flow's own verdict.
    pub fn run(&self, args: &[&str]) -> Result<Guarded> {
        if args.len() != self.arity() {
            return Err(ControlsError::Arity {
                scenario: self.as_str().to_string(),
                expected: self.arity(),
                actual: args.len(),
            });
        }

        let guarded = match (self, args) {
            (Scenario::SqlValidated, [username, password]) => flows::sql_login_validated(username, password),
            (Scenario::SqlSanitized, [username, password]) => Ok(flows::sql_login_sanitized(username, password)),
            (Scenario::SqlCombined, [username, password]) => flows::sql_login_combined(username, password),
            (Scenario::XssValidated, [comment]) => flows::comment_validated(comment),
            (Scenario::XssSanitized, [comment]) => Ok(flows::comment_sanitized(comment)),
            (Scenario::XssStripped, [comment]) => Ok(flows::comment_stripped(comment)),
            (Scenario::CommandValidated, [host]) => flows::ping_command_validated(host),
            (Scenario::LdapValidated, [username]) => flows::ldap_filter_validated(username),
            (Scenario::LdapSanitized, [username]) => Ok(flows::ldap_filter_sanitized(username)),
            (Scenario::EmailValidated, [email]) => flows::accept_email(email),
            (Scenario::UrlValidated, [url]) => flows::accept_url(url),
            _ => {
                return Err(ControlsError::Arity {
                    scenario: self.as_str().to_string(),
                    expected: self.arity(),
                    actual: args.len(),
                })
            }
        };

        Ok(guarded)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ControlsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.as_str() == normalized)
            .ok_or_else(|| ControlsError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remediation::Rejection;

    #[test]
    fn test_from_str_round_trips_every_name() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.as_str().parse::<Scenario>().unwrap(), scenario);
        }
        assert_eq!("SQL_COMBINED".parse::<Scenario>().unwrap(), Scenario::SqlCombined);
        assert!(matches!(
            "deserialize-validated".parse::<Scenario>(),
            Err(ControlsError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_run_checks_arity() {
        let err = Scenario::SqlValidated.run(&["only-one"]).unwrap_err();
        match err {
            ControlsError::Arity { expected, actual, .. } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(Scenario::UrlValidated.run(&[]).is_err());
    }

    #[test]
    fn test_run_dispatches() {
        assert_eq!(
            Scenario::LdapSanitized.run(&["*"]).unwrap().unwrap(),
            "(&(uid=\\2a)(objectClass=person))"
        );
        assert_eq!(
            Scenario::CommandValidated.run(&["host|cmd"]).unwrap(),
            Err(Rejection::InvalidHost)
        );
        assert!(Scenario::SqlCombined.run(&["john_doe", "pw"]).unwrap().is_ok());
    }
}
