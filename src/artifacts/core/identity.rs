//! Commit author identity
//!
//! The name and email come from `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL` when
//! set, otherwise from the `user` settings of the first git config file found
//! in the home directory (`~/.gitconfig`, then `~/.config/git/config`). A
//! missing name becomes `local user`; a missing email stays empty.
//!
//! The timestamp comes from `GIT_AUTHOR_DATE` (RFC 2822 or
//! `%Y-%m-%d %H:%M:%S %z`) or the local clock.

use crate::artifacts::objects::commit::Author;
use chrono::{DateTime, FixedOffset, Local};
use std::path::{Path, PathBuf};

/// Name used when no identity is configured anywhere
pub const DEFAULT_AUTHOR_NAME: &str = "local user";

const NAME_REGEX: &str = r"(?m)^\s*name\s*=\s*(.+)$";
const EMAIL_REGEX: &str = r"(?m)^\s*email\s*=\s*(.+)$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Resolve the identity of the current user
    pub fn load() -> Self {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::resolve(|key| std::env::var(key).ok(), home.as_deref())
    }

    /// Resolve from an environment lookup and a home directory
    pub fn resolve(env: impl Fn(&str) -> Option<String>, home: Option<&Path>) -> Self {
        let env_name = env("GIT_AUTHOR_NAME").filter(|name| !name.trim().is_empty());
        let env_email = env("GIT_AUTHOR_EMAIL").filter(|email| !email.trim().is_empty());

        let (config_name, config_email) = match (&env_name, &env_email) {
            (Some(_), Some(_)) => (None, None),
            _ => home.map(Self::read_git_config).unwrap_or_default(),
        };

        let name = env_name
            .or(config_name)
            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string());
        let email = env_email.or(config_email).unwrap_or_default();

        Identity { name, email }
    }

    fn read_git_config(home: &Path) -> (Option<String>, Option<String>) {
        let locations = [
            home.join(".gitconfig"),
            home.join(".config").join("git").join("config"),
        ];

        let Some(content) = locations.iter().find_map(|path| match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable git config");
                }
                None
            }
        }) else {
            return (None, None);
        };

        (
            Self::config_value(NAME_REGEX, &content),
            Self::config_value(EMAIL_REGEX, &content),
        )
    }

    fn config_value(pattern: &str, content: &str) -> Option<String> {
        let regex = regex::Regex::new(pattern).ok()?;
        regex
            .captures(content)
            .map(|value| value[1].trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Author record stamped with `timestamp`
    pub fn author(&self, timestamp: DateTime<FixedOffset>) -> Author {
        Author::new(self.name.clone(), self.email.clone(), timestamp)
    }
}

/// Commit timestamp: `GIT_AUTHOR_DATE` when parsable, else now
pub fn commit_timestamp() -> DateTime<FixedOffset> {
    std::env::var("GIT_AUTHOR_DATE")
        .ok()
        .and_then(|date| parse_date(&date))
        .unwrap_or_else(|| Local::now().fixed_offset())
}

fn parse_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    #[fixture]
    fn home() -> TempDir {
        TempDir::new().unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn environment_wins(home: TempDir) {
        home.child(".gitconfig")
            .write_str("[user]\n\tname = Config Name\n\temail = config@example.com\n")
            .unwrap();

        let identity = Identity::resolve(
            env(&[("GIT_AUTHOR_NAME", "Env Name"), ("GIT_AUTHOR_EMAIL", "env@example.com")]),
            Some(home.path()),
        );

        assert_eq!(identity.name, "Env Name");
        assert_eq!(identity.email, "env@example.com");
    }

    #[rstest]
    fn gitconfig_fills_missing_values(home: TempDir) {
        home.child(".gitconfig")
            .write_str("[core]\n\tbare = false\n[user]\n\tname = Config Name\n\temail = config@example.com\n")
            .unwrap();

        let identity = Identity::resolve(env(&[("GIT_AUTHOR_NAME", "Env Name")]), Some(home.path()));

        assert_eq!(identity.name, "Env Name");
        assert_eq!(identity.email, "config@example.com");
    }

    #[rstest]
    fn xdg_config_is_the_fallback(home: TempDir) {
        home.child(".config/git/config")
            .write_str("[user]\n    name = Xdg User\n    email = xdg@example.com\n")
            .unwrap();

        let identity = Identity::resolve(env(&[]), Some(home.path()));

        assert_eq!(
            identity,
            Identity {
                name: "Xdg User".to_string(),
                email: "xdg@example.com".to_string(),
            }
        );
    }

    #[rstest]
    fn nothing_configured_is_local_user(home: TempDir) {
        let identity = Identity::resolve(env(&[]), Some(home.path()));

        assert_eq!(identity.name, DEFAULT_AUTHOR_NAME);
        assert_eq!(identity.email, "");
    }

    #[rstest]
    #[case("Sun, 01 Jan 2023 12:00:00 +0000", 1672574400)]
    #[case("2023-01-01 13:00:00 +0100", 1672574400)]
    fn author_dates_parse(#[case] date: &str, #[case] epoch: i64) {
        assert_eq!(parse_date(date).unwrap().timestamp(), epoch);
    }

    #[test]
    fn garbage_dates_are_ignored() {
        assert_eq!(parse_date("last tuesday"), None);
    }
}
