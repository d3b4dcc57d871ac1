//! Runtime configuration resolved from the environment.
//!
//! | Variable             | Default                      |
//! |----------------------|------------------------------|
//! | `NOTEKEEP_NAMESPACE` | `secure-notes-app`           |
//! | `NOTEKEEP_DB_PATH`   | `<tmp>/notekeep.sqlite3`     |
//! | `NOTEKEEP_LOG_LEVEL` | `debug` / `info` by build    |
//! | `NOTEKEEP_LOG_DIR`   | unset: file logging disabled |
//!
//! Blank values count as unset.

use crate::logging::default_log_level;
use crate::storage::DEFAULT_NAMESPACE;
use std::path::PathBuf;

pub const ENV_NAMESPACE: &str = "NOTEKEEP_NAMESPACE";
pub const ENV_DB_PATH: &str = "NOTEKEEP_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTEKEEP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEKEEP_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "notekeep.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix for every storage key.
    pub namespace: String,
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            namespace: read(ENV_NAMESPACE).unwrap_or(defaults.namespace),
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_NAMESPACE};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.namespace, "secure-notes-app");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn values_are_trimmed_and_blank_values_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_NAMESPACE, "  team-notes "),
            (ENV_DB_PATH, "   "),
            (ENV_LOG_DIR, "/var/log/notekeep"),
        ]));
        assert_eq!(config.namespace, "team-notes");
        assert_eq!(config.db_path, AppConfig::default().db_path);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/notekeep")));
    }
}
