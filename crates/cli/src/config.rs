use std::path::PathBuf;

/// Default directory holding the frame list and the login session.
pub const DEFAULT_DATA_DIR: &str = ".storyboard";

/// Default login name when `STORYBOARD_USERNAME` is unset.
pub const DEFAULT_USERNAME: &str = "storyboard";

/// Log filter used when `RUST_LOG` is unset. Covers the binary's own target
/// so command failures reported from `main` are shown.
pub const DEFAULT_LOG_FILTER: &str = "storyboard=info,storyboard_cli=info,storyboard_core=info";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be one of {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use. Login stays disabled
/// until a password hash is configured.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory for the key-value store (default: `./.storyboard`).
    pub data_dir: PathBuf,
    /// The single account allowed to log in (default: `storyboard`).
    pub username: String,
    /// Argon2id PHC hash of that account's password. `None` disables login.
    pub password_hash: Option<String>,
    /// Seed an unwritten store with sample frames (default: `true`).
    pub seed_on_empty: bool,
    /// Tracing output format (default: text).
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default        |
    /// |----------------------------|----------------|
    /// | `STORYBOARD_DATA_DIR`      | `.storyboard`  |
    /// | `STORYBOARD_USERNAME`      | `storyboard`   |
    /// | `STORYBOARD_PASSWORD_HASH` | unset          |
    /// | `STORYBOARD_SEED_ON_EMPTY` | `true`         |
    /// | `STORYBOARD_LOG_FORMAT`    | `text`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = non_empty("STORYBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let username =
            non_empty("STORYBOARD_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let password_hash = non_empty("STORYBOARD_PASSWORD_HASH");

        let seed_on_empty = match non_empty("STORYBOARD_SEED_ON_EMPTY") {
            None => true,
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                var: "STORYBOARD_SEED_ON_EMPTY",
                expected: "true/false",
                value: v,
            })?,
        };

        let log_format = match non_empty("STORYBOARD_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "STORYBOARD_LOG_FORMAT",
                    expected: "text/json",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            data_dir,
            username,
            password_hash,
            seed_on_empty,
            log_format,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert!(config.password_hash.is_none());
        assert!(config.seed_on_empty);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = config_from(&[
            ("STORYBOARD_DATA_DIR", "/var/lib/storyboard"),
            ("STORYBOARD_USERNAME", " director "),
            ("STORYBOARD_PASSWORD_HASH", "$argon2id$v=19$stub"),
            ("STORYBOARD_SEED_ON_EMPTY", "off"),
            ("STORYBOARD_LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/storyboard"));
        assert_eq!(config.username, "director");
        assert_eq!(config.password_hash.as_deref(), Some("$argon2id$v=19$stub"));
        assert!(!config.seed_on_empty);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_password_hash_means_unset() {
        let config = config_from(&[("STORYBOARD_PASSWORD_HASH", "  ")]).unwrap();
        assert!(config.password_hash.is_none());
    }

    #[test]
    fn invalid_seed_flag_is_rejected() {
        let err = config_from(&[("STORYBOARD_SEED_ON_EMPTY", "maybe")]).unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { var: "STORYBOARD_SEED_ON_EMPTY", .. });
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert_matches!(
            config_from(&[("STORYBOARD_LOG_FORMAT", "xml")]),
            Err(ConfigError::InvalidValue { var: "STORYBOARD_LOG_FORMAT", .. })
        );
    }

    #[test]
    fn default_log_filter_covers_binary_target() {
        let directives: Vec<&str> = DEFAULT_LOG_FILTER.split(',').collect();
        assert!(directives.contains(&"storyboard=info"));
        assert!(directives.contains(&"storyboard_core=info"));
    }
}
