use std::path::PathBuf;

use chrono::Duration;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::archive::ArchiveLimits,
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_ARCHIVE_DIR: &str = "./data/archives";
const DEFAULT_ARCHIVE_TTL_HOURS: i64 = 24;
// Ten years
const MAX_ARCHIVE_TTL_HOURS: i64 = 10 * 365 * 24;
const DEFAULT_MAX_ARCHIVE_ENTRIES: usize = 100;
const DEFAULT_MAX_ENTRY_BYTES: u64 = 25 * 1024 * 1024;
const DEFAULT_MAX_TOTAL_BYTES: u64 = 100 * 1024 * 1024;
// Discord's upload limit for bots in guilds without boosts
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    /// Public base URL used for download links, without trailing slash.
    pub app_url: String,
    pub bind_address: String,

    pub archive_dir: PathBuf,
    pub archive_ttl: Duration,
    pub max_archive_entries: usize,
    pub max_entry_bytes: u64,
    pub max_total_bytes: u64,
    /// Largest file the bot will upload back to a channel.
    pub max_upload_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_source(|key| std::env::var(key).ok())?)
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value for an environment variable name, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and all numbers parsed
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvVar)` - A numeric variable failed to parse, or the
    ///   archive TTL is not between one hour and ten years
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let ttl_hours: i64 = parse_or(&lookup, "ARCHIVE_TTL_HOURS", DEFAULT_ARCHIVE_TTL_HOURS)?;
        let archive_ttl = Some(ttl_hours)
            .filter(|hours| (1..=MAX_ARCHIVE_TTL_HOURS).contains(hours))
            .and_then(Duration::try_hours)
            .ok_or_else(|| ConfigError::InvalidEnvVar {
                name: "ARCHIVE_TTL_HOURS".to_string(),
                value: ttl_hours.to_string(),
            })?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            app_url: required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            archive_dir: PathBuf::from(
                lookup("ARCHIVE_DIR").unwrap_or_else(|| DEFAULT_ARCHIVE_DIR.to_string()),
            ),
            archive_ttl,
            max_archive_entries: parse_or(&lookup, "MAX_ARCHIVE_ENTRIES", DEFAULT_MAX_ARCHIVE_ENTRIES)?,
            max_entry_bytes: parse_or(&lookup, "MAX_ENTRY_BYTES", DEFAULT_MAX_ENTRY_BYTES)?,
            max_total_bytes: parse_or(&lookup, "MAX_TOTAL_BYTES", DEFAULT_MAX_TOTAL_BYTES)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    /// Limits applied when packing or unpacking archives.
    pub fn limits(&self) -> ArchiveLimits {
        ArchiveLimits {
            max_entries: self.max_archive_entries,
            max_entry_bytes: self.max_entry_bytes,
            max_total_bytes: self.max_total_bytes,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite://archivist.db?mode=rwc"),
        ("DISCORD_BOT_TOKEN", "token"),
        ("APP_URL", "https://archivist.example/"),
    ];

    /// Expected: defaults applied and trailing slash stripped from the app url
    #[test]
    fn applies_defaults() {
        let config = Config::from_source(source(&REQUIRED)).unwrap();

        assert_eq!(config.app_url, "https://archivist.example");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.archive_dir, PathBuf::from(DEFAULT_ARCHIVE_DIR));
        assert_eq!(config.archive_ttl, Duration::hours(24));
        assert_eq!(config.max_archive_entries, 100);
        assert_eq!(config.max_upload_bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn reads_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ARCHIVE_TTL_HOURS", "2"));
        pairs.push(("MAX_ARCHIVE_ENTRIES", "5"));
        pairs.push(("ARCHIVE_DIR", "/tmp/archives"));

        let config = Config::from_source(source(&pairs)).unwrap();

        assert_eq!(config.archive_ttl, Duration::hours(2));
        assert_eq!(config.limits().max_entries, 5);
        assert_eq!(config.archive_dir, PathBuf::from("/tmp/archives"));
    }

    /// Expected: Err naming the missing variable
    #[test]
    fn fails_on_missing_required_var() {
        let result = Config::from_source(source(&REQUIRED[..2]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar("APP_URL".to_string())
        );
    }

    #[test]
    fn fails_on_non_numeric_limit() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_ENTRY_BYTES", "lots"));

        let result = Config::from_source(source(&pairs));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar {
                name: "MAX_ENTRY_BYTES".to_string(),
                value: "lots".to_string(),
            }
        );
    }

    /// Expected: Err for zero, negative and overflowing hour counts
    #[test]
    fn rejects_out_of_range_ttl() {
        for hours in ["0", "-5", "87601", "9223372036854775807"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("ARCHIVE_TTL_HOURS", hours));

            let result = Config::from_source(source(&pairs));

            assert_eq!(
                result.unwrap_err(),
                ConfigError::InvalidEnvVar {
                    name: "ARCHIVE_TTL_HOURS".to_string(),
                    value: hours.to_string(),
                }
            );
        }
    }

    #[test]
    fn accepts_longest_ttl() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ARCHIVE_TTL_HOURS", "87600"));

        let config = Config::from_source(source(&pairs)).unwrap();

        assert_eq!(config.archive_ttl, Duration::hours(87600));
    }
}
