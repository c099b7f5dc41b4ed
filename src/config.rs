//! # Bot Configuration Module
//!
//! This module defines the startup configuration: bot token, news listing source,
//! schedule document source and logging settings. Values come from the process
//! environment (populated from `.env` by `main`) or from any key lookup function.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::BotError;

// Constants for bot configuration
pub const DEFAULT_NEWS_URL: &str = "https://kemsu.ru/news/";
pub const DEFAULT_SCHEDULE_BASE_URL: &str = "https://kemsu.ru/upload/education/schedule/ic/";
pub const DEFAULT_SCHEDULE_DIR: &str = "schedules";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_NEWS_LIMIT: usize = 5;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where schedule PDFs are taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSourceConfig {
    /// Download from the university site, relative to `base_url`
    Remote { base_url: Url },
    /// Read bundled files under `dir`
    Local { dir: PathBuf },
}

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration passed to [`crate::logging::init_logging`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory for the rolling `bot.log`; `None` disables file output
    pub log_dir: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set
    pub default_level: String,
    /// Console output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
            default_level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Configuration structure for the bot process
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot access token
    pub telegram_token: String,
    /// News listing page
    pub news_url: Url,
    /// Timeout for scraping and document downloads
    pub request_timeout: Duration,
    /// Number of items shown by the news button
    pub news_limit: usize,
    /// Schedule document source
    pub documents: DocumentSourceConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &mask_token(&self.telegram_token))
            .field("news_url", &self.news_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("news_limit", &self.news_limit)
            .field("documents", &self.documents)
            .field("logging", &self.logging)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let telegram_token = get("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| BotError::Config("TELEGRAM_BOT_TOKEN must be set".to_string()))?;

        let news_url = parse_url(
            "NEWS_URL",
            &get("NEWS_URL").unwrap_or_else(|| DEFAULT_NEWS_URL.to_string()),
        )?;

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("REQUEST_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(BotError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let news_limit = match get("NEWS_LIMIT") {
            Some(raw) => parse_number::<usize>("NEWS_LIMIT", &raw)?,
            None => DEFAULT_NEWS_LIMIT,
        };

        let documents = match get("SCHEDULE_SOURCE").as_deref() {
            None | Some("local") => DocumentSourceConfig::Local {
                dir: PathBuf::from(
                    get("SCHEDULE_DIR").unwrap_or_else(|| DEFAULT_SCHEDULE_DIR.to_string()),
                ),
            },
            Some("remote") => DocumentSourceConfig::Remote {
                base_url: parse_url(
                    "SCHEDULE_BASE_URL",
                    &get("SCHEDULE_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_SCHEDULE_BASE_URL.to_string()),
                )?,
            },
            Some(other) => {
                return Err(BotError::Config(format!(
                    "SCHEDULE_SOURCE must be `local` or `remote`, got `{other}`"
                )))
            }
        };

        // An explicitly empty LOG_DIR turns file logging off
        let log_dir = match lookup("LOG_DIR") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw.trim())),
            None => Some(PathBuf::from(DEFAULT_LOG_DIR)),
        };

        let format = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(BotError::Config(format!(
                    "LOG_FORMAT must be `text` or `json`, got `{other}`"
                )))
            }
        };

        Ok(Self {
            telegram_token,
            news_url,
            request_timeout: Duration::from_secs(timeout_secs),
            news_limit,
            documents,
            logging: LoggingConfig {
                log_dir,
                default_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                format,
            },
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, BotError> {
    Url::parse(raw).map_err(|e| BotError::Config(format!("{key} is not a valid URL: {e}")))
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, BotError> {
    raw.parse::<T>()
        .map_err(|_| BotError::Config(format!("{key} must be a non-negative integer, got `{raw}`")))
}

/// Hide all but the last four characters of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_token_only() {
        let config = BotConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]))
            .unwrap();

        assert_eq!(config.news_url.as_str(), DEFAULT_NEWS_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.news_limit, 5);
        assert_eq!(
            config.documents,
            DocumentSourceConfig::Local {
                dir: PathBuf::from("schedules")
            }
        );
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let result = BotConfig::from_lookup(lookup_from(&[("NEWS_LIMIT", "3")]));
        assert!(matches!(result, Err(BotError::Config(_))));

        let result = BotConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "  ")]));
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_remote_source() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("SCHEDULE_SOURCE", "remote"),
            ("SCHEDULE_BASE_URL", "https://example.org/pdf/"),
        ]))
        .unwrap();

        match config.documents {
            DocumentSourceConfig::Remote { base_url } => {
                assert_eq!(base_url.as_str(), "https://example.org/pdf/")
            }
            other => panic!("Unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("REQUEST_TIMEOUT_SECS", "soon"),
            ("REQUEST_TIMEOUT_SECS", "0"),
            ("NEWS_LIMIT", "-1"),
            ("NEWS_URL", "not a url"),
            ("SCHEDULE_SOURCE", "ftp"),
            ("LOG_FORMAT", "xml"),
        ] {
            let result =
                BotConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "t"), (key, value)]));
            assert!(
                matches!(result, Err(BotError::Config(_))),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_log_dir_disables_file_logging() {
        let config =
            BotConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "t"), ("LOG_DIR", "")]))
                .unwrap();
        assert_eq!(config.logging.log_dir, None);
    }

    #[test]
    fn test_debug_masks_token() {
        let config = BotConfig::from_lookup(lookup_from(&[(
            "TELEGRAM_BOT_TOKEN",
            "123456:SECRET-TOKEN-wxyz",
        )]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("****wxyz"));
        assert_eq!(mask_token("abc"), "****");
    }
}
