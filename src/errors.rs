//! # Bot Error Types Module
//!
//! This module defines the error type shared by the catalog, scraper, document loader and
//! configuration code. Most of these errors never reach the user: each component boundary
//! decides how to degrade.

/// Custom error types for bot operations
#[derive(Debug, Clone)]
pub enum BotError {
    /// Invalid or missing configuration value
    Config(String),
    /// Transport-level HTTP failure
    Http(String),
    /// Non-success HTTP status
    Status(u16),
    /// Markup or selector errors
    Parse(String),
    /// Document read/download errors
    Document(String),
    /// Schedule catalog construction errors
    Catalog(String),
    /// Operation exceeded its time budget
    Timeout(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BotError::Http(msg) => write!(f, "HTTP error: {msg}"),
            BotError::Status(code) => write!(f, "Unexpected HTTP status: {code}"),
            BotError::Parse(msg) => write!(f, "Parse error: {msg}"),
            BotError::Document(msg) => write!(f, "Document error: {msg}"),
            BotError::Catalog(msg) => write!(f, "Catalog error: {msg}"),
            BotError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return BotError::Timeout(err.to_string());
        }
        match err.status() {
            Some(status) => BotError::Status(status.as_u16()),
            None => BotError::Http(err.to_string()),
        }
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Document(err.to_string())
    }
}
