//! Error types for the approval gate.
//!
//! Covers the full lifecycle: configuration and credential problems at
//! startup, Slack Web API failures, Socket Mode transport errors, and
//! malformed payloads received over the wire.

use thiserror::Error;

/// Errors that can occur while running the approval gate.
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration error (missing or invalid config).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error (invalid token, expired, etc.).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Channel not found or bot not in channel.
    #[error("Channel error: {0}")]
    Channel(String),

    /// API request failed.
    #[error("Slack API error: {0}")]
    Api(String),

    /// API rate limited.
    #[error("Rate limited: retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// Operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// WebSocket connection error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Caller-supplied Block Kit input did not parse.
    #[error("Invalid blocks input: {0}")]
    InvalidBlocks(String),

    /// Invalid payload received from Slack.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Map a Slack API error code (the `error` field of an `ok: false`
    /// response) to the matching variant.
    pub fn from_api_code(code: &str) -> Self {
        match code {
            "invalid_auth" | "account_inactive" | "token_revoked" | "not_authed" => {
                GateError::Auth(code.to_string())
            }
            "channel_not_found" | "not_in_channel" | "is_archived" => {
                GateError::Channel(code.to_string())
            }
            "rate_limited" | "ratelimited" => GateError::RateLimited {
                retry_after_secs: 30,
            },
            _ => GateError::Api(code.to_string()),
        }
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GateError::Timeout(err.to_string())
        } else if err.is_connect() {
            GateError::Network(format!("Connection failed: {}", err))
        } else {
            GateError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::Json(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for GateError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        GateError::WebSocket(err.to_string())
    }
}

impl From<std::env::VarError> for GateError {
    fn from(err: std::env::VarError) -> Self {
        GateError::Config(format!("Environment variable error: {}", err))
    }
}

/// Result type for gate operations.
pub type GateResult<T> = std::result::Result<T, GateError>;
