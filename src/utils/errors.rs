//! Error types for the catalog core.

use thiserror::Error;

/// Failure of a single outbound provider call.
///
/// Recovered by the aggregator (fallback or empty result), never surfaced to callers.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connect or read timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Provider answered with a non-2xx status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// Connection, TLS or body transfer failure.
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    /// 2xx response whose body is not JSON.
    #[error("response body is not JSON: {0}")]
    Decode(String),

    /// Request kind the provider does not serve.
    #[error("{0} is not supported by this provider")]
    Unsupported(&'static str),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Request(e)
        }
    }
}

/// A provider item whose shape cannot be read as a record at all.
#[derive(Debug, Error)]
#[error("malformed {provider} item: {reason}")]
pub struct MalformedItemError {
    pub provider: &'static str,
    pub reason: String,
}

/// Local store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider-sourced tracks are ephemeral and must not be persisted.
    #[error("refusing to persist provider-sourced track {0}")]
    ProviderSourced(i64),

    /// Blocking store task panicked or was cancelled.
    #[error("local store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Invalid runtime configuration value.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}
