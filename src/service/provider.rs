use std::fmt;

use async_trait::async_trait;

use super::types::{Answer, HealthStatus};

/// Errors that can occur while talking to the answer service.
/// The widget maps every variant to the same user-facing fallback; the
/// variants exist for the log.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Service misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service returned a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the expected JSON.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Returns the name of the service (for logs and the status line).
    fn name(&self) -> &str;

    /// Sends one question and waits for the full answer.
    async fn ask(&self, question: &str) -> Result<Answer, ServiceError>;

    /// Probes the service's health endpoint.
    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}
