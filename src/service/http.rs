//! HTTP answer service.
//!
//! One `POST {base_url}/query` per question, no streaming. The body is read
//! as text and decoded separately so a malformed payload surfaces as
//! `ServiceError::Parse` rather than a transport error.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::provider::{AnswerService, ServiceError};
use super::types::{Answer, HealthStatus, QueryRequest};

pub struct HttpAnswerService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnswerService {
    /// Builds a service for `base_url`. `timeout` configures the transport's
    /// own request timeout; `None` keeps reqwest's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ServiceError::Config("base URL is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads the body of a finished request, failing on non-success statuses.
    async fn read_body(response: reqwest::Response) -> Result<String, ServiceError> {
        let status = response.status();
        debug!("Answer service response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Answer service error: {} - {}", status.as_u16(), message);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, question: &str) -> Result<Answer, ServiceError> {
        let request = QueryRequest {
            question: question.to_string(),
        };

        info!(
            "Answer service request: url={}/query, question_len={}",
            self.base_url,
            question.len()
        );

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;
        let answer: Answer =
            serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))?;

        info!(
            "Answer received: {} bytes, {} sources",
            answer.answer.len(),
            answer.sources.len()
        );
        Ok(answer)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
    }
}
