//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::state::{App, Hero};
use crate::service::{Answer, AnswerService, HealthStatus, ServiceError};

/// An answer service that returns a canned result and counts calls.
pub struct StubService {
    result: Result<Answer, ServiceError>,
    calls: AtomicUsize,
}

impl StubService {
    pub fn answering(text: &str) -> Self {
        Self {
            result: Ok(Answer {
                answer: text.to_string(),
                sources: vec![],
                question: None,
                source_count: None,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerService for StubService {
    fn name(&self) -> &str {
        "stub"
    }

    async fn ask(&self, _question: &str) -> Result<Answer, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            version: None,
            features: vec![],
        })
    }
}

pub fn test_hero() -> Hero {
    Hero {
        name: "Test Person".to_string(),
        tagline: "Builds things.".to_string(),
        placeholder: "Ask me anything...".to_string(),
    }
}

/// Creates a test App backed by a StubService.
pub fn test_app() -> App {
    App::new(Arc::new(StubService::answering("<p>stub</p>")), test_hero())
}
