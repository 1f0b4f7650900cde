//! Wire types for the answer service.
//!
//! ```text
//! POST /query   { "question": "..." }
//!           ←   { "question": "...", "answer": "<p>...</p>", "sources": [...], "source_count": 1 }
//! GET  /health  ←   { "status": "healthy", "version": "2.0.0", "features": [...] }
//! ```

use serde::{Deserialize, Serialize};

/// Request body for `POST /query`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub question: String,
}

/// A reference to the portfolio material an answer drew on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    #[serde(default = "unknown_section")]
    pub section_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_titles: Option<String>,
}

fn unknown_section() -> String {
    "unknown".to_string()
}

impl SourceRef {
    pub fn new(section_type: &str) -> Self {
        Self {
            section_type: section_type.to_string(),
            project_name: None,
            github_url: None,
            job_titles: None,
        }
    }

    /// Human-readable category label: `work_experience` → `work experience`.
    pub fn label(&self) -> String {
        self.section_type.replace('_', " ")
    }
}

/// A successful answer from the service. `answer` holds HTML and is kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_count: Option<usize>,
}

impl Answer {
    /// Distinct chip labels in first-seen order.
    pub fn chip_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for source in &self.sources {
            let label = source.label();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

/// Response body for `GET /health`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "running")
    }
}
