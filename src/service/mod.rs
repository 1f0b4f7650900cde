pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpAnswerService;
pub use provider::{AnswerService, ServiceError};
pub use types::{Answer, HealthStatus, QueryRequest, SourceRef};
