//! Maintenance Report Module
//!
//! Turns an actionable assessment (Warning or Failure) into a maintenance
//! work order for the crew on site.
//!
//! ## Architecture
//!
//! - **ChatCompletionGenerator**: OpenAI-compatible chat completions over HTTPS
//! - **TemplateReportGenerator**: deterministic offline work order, no network
//! - **ReportComposer**: applies the report gate, gathers manual context, and
//!   absorbs generator failures into a placeholder string
//!
//! A report failure never changes the assessed state or RUL.

use async_trait::async_trait;

pub mod chat_client;
pub mod composer;
pub mod prompt;
pub mod template;

pub use chat_client::ChatCompletionGenerator;
pub use composer::ReportComposer;
pub use template::TemplateReportGenerator;

use crate::types::{FeatureSet, HealthState};

/// Returned instead of a report when the gate is closed (Normal).
pub const STABLE_MESSAGE: &str =
    "Equipment condition is stable. Maintain current operating conditions.";

/// Manual context used when the lookup finds nothing.
pub const NO_MANUAL_CONTEXT: &str =
    "No related manual entries found. Follow general bearing maintenance guidelines.";

/// Returned when no generator backend is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Report generation is not configured.";

/// Everything a generator needs to write one work order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub equipment: String,
    pub state: HealthState,
    pub rul_hours: f64,
    pub features: FeatureSet,
    pub manual_context: Vec<String>,
}

/// Report generation failure
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no report text")]
    EmptyResponse,
}

/// Narrative report backend
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, request: &ReportRequest) -> Result<String, ReportError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
