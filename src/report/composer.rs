//! Report composition: gate, manual lookup, generation, fallback.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{
    ChatCompletionGenerator, ReportGenerator, ReportRequest, TemplateReportGenerator,
    NOT_CONFIGURED_MESSAGE, NO_MANUAL_CONTEXT, STABLE_MESSAGE,
};
use crate::config::{ReportBackend, SentinelConfig};
use crate::context::{self, manual_query, ManualLookup, NoOpStore};
use crate::engine::gate::should_generate_report;
use crate::types::{FeatureSet, HealthState};

/// Produces the `report` field of an assessment. Never fails.
#[derive(Clone)]
pub struct ReportComposer {
    equipment: String,
    generator: Option<Arc<dyn ReportGenerator>>,
    manual: Arc<dyn ManualLookup>,
}

impl ReportComposer {
    pub fn new(
        equipment: impl Into<String>,
        generator: Option<Arc<dyn ReportGenerator>>,
        manual: Arc<dyn ManualLookup>,
    ) -> Self {
        Self {
            equipment: equipment.into(),
            generator,
            manual,
        }
    }

    /// Composer with no generator and no manual.
    pub fn disabled() -> Self {
        Self::new(String::new(), None, Arc::new(NoOpStore))
    }

    pub fn from_config(config: &SentinelConfig) -> Self {
        let manual: Arc<dyn ManualLookup> = Arc::from(context::from_config(&config.knowledge));
        if manual.is_healthy() {
            info!(store = manual.store_name(), "Manual lookup configured");
        } else {
            warn!(store = manual.store_name(), "Manual lookup has no content, reports will carry no manual context");
        }

        let generator: Option<Arc<dyn ReportGenerator>> = match config.report.backend {
            ReportBackend::Chat => match ChatCompletionGenerator::from_config(&config.report) {
                Ok(chat) => {
                    if chat.has_api_key() {
                        info!(model = %config.report.model, "Chat report generator configured");
                    } else {
                        warn!(
                            env = %config.report.api_key_env,
                            "Report API key not set, Warning/Failure reports will carry an error"
                        );
                    }
                    Some(Arc::new(chat))
                }
                Err(e) => {
                    error!(error = %e, "Failed to build report HTTP client, reports disabled");
                    None
                }
            },
            ReportBackend::Template => Some(Arc::new(TemplateReportGenerator)),
            ReportBackend::Disabled => None,
        };

        Self::new(config.equipment.name.clone(), generator, manual)
    }

    /// Report text for a reconciled assessment.
    pub async fn compose(&self, state: HealthState, rul_hours: f64, features: &FeatureSet) -> String {
        if !should_generate_report(state) {
            return STABLE_MESSAGE.to_string();
        }

        let Some(generator) = &self.generator else {
            return NOT_CONFIGURED_MESSAGE.to_string();
        };

        let request = ReportRequest {
            equipment: self.equipment.clone(),
            state,
            rul_hours,
            features: *features,
            manual_context: self.lookup_manual(state, features),
        };

        match generator.generate(&request).await {
            Ok(report) => {
                debug!(generator = generator.name(), chars = report.len(), "Report generated");
                report
            }
            Err(e) => {
                warn!(generator = generator.name(), state = %state, error = %e, "Report generation failed");
                format!("Report generation failed: {e}")
            }
        }
    }

    fn lookup_manual(&self, state: HealthState, features: &FeatureSet) -> Vec<String> {
        let query = manual_query(state, features);
        let found = self.manual.search(&query);
        debug!(store = self.manual.store_name(), query = %query, hits = found.len(), "Manual lookup");
        if found.is_empty() {
            vec![NO_MANUAL_CONTEXT.to_string()]
        } else {
            found
        }
    }
}
