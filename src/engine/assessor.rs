//! Assessment entry point
//!
//! `assess` runs one request end to end:
//!
//! ```text
//! FeatureSet ─validate─► [classifier ∥ regressor] ─► evaluate ─► report composer
//!                                                    │
//!                              SPC → reconcile → reconcile_rul → gate
//! ```
//!
//! `evaluate` is the pure fusion step; everything that can fail (input
//! validation, model availability, raw evidence checks) happens before it.
//! Report failures are absorbed by the composer and never reach the caller.

use std::sync::Arc;
use tracing::debug;

use super::gate::should_generate_report;
use super::handle::EngineHandle;
use super::reconciler::reconcile_with_trace;
use super::rul::reconcile_rul;
use super::spc::classify_by_rms;
use crate::config::{ConfigError, SentinelConfig, Thresholds};
use crate::models::{ModelError, ModelSet};
use crate::report::ReportComposer;
use crate::types::{AssessmentResult, EvidenceTrace, FeatureError, FeatureSet, HealthState, RawEvidence};

/// Caller-facing error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected; retrying with the same input will fail again
    BadRequest,
    /// A collaborator is missing or failed
    ServiceUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    #[error("invalid feature set: {0}")]
    InvalidInput(#[from] FeatureError),
    #[error("{0} model not loaded")]
    ModelUnavailable(&'static str),
    #[error("classifier failed: {0}")]
    Classifier(#[source] ModelError),
    #[error("regressor failed: {0}")]
    Regressor(#[source] ModelError),
    #[error("invalid model evidence: {0}")]
    InvalidEvidence(String),
}

impl AssessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessError::InvalidInput(_) => ErrorKind::BadRequest,
            AssessError::ModelUnavailable(_)
            | AssessError::Classifier(_)
            | AssessError::Regressor(_)
            | AssessError::InvalidEvidence(_) => ErrorKind::ServiceUnavailable,
        }
    }
}

/// Deterministic part of an assessment (everything but the report text).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub state: HealthState,
    pub rul_hours: f64,
    pub report_requested: bool,
    pub evidence: EvidenceTrace,
}

/// Fuse validated features and raw model evidence into a verdict.
pub fn evaluate(features: &FeatureSet, evidence: &RawEvidence, thresholds: &Thresholds) -> Verdict {
    let stat_state = classify_by_rms(features.rms, thresholds);
    let reconciliation = reconcile_with_trace(features, evidence.classifier_state, thresholds);
    let rul_hours = reconcile_rul(
        reconciliation.state,
        evidence.regressor_rul_hours,
        features,
        thresholds,
    );

    Verdict {
        state: reconciliation.state,
        rul_hours,
        report_requested: should_generate_report(reconciliation.state),
        evidence: EvidenceTrace {
            stat_state,
            classifier_state: evidence.classifier_state,
            raw_rul_hours: evidence.regressor_rul_hours,
            rule: reconciliation.rule,
        },
    }
}

/// Hybrid condition-assessment engine. Cheap to clone and share across tasks.
#[derive(Clone)]
pub struct Assessor {
    handle: Arc<EngineHandle>,
    models: ModelSet,
    composer: ReportComposer,
}

impl Assessor {
    pub fn new(handle: Arc<EngineHandle>, models: ModelSet, composer: ReportComposer) -> Self {
        Self {
            handle,
            models,
            composer,
        }
    }

    /// Build the engine and its collaborators from config.
    ///
    /// Fails only on invalid thresholds; missing models surface per call.
    pub fn from_config(config: &SentinelConfig) -> Result<Self, ConfigError> {
        let handle = Arc::new(EngineHandle::new(config.thresholds)?);
        Ok(Self::new(
            handle,
            ModelSet::from_config(&config.models),
            ReportComposer::from_config(config),
        ))
    }

    pub fn handle(&self) -> &Arc<EngineHandle> {
        &self.handle
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Assess one feature set.
    pub async fn assess(&self, features: &FeatureSet) -> Result<AssessmentResult, AssessError> {
        features.validate()?;
        let thresholds = self.handle.snapshot();

        let evidence = self.gather_evidence(features).await?;
        let verdict = evaluate(features, &evidence, &thresholds);

        debug!(
            state = %verdict.state,
            rul_hours = verdict.rul_hours,
            rule = verdict.evidence.rule.name(),
            classifier_state = %evidence.classifier_state,
            raw_rul_hours = evidence.regressor_rul_hours,
            "Assessment complete"
        );

        let report = self
            .composer
            .compose(verdict.state, verdict.rul_hours, features)
            .await;

        Ok(AssessmentResult {
            state: verdict.state,
            rul_hours: verdict.rul_hours,
            report_requested: verdict.report_requested,
            report,
            evidence: verdict.evidence,
        })
    }

    async fn gather_evidence(&self, features: &FeatureSet) -> Result<RawEvidence, AssessError> {
        let classifier = self
            .models
            .classifier
            .as_ref()
            .ok_or(AssessError::ModelUnavailable("classifier"))?;
        let regressor = self
            .models
            .regressor
            .as_ref()
            .ok_or(AssessError::ModelUnavailable("regressor"))?;

        let (class_result, rul_result) =
            tokio::join!(classifier.predict(features), regressor.predict(features));
        let classifier_state = class_result.map_err(AssessError::Classifier)?;
        let regressor_rul_hours = rul_result.map_err(AssessError::Regressor)?;

        if !regressor_rul_hours.is_finite() || regressor_rul_hours < 0.0 {
            return Err(AssessError::InvalidEvidence(format!(
                "{} regressor returned RUL {regressor_rul_hours}",
                regressor.name()
            )));
        }

        Ok(RawEvidence {
            classifier_state,
            regressor_rul_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedClassifier, FixedRegressor, HealthClassifier, RulRegressor};
    use crate::report::{ReportError, ReportGenerator, ReportRequest, STABLE_MESSAGE};
    use crate::context::NoOpStore;
    use crate::types::OverrideRule;
    use async_trait::async_trait;

    struct FailingGenerator;

    #[async_trait]
    impl ReportGenerator for FailingGenerator {
        async fn generate(&self, _request: &ReportRequest) -> Result<String, ReportError> {
            Err(ReportError::EmptyResponse)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl HealthClassifier for BrokenClassifier {
        async fn predict(&self, _features: &FeatureSet) -> Result<HealthState, ModelError> {
            Err(ModelError::InvalidOutput("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn assessor(state: HealthState, rul: f64) -> Assessor {
        Assessor::new(
            Arc::new(EngineHandle::new(Thresholds::default()).unwrap()),
            ModelSet::new(Arc::new(FixedClassifier(state)), Arc::new(FixedRegressor(rul))),
            ReportComposer::disabled(),
        )
    }

    #[test]
    fn test_evaluate_trace() {
        let features = FeatureSet::new(0.30, 0.2, 0.9, 1.0, 0.0);
        let evidence = RawEvidence {
            classifier_state: HealthState::Failure,
            regressor_rul_hours: 9000.0,
        };
        let v = evaluate(&features, &evidence, &Thresholds::default());
        assert_eq!(v.state, HealthState::Warning);
        assert_eq!(v.rul_hours, 500.0);
        assert!(v.report_requested);
        assert_eq!(v.evidence.stat_state, HealthState::Warning);
        assert_eq!(v.evidence.rule, OverrideRule::OverCautionSuppression);
        assert_eq!(v.evidence.raw_rul_hours, 9000.0);
    }

    #[tokio::test]
    async fn test_normal_assessment() {
        let result = assessor(HealthState::Normal, 100.0)
            .assess(&FeatureSet::new(0.05, 0.04, 0.2, 3.0, 0.0))
            .await
            .unwrap();
        assert_eq!(result.state, HealthState::Normal);
        assert_eq!(result.rul_hours, 984.0);
        assert!(!result.report_requested);
        assert_eq!(result.report, STABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let err = assessor(HealthState::Normal, 100.0)
            .assess(&FeatureSet::new(f64::NAN, 0.0, 0.0, 3.0, 0.0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_missing_models_are_unavailable() {
        let a = Assessor::new(
            Arc::new(EngineHandle::new(Thresholds::default()).unwrap()),
            ModelSet::default(),
            ReportComposer::disabled(),
        );
        let err = a.assess(&FeatureSet::new(0.1, 0.1, 0.3, 3.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, AssessError::ModelUnavailable("classifier")));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_classifier_failure_is_unavailable() {
        let a = Assessor::new(
            Arc::new(EngineHandle::new(Thresholds::default()).unwrap()),
            ModelSet::new(Arc::new(BrokenClassifier), Arc::new(FixedRegressor(10.0))),
            ReportComposer::disabled(),
        );
        let err = a.assess(&FeatureSet::new(0.1, 0.1, 0.3, 3.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, AssessError::Classifier(_)));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_negative_raw_rul_rejected() {
        let err = assessor(HealthState::Warning, -5.0)
            .assess(&FeatureSet::new(0.3, 0.2, 0.9, 3.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AssessError::InvalidEvidence(_)));
    }

    #[tokio::test]
    async fn test_report_failure_keeps_verdict() {
        let a = Assessor::new(
            Arc::new(EngineHandle::new(Thresholds::default()).unwrap()),
            ModelSet::new(
                Arc::new(FixedClassifier(HealthState::Failure)) as Arc<dyn HealthClassifier>,
                Arc::new(FixedRegressor(1000.0)) as Arc<dyn RulRegressor>,
            ),
            ReportComposer::new("B1", Some(Arc::new(FailingGenerator)), Arc::new(NoOpStore)),
        );
        let result = a.assess(&FeatureSet::new(0.90, 0.6, 2.7, 5.0, 0.0)).await.unwrap();
        assert_eq!(result.state, HealthState::Failure);
        assert_eq!(result.rul_hours, 24.0);
        assert!(result.report_requested);
        assert!(result.report.starts_with("Report generation failed:"));
    }

    #[tokio::test]
    async fn test_reconfigure_applies_to_next_call() {
        let a = assessor(HealthState::Warning, 200.0);
        let features = FeatureSet::new(0.30, 0.2, 0.9, 3.0, 0.0);
        assert_eq!(a.assess(&features).await.unwrap().state, HealthState::Warning);

        a.handle()
            .reconfigure(Thresholds {
                warning_rms: 0.2,
                failure_rms: 0.25,
                ..Thresholds::default()
            })
            .unwrap();
        let result = a.assess(&features).await.unwrap();
        // Warning classifier does not trigger the Failure/Normal correction
        assert_eq!(result.state, HealthState::Failure);
        assert_eq!(result.evidence.rule, OverrideRule::StatisticalDefault);
    }
}
