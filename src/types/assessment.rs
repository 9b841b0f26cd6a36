//! Assessment inputs from learned models and the verdict returned to callers

use serde::{Deserialize, Serialize};

use super::HealthState;

/// Raw opinions of the two learned models for one request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawEvidence {
    /// Independent opinion of the learned classifier
    pub classifier_state: HealthState,
    /// Independent RUL estimate of the learned regressor (hours)
    pub regressor_rul_hours: f64,
}

/// Which reconciliation rule decided the final state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OverrideRule {
    /// Kurtosis above the critical level forces Failure
    ImpulsiveFault,
    /// Classifier Failure is held at Warning while RMS is below the failure line
    OverCautionSuppression,
    /// Classifier Normal cannot downgrade an RMS Failure
    UnderCautionCorrection,
    /// No override matched; the RMS verdict stands
    StatisticalDefault,
}

impl OverrideRule {
    pub fn name(self) -> &'static str {
        match self {
            OverrideRule::ImpulsiveFault => "impulsive_fault",
            OverrideRule::OverCautionSuppression => "over_caution_suppression",
            OverrideRule::UnderCautionCorrection => "under_caution_correction",
            OverrideRule::StatisticalDefault => "statistical_default",
        }
    }
}

/// Audit trail of how a verdict was reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvidenceTrace {
    /// Verdict of the RMS threshold stage
    pub stat_state: HealthState,
    /// Raw learned-classifier opinion
    pub classifier_state: HealthState,
    /// Raw learned-regressor RUL (hours)
    pub raw_rul_hours: f64,
    /// Rule that produced the final state
    pub rule: OverrideRule,
}

/// Result of one assessment call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
    pub state: HealthState,
    /// Reconciled remaining useful life (hours, >= 0)
    pub rul_hours: f64,
    /// True when the state warranted a narrative report
    pub report_requested: bool,
    /// Narrative report, the stable-condition message, or a failure placeholder
    pub report: String,
    pub evidence: EvidenceTrace,
}
