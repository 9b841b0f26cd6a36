//! Evidence Reconciler
//!
//! Combines the SPC verdict, the impulsive-fault indicator (kurtosis) and the
//! learned classifier's opinion into one final state.
//!
//! ## Rules (first match wins)
//!
//! | # | Rule                     | Condition                                   | Verdict  |
//! |---|--------------------------|---------------------------------------------|----------|
//! | 1 | ImpulsiveFault           | `kurtosis > critical_kurtosis`              | Failure  |
//! | 2 | OverCautionSuppression   | SPC Warning and classifier Failure          | Warning  |
//! | 3 | UnderCautionCorrection   | SPC Failure and classifier Normal           | Failure  |
//! | 4 | StatisticalDefault       | always                                      | SPC      |
//!
//! The two disagreement rules are deliberately asymmetric: the classifier may
//! never escalate a Warning on its own, and may never downgrade an RMS
//! Failure. Physical severity decides ties. Do not generalize them.

use tracing::info;

use super::spc::classify_by_rms;
use crate::config::Thresholds;
use crate::types::{FeatureSet, HealthState, OverrideRule};

/// Inputs visible to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub features: &'a FeatureSet,
    pub stat_state: HealthState,
    pub classifier_state: HealthState,
    pub thresholds: &'a Thresholds,
}

/// One predicate → verdict entry of the priority table.
pub struct Rule {
    pub id: OverrideRule,
    pub applies: fn(&RuleInput<'_>) -> bool,
    pub verdict: fn(&RuleInput<'_>) -> HealthState,
}

/// Final state together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub state: HealthState,
    pub rule: OverrideRule,
}

fn kurtosis_above_critical(i: &RuleInput<'_>) -> bool {
    i.features.kurtosis > i.thresholds.critical_kurtosis
}

fn classifier_escalates_warning(i: &RuleInput<'_>) -> bool {
    i.stat_state == HealthState::Warning && i.classifier_state == HealthState::Failure
}

fn classifier_downgrades_failure(i: &RuleInput<'_>) -> bool {
    i.stat_state == HealthState::Failure && i.classifier_state == HealthState::Normal
}

fn always(_: &RuleInput<'_>) -> bool {
    true
}

fn failure(_: &RuleInput<'_>) -> HealthState {
    HealthState::Failure
}

fn warning(_: &RuleInput<'_>) -> HealthState {
    HealthState::Warning
}

fn spc_verdict(i: &RuleInput<'_>) -> HealthState {
    i.stat_state
}

/// Override rules in strict priority order. The last entry always applies.
pub static RULES: [Rule; 4] = [
    Rule {
        id: OverrideRule::ImpulsiveFault,
        applies: kurtosis_above_critical,
        verdict: failure,
    },
    Rule {
        id: OverrideRule::OverCautionSuppression,
        applies: classifier_escalates_warning,
        verdict: warning,
    },
    Rule {
        id: OverrideRule::UnderCautionCorrection,
        applies: classifier_downgrades_failure,
        verdict: failure,
    },
    Rule {
        id: OverrideRule::StatisticalDefault,
        applies: always,
        verdict: spc_verdict,
    },
];

/// Reconcile and report which rule decided.
pub fn reconcile_with_trace(
    features: &FeatureSet,
    classifier_state: HealthState,
    thresholds: &Thresholds,
) -> Reconciliation {
    let input = RuleInput {
        features,
        stat_state: classify_by_rms(features.rms, thresholds),
        classifier_state,
        thresholds,
    };

    let rule = RULES
        .iter()
        .find(|r| (r.applies)(&input))
        .unwrap_or(&RULES[RULES.len() - 1]);
    let state = (rule.verdict)(&input);

    if rule.id != OverrideRule::StatisticalDefault {
        info!(
            rule = rule.id.name(),
            rms = features.rms,
            kurtosis = features.kurtosis,
            stat_state = %input.stat_state,
            classifier_state = %classifier_state,
            final_state = %state,
            "Evidence override applied"
        );
    }

    Reconciliation { state, rule: rule.id }
}

/// Final health state for one request.
pub fn reconcile(
    features: &FeatureSet,
    classifier_state: HealthState,
    thresholds: &Thresholds,
) -> HealthState {
    reconcile_with_trace(features, classifier_state, thresholds).state
}
