//! RUL Reconciler
//!
//! Maps the regressor's raw estimate into the band admissible for the final
//! state, so the classification result constrains the regression result:
//!
//! - **Normal**: floored at the reference life (`dataset_max_rul_hours`);
//!   estimates above it pass through.
//! - **Warning**: clamped to `[warning_rul_floor_hours, warning_rul_ceiling_hours]`.
//! - **Failure**: capped at `failure_rul_cap_hours / decay_factor`, where the
//!   decay factor is the worse of the RMS and kurtosis overshoot ratios
//!   (each at least 1.0).

use crate::config::Thresholds;
use crate::types::{FeatureSet, HealthState};

/// How far the readings are past the failure thresholds (>= 1.0).
pub fn decay_factor(features: &FeatureSet, thresholds: &Thresholds) -> f64 {
    let rms_ratio = (features.rms / thresholds.failure_rms).max(1.0);
    let kurt_ratio = (features.kurtosis / thresholds.critical_kurtosis).max(1.0);
    rms_ratio.max(kurt_ratio)
}

/// Final RUL (hours) for the reconciled state.
pub fn reconcile_rul(
    final_state: HealthState,
    raw_rul: f64,
    features: &FeatureSet,
    thresholds: &Thresholds,
) -> f64 {
    match final_state {
        HealthState::Normal => raw_rul.max(thresholds.dataset_max_rul_hours),
        HealthState::Warning => raw_rul
            .min(thresholds.warning_rul_ceiling_hours)
            .max(thresholds.warning_rul_floor_hours),
        HealthState::Failure => {
            let natural_limit = thresholds.failure_rul_cap_hours / decay_factor(features, thresholds);
            raw_rul.min(natural_limit)
        }
    }
}
