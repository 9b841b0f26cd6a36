//! Statistical threshold classifier (SPC stage)
//!
//! Maps RMS to a coarse state using fixed breakpoints derived from the
//! healthy-run distribution. Boundaries belong to the more severe state:
//! exactly `warning_rms` is already Warning.

use crate::config::Thresholds;
use crate::types::HealthState;

/// Classify vibration energy against the SPC breakpoints.
///
/// | RMS range                            | state   |
/// |--------------------------------------|---------|
/// | `rms < warning_rms`                  | Normal  |
/// | `warning_rms <= rms < failure_rms`   | Warning |
/// | `rms >= failure_rms`                 | Failure |
pub fn classify_by_rms(rms: f64, thresholds: &Thresholds) -> HealthState {
    if rms < thresholds.warning_rms {
        HealthState::Normal
    } else if rms < thresholds.failure_rms {
        HealthState::Warning
    } else {
        HealthState::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_band() {
        let t = Thresholds::default();
        for rms in [0.0, 0.01, 0.075, 0.179_999] {
            assert_eq!(classify_by_rms(rms, &t), HealthState::Normal, "rms={rms}");
        }
    }

    #[test]
    fn test_warning_band() {
        let t = Thresholds::default();
        for rms in [0.18, 0.25, 0.30, 0.449_999] {
            assert_eq!(classify_by_rms(rms, &t), HealthState::Warning, "rms={rms}");
        }
    }

    #[test]
    fn test_failure_band() {
        let t = Thresholds::default();
        for rms in [0.45, 0.5, 0.9, 12.0] {
            assert_eq!(classify_by_rms(rms, &t), HealthState::Failure, "rms={rms}");
        }
    }

    #[test]
    fn test_boundaries_are_inclusive_toward_severity() {
        let t = Thresholds::default();
        assert_eq!(classify_by_rms(0.18, &t), HealthState::Warning);
        assert_eq!(classify_by_rms(0.45, &t), HealthState::Failure);
    }

    #[test]
    fn test_injected_thresholds() {
        let t = Thresholds {
            warning_rms: 1.0,
            failure_rms: 2.0,
            ..Thresholds::default()
        };
        assert_eq!(classify_by_rms(0.5, &t), HealthState::Normal);
        assert_eq!(classify_by_rms(1.5, &t), HealthState::Warning);
        assert_eq!(classify_by_rms(2.0, &t), HealthState::Failure);
    }
}
