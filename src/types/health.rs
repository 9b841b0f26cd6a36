//! Discrete health state of the monitored component

use serde::{Deserialize, Serialize};

// ============================================================================
// Health State
// ============================================================================

/// Severity-ordered health verdict.
///
/// The derived `Ord` follows declaration order, so `Normal < Warning < Failure`
/// and `max()` always picks the more severe state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HealthState {
    #[default]
    Normal,
    Warning,
    Failure,
}

impl HealthState {
    /// All states in severity order.
    pub const ALL: [HealthState; 3] = [HealthState::Normal, HealthState::Warning, HealthState::Failure];

    /// Numeric severity code (0, 1, 2) used by the learned models.
    pub fn code(self) -> u8 {
        match self {
            HealthState::Normal => 0,
            HealthState::Warning => 1,
            HealthState::Failure => 2,
        }
    }

    /// Inverse of [`code`](Self::code). Returns `None` for anything outside 0..=2.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HealthState::Normal),
            1 => Some(HealthState::Warning),
            2 => Some(HealthState::Failure),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthState::Normal => "Normal",
            HealthState::Warning => "Warning",
            HealthState::Failure => "Failure",
        }
    }

    /// Short operator-facing hint shown next to the RUL figure.
    pub fn maintenance_hint(self) -> &'static str {
        match self {
            HealthState::Normal => "Within safe range",
            HealthState::Warning => "Preventive maintenance recommended",
            HealthState::Failure => "Urgent replacement required",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(HealthState::Normal < HealthState::Warning);
        assert!(HealthState::Warning < HealthState::Failure);
        assert_eq!(HealthState::Normal.max(HealthState::Failure), HealthState::Failure);
    }

    #[test]
    fn test_code_mapping() {
        for state in HealthState::ALL {
            assert_eq!(HealthState::from_code(state.code()), Some(state));
        }
        assert_eq!(HealthState::from_code(3), None);
    }

    #[test]
    fn test_serde_uses_variant_name() {
        let json = serde_json::to_string(&HealthState::Warning).unwrap();
        assert_eq!(json, "\"Warning\"");
        let back: HealthState = serde_json::from_str("\"Failure\"").unwrap();
        assert_eq!(back, HealthState::Failure);
    }
}
