//! Report Gate
//!
//! Narrative generation is an expensive, non-deterministic external call, so
//! it only runs when the verdict is actionable.

use crate::types::HealthState;

/// False only for Normal.
pub fn should_generate_report(final_state: HealthState) -> bool {
    match final_state {
        HealthState::Normal => false,
        HealthState::Warning | HealthState::Failure => true,
    }
}
