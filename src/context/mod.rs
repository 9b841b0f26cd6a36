//! Context module - maintenance manual lookup
//!
//! Supplies the manual excerpts that ground a generated maintenance report.
//!
//! ## ManualLookup trait
//!
//! The `ManualLookup` trait abstracts the search interface so backends can be
//! swapped (built-in snippets, a plant manual file, NoOp). Empty results are
//! a valid answer; they degrade the report, not the assessment.

pub mod bearing_manual;
pub mod knowledge_store;
pub mod manual_index;

pub use knowledge_store::{from_config, ManualLookup, NoOpStore, StaticManual};
pub use manual_index::ManualIndex;

use crate::types::{FeatureSet, HealthState};

/// Query text used to retrieve manual context for an assessment.
pub fn manual_query(state: HealthState, features: &FeatureSet) -> String {
    format!(
        "State: {}, RMS: {}, Kurtosis: {}",
        state.label(),
        features.rms,
        features.kurtosis
    )
}

/// Lowercase search terms; splits on anything but alphanumerics and '.'.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '.'))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_query_format() {
        let f = FeatureSet::new(0.5, 0.2, 1.2, 6.25, -0.1);
        assert_eq!(
            manual_query(HealthState::Failure, &f),
            "State: Failure, RMS: 0.5, Kurtosis: 6.25"
        );
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("State: Warning, RMS: 0.300."),
            vec!["state", "warning", "rms", "0.300"]
        );
    }
}
