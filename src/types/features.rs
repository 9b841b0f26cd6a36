//! Vibration feature vector consumed by the assessment engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of statistics in a [`FeatureSet`].
pub const NUM_FEATURES: usize = 5;

/// Feature names in model input order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["rms", "std_dev", "max_amp", "kurtosis", "skewness"];

/// Five time-domain statistics extracted from one vibration snapshot.
///
/// Accepts both snake_case keys and the upstream extractor's column names
/// (`RMS`, `Std_Dev`, `Max_Amp`, `Kurtosis`, `Skewness`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureSet {
    /// Root-mean-square amplitude (g)
    #[serde(alias = "RMS")]
    pub rms: f64,
    /// Standard deviation of the signal
    #[serde(alias = "Std_Dev")]
    pub std_dev: f64,
    /// Peak absolute amplitude (g)
    #[serde(alias = "Max_Amp")]
    pub max_amp: f64,
    /// Peakedness; values well above ~3 indicate impulsive content
    #[serde(alias = "Kurtosis")]
    pub kurtosis: f64,
    /// Waveform asymmetry
    #[serde(alias = "Skewness")]
    pub skewness: f64,
}

/// Rejected feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("feature '{field}' must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("feature '{field}' must be non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

impl FeatureSet {
    pub fn new(rms: f64, std_dev: f64, max_amp: f64, kurtosis: f64, skewness: f64) -> Self {
        Self { rms, std_dev, max_amp, kurtosis, skewness }
    }

    /// Values in model input order (see [`FEATURE_NAMES`]).
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [self.rms, self.std_dev, self.max_amp, self.kurtosis, self.skewness]
    }

    /// Check the physical invariants before the vector reaches any stage.
    ///
    /// All fields must be finite. Magnitudes (`rms`, `std_dev`, `max_amp`)
    /// must be non-negative; `kurtosis` and `skewness` may take any sign.
    /// Returns the first offending field; nothing is clamped.
    pub fn validate(&self) -> Result<(), FeatureError> {
        for (field, value) in FEATURE_NAMES.into_iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(FeatureError::NonFinite { field, value });
            }
        }
        for (field, value) in [("rms", self.rms), ("std_dev", self.std_dev), ("max_amp", self.max_amp)] {
            if value < 0.0 {
                return Err(FeatureError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_features_pass() {
        let f = FeatureSet::new(0.25, 0.15, 0.6, 3.0, 0.2);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_negative_kurtosis_and_skewness_allowed() {
        let f = FeatureSet::new(0.1, 0.1, 0.3, -1.2, -0.8);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_negative_rms_rejected() {
        let f = FeatureSet::new(-0.01, 0.1, 0.3, 3.0, 0.0);
        assert_eq!(
            f.validate(),
            Err(FeatureError::Negative { field: "rms", value: -0.01 })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let f = FeatureSet::new(0.1, 0.1, 0.3, f64::NAN, 0.0);
        assert!(matches!(
            f.validate(),
            Err(FeatureError::NonFinite { field: "kurtosis", .. })
        ));

        let f = FeatureSet::new(0.1, 0.1, f64::INFINITY, 3.0, 0.0);
        assert!(matches!(
            f.validate(),
            Err(FeatureError::NonFinite { field: "max_amp", .. })
        ));
    }

    #[test]
    fn test_deserialize_extractor_column_names() {
        let json = r#"{"RMS": 0.25, "Std_Dev": 0.15, "Max_Amp": 0.6, "Kurtosis": 3.0, "Skewness": 0.2}"#;
        let f: FeatureSet = serde_json::from_str(json).unwrap();
        assert_eq!(f, FeatureSet::new(0.25, 0.15, 0.6, 3.0, 0.2));
    }
}
