//! Serialized linear models exported from the offline training run.
//!
//! The bundle mirrors the training pipeline: features are standardized before
//! classification, while the regressor consumes raw features.
//!
//! ```json
//! {
//!   "feature_order": ["rms", "std_dev", "max_amp", "kurtosis", "skewness"],
//!   "scaler":     { "mean": [5 values], "scale": [5 values] },
//!   "classifier": { "weights": [[5], [5], [5]], "intercepts": [3 values] },
//!   "regressor":  { "weights": [5 values], "intercept": 0.0 }
//! }
//! ```
//!
//! Classifier rows are indexed by state code (0 Normal, 1 Warning, 2 Failure).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{HealthClassifier, ModelError, RulRegressor};
use crate::types::{FeatureSet, HealthState, FEATURE_NAMES, NUM_FEATURES};

/// Standardization parameters (zero mean, unit variance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalerParams {
    pub mean: [f64; NUM_FEATURES],
    pub scale: [f64; NUM_FEATURES],
}

/// One-vs-rest linear classifier over standardized features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearClassifierParams {
    pub weights: [[f64; NUM_FEATURES]; 3],
    pub intercepts: [f64; 3],
}

/// Linear RUL regressor over raw features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressorParams {
    pub weights: [f64; NUM_FEATURES],
    pub intercept: f64,
}

fn default_feature_order() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
}

/// Classifier + regressor loaded from one JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModelBundle {
    #[serde(default = "default_feature_order")]
    pub feature_order: Vec<String>,
    pub scaler: ScalerParams,
    pub classifier: LinearClassifierParams,
    pub regressor: LinearRegressorParams,
}

impl LinearModelBundle {
    /// Load and validate a bundle from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a bundle from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.feature_order != default_feature_order() {
            return Err(ModelError::InvalidBundle(format!(
                "feature_order {:?} does not match {:?}",
                self.feature_order, FEATURE_NAMES
            )));
        }

        let mut all_values = self
            .scaler
            .mean
            .iter()
            .chain(&self.scaler.scale)
            .chain(self.classifier.weights.iter().flatten())
            .chain(&self.classifier.intercepts)
            .chain(&self.regressor.weights)
            .chain(std::iter::once(&self.regressor.intercept));
        if all_values.any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidBundle("parameters must be finite".to_string()));
        }

        if let Some(i) = self.scaler.scale.iter().position(|s| *s <= 0.0) {
            return Err(ModelError::InvalidBundle(format!(
                "scaler.scale[{i}] ({}) must be > 0",
                self.scaler.scale[i]
            )));
        }
        Ok(())
    }

    fn standardize(&self, features: &FeatureSet) -> [f64; NUM_FEATURES] {
        let raw = features.to_array();
        std::array::from_fn(|i| (raw[i] - self.scaler.mean[i]) / self.scaler.scale[i])
    }

    /// Decision score per state code.
    pub fn class_scores(&self, features: &FeatureSet) -> [f64; 3] {
        let x = self.standardize(features);
        std::array::from_fn(|class| {
            dot(&self.classifier.weights[class], &x) + self.classifier.intercepts[class]
        })
    }

    /// Unfloored regressor output.
    pub fn raw_rul(&self, features: &FeatureSet) -> f64 {
        dot(&self.regressor.weights, &features.to_array()) + self.regressor.intercept
    }
}

fn dot(a: &[f64; NUM_FEATURES], b: &[f64; NUM_FEATURES]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[async_trait]
impl HealthClassifier for LinearModelBundle {
    async fn predict(&self, features: &FeatureSet) -> Result<HealthState, ModelError> {
        let scores = self.class_scores(features);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ModelError::InvalidOutput(format!("non-finite class scores {scores:?}")));
        }

        // Ties resolve toward the lower code
        let mut best = 0;
        for (code, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = code;
            }
        }
        HealthState::from_code(best as u8)
            .ok_or_else(|| ModelError::InvalidOutput(format!("class index {best}")))
    }

    fn name(&self) -> &'static str {
        "linear-ovr"
    }
}

#[async_trait]
impl RulRegressor for LinearModelBundle {
    /// Output is floored at zero; a linear fit extrapolates below zero past
    /// the end of the training run.
    async fn predict(&self, features: &FeatureSet) -> Result<f64, ModelError> {
        let rul = self.raw_rul(features);
        if !rul.is_finite() {
            return Err(ModelError::InvalidOutput(format!("non-finite RUL {rul}")));
        }
        Ok(rul.max(0.0))
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores favour Normal at low RMS, Failure at high RMS; RUL falls with RMS.
    const BUNDLE_JSON: &str = r#"{
        "scaler": { "mean": [0.1, 0.1, 0.4, 3.0, 0.0], "scale": [0.1, 0.1, 0.3, 1.0, 0.5] },
        "classifier": {
            "weights": [
                [-2.0, 0.0, 0.0, 0.0, 0.0],
                [ 0.0, 0.0, 0.0, 0.0, 0.0],
                [ 2.0, 0.0, 0.0, 0.0, 0.0]
            ],
            "intercepts": [0.0, 1.0, -1.0]
        },
        "regressor": { "weights": [-2000.0, 0.0, 0.0, 0.0, 0.0], "intercept": 1000.0 }
    }"#;

    fn bundle() -> LinearModelBundle {
        LinearModelBundle::from_json(BUNDLE_JSON).unwrap()
    }

    #[tokio::test]
    async fn test_classifier_bands() {
        let b = bundle();
        // rms 0.0 → z = -1 → scores [2, 1, -3]
        let normal = FeatureSet::new(0.0, 0.1, 0.4, 3.0, 0.0);
        assert_eq!(HealthClassifier::predict(&b, &normal).await.unwrap(), HealthState::Normal);
        // rms 0.1 → z = 0 → scores [0, 1, -1]
        let warning = FeatureSet::new(0.1, 0.1, 0.4, 3.0, 0.0);
        assert_eq!(HealthClassifier::predict(&b, &warning).await.unwrap(), HealthState::Warning);
        // rms 0.3 → z = 2 → scores [-4, 1, 3]
        let failure = FeatureSet::new(0.3, 0.1, 0.4, 3.0, 0.0);
        assert_eq!(HealthClassifier::predict(&b, &failure).await.unwrap(), HealthState::Failure);
    }

    #[tokio::test]
    async fn test_regressor_floors_at_zero() {
        let b = bundle();
        let early = FeatureSet::new(0.1, 0.1, 0.4, 3.0, 0.0);
        assert!((RulRegressor::predict(&b, &early).await.unwrap() - 800.0).abs() < 1e-9);

        let late = FeatureSet::new(0.9, 0.1, 0.4, 3.0, 0.0);
        assert!(b.raw_rul(&late) < 0.0);
        assert_eq!(RulRegressor::predict(&b, &late).await.unwrap(), 0.0);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let json = BUNDLE_JSON.replace("\"scale\": [0.1,", "\"scale\": [0.0,");
        let err = LinearModelBundle::from_json(&json).unwrap_err();
        assert!(matches!(err, ModelError::InvalidBundle(_)));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let json = BUNDLE_JSON.replace("\"intercepts\": [0.0, 1.0, -1.0]", "\"intercepts\": [0.0, 1.0]");
        let err = LinearModelBundle::from_json(&json).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_feature_order_mismatch_rejected() {
        let json = BUNDLE_JSON.replacen(
            "{",
            r#"{ "feature_order": ["kurtosis", "rms", "std_dev", "max_amp", "skewness"],"#,
            1,
        );
        let err = LinearModelBundle::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("feature_order"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LinearModelBundle::load(Path::new("/nonexistent/models.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
