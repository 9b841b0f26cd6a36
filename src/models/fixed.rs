//! Constant-output models for bench testing and dry runs

use async_trait::async_trait;

use super::{HealthClassifier, ModelError, RulRegressor};
use crate::types::{FeatureSet, HealthState};

/// Classifier that always returns the same state.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub HealthState);

#[async_trait]
impl HealthClassifier for FixedClassifier {
    async fn predict(&self, _features: &FeatureSet) -> Result<HealthState, ModelError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Regressor that always returns the same RUL.
#[derive(Debug, Clone, Copy)]
pub struct FixedRegressor(pub f64);

#[async_trait]
impl RulRegressor for FixedRegressor {
    async fn predict(&self, _features: &FeatureSet) -> Result<f64, ModelError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
