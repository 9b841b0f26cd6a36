//! Learned Model Collaborators
//!
//! The engine consumes two learned opinions per request: a health-state
//! classification and a raw RUL estimate. Both sit behind capability traits
//! so the concrete model can be swapped without touching the engine.
//!
//! ## Variants
//!
//! - **LinearModelBundle**: scaler + one-vs-rest linear classifier + linear
//!   regressor, deserialized from a JSON export of the offline training run
//! - **RemoteModel**: HTTP inference service
//! - **FixedClassifier / FixedRegressor**: constant outputs for bench testing
//!
//! ## Availability
//!
//! `ModelSet` records which models actually loaded. A slot left empty makes
//! `assess` fail with a service-unavailable error; no default opinion is ever
//! substituted.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::{ModelBackend, ModelsConfig};
use crate::types::{FeatureSet, HealthState};

mod fixed;
mod linear;
mod remote;

pub use fixed::{FixedClassifier, FixedRegressor};
pub use linear::{LinearClassifierParams, LinearModelBundle, LinearRegressorParams, ScalerParams};
pub use remote::RemoteModel;

/// Learned multi-class health classifier.
#[async_trait]
pub trait HealthClassifier: Send + Sync {
    /// Predict the health state. Must be idempotent for identical input.
    async fn predict(&self, features: &FeatureSet) -> Result<HealthState, ModelError>;

    /// Model name for logging
    fn name(&self) -> &'static str;
}

/// Learned remaining-useful-life regressor.
#[async_trait]
pub trait RulRegressor: Send + Sync {
    /// Predict remaining useful life in hours (>= 0).
    async fn predict(&self, features: &FeatureSet) -> Result<f64, ModelError>;

    /// Model name for logging
    fn name(&self) -> &'static str;
}

/// Model load or inference failure.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model file I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model bundle parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model bundle: {0}")]
    InvalidBundle(String),
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("inference service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid model output: {0}")]
    InvalidOutput(String),
}

// ============================================================================
// Model Set
// ============================================================================

/// The learned models available to the assessor.
#[derive(Clone, Default)]
pub struct ModelSet {
    pub classifier: Option<Arc<dyn HealthClassifier>>,
    pub regressor: Option<Arc<dyn RulRegressor>>,
}

impl ModelSet {
    pub fn new(classifier: Arc<dyn HealthClassifier>, regressor: Arc<dyn RulRegressor>) -> Self {
        Self {
            classifier: Some(classifier),
            regressor: Some(regressor),
        }
    }

    /// Build the configured models.
    ///
    /// Load failures are logged and leave the slots empty so the process can
    /// still start and report the models as unavailable.
    pub fn from_config(config: &ModelsConfig) -> Self {
        match config.backend {
            ModelBackend::Linear => {
                let path = PathBuf::from(&config.bundle_path);
                match LinearModelBundle::load(&path) {
                    Ok(bundle) => {
                        info!(path = %path.display(), "Linear model bundle loaded");
                        let bundle = Arc::new(bundle);
                        Self::new(bundle.clone(), bundle)
                    }
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "Model bundle load failed, models unavailable");
                        Self::default()
                    }
                }
            }
            ModelBackend::Remote => match RemoteModel::new(&config.endpoint, config.timeout_secs) {
                Ok(remote) => {
                    info!(endpoint = %config.endpoint, "Remote inference configured");
                    let remote = Arc::new(remote);
                    Self::new(remote.clone(), remote)
                }
                Err(e) => {
                    error!(endpoint = %config.endpoint, error = %e, "Remote inference client setup failed, models unavailable");
                    Self::default()
                }
            },
            ModelBackend::Fixed => {
                info!(
                    state = %config.fixed_state,
                    rul_hours = config.fixed_rul_hours,
                    "Using fixed model outputs"
                );
                Self::new(
                    Arc::new(FixedClassifier(config.fixed_state)),
                    Arc::new(FixedRegressor(config.fixed_rul_hours)),
                )
            }
        }
    }

    /// True when both models are present.
    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.regressor.is_some()
    }
}
