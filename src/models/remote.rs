//! HTTP inference client for models served out of process.
//!
//! Both endpoints take the feature set as a JSON body:
//! - `POST {endpoint}/classify` → `{"state": 0|1|2}`
//! - `POST {endpoint}/rul` → `{"rul_hours": f64}`

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{HealthClassifier, ModelError, RulRegressor};
use crate::types::{FeatureSet, HealthState};

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    state: u8,
}

#[derive(Debug, Deserialize)]
struct RulResponse {
    rul_hours: f64,
}

/// Remote classifier and regressor sharing one connection pool.
#[derive(Clone)]
pub struct RemoteModel {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteModel {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        if endpoint.trim().is_empty() {
            return Err(ModelError::InvalidBundle(
                "remote backend requires models.endpoint".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        features: &FeatureSet,
    ) -> Result<T, ModelError> {
        let resp = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .json(features)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ModelError::Status(status));
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl HealthClassifier for RemoteModel {
    async fn predict(&self, features: &FeatureSet) -> Result<HealthState, ModelError> {
        let body: ClassifyResponse = self.post("classify", features).await?;
        HealthState::from_code(body.state)
            .ok_or_else(|| ModelError::InvalidOutput(format!("unknown state code {}", body.state)))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[async_trait]
impl RulRegressor for RemoteModel {
    async fn predict(&self, features: &FeatureSet) -> Result<f64, ModelError> {
        let body: RulResponse = self.post("rul", features).await?;
        Ok(body.rul_hours)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
