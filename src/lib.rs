//! Bearing Sentinel: hybrid condition assessment for rolling bearings
//!
//! Fuses an SPC threshold classifier, a learned classifier, a learned RUL
//! regressor and an impulsive-fault indicator into one consistent verdict.
//!
//! ## Architecture
//!
//! - **Engine**: the four pure reconciliation stages and the `Assessor` that
//!   composes them
//! - **Models**: learned classifier / regressor behind capability traits
//! - **Report**: maintenance work-order generation, gated on severity
//! - **Context**: maintenance manual lookup that grounds the report
//! - **Config**: TOML configuration with validation

pub mod config;
pub mod context;
pub mod engine;
pub mod models;
pub mod report;
pub mod types;

pub use config::{ConfigError, SentinelConfig, Thresholds};
pub use engine::{AssessError, Assessor, EngineHandle, ErrorKind};
pub use models::{HealthClassifier, ModelError, ModelSet, RulRegressor};
pub use report::{ReportComposer, ReportError, ReportGenerator};
pub use types::{AssessmentResult, EvidenceTrace, FeatureError, FeatureSet, HealthState, RawEvidence};
