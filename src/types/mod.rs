//! Shared data structures for bearing condition assessment
//!
//! - `FeatureSet`: five vibration statistics per request
//! - `HealthState`: three-level severity verdict
//! - `RawEvidence`: learned-model opinions fed into reconciliation
//! - `AssessmentResult`: final verdict with its evidence trace

mod assessment;
mod features;
mod health;

pub use assessment::*;
pub use features::*;
pub use health::*;
