//! Shared threshold handle with explicit, atomic reconfiguration.
//!
//! Stages never read this directly; the assessor takes one snapshot per call
//! and passes `&Thresholds` down, so a reconfiguration can never change the
//! thresholds under a call already in flight.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use crate::config::{ConfigError, Thresholds};

#[derive(Debug)]
pub struct EngineHandle {
    thresholds: ArcSwap<Thresholds>,
}

impl EngineHandle {
    /// Validated construction; invalid thresholds refuse to start the engine.
    pub fn new(thresholds: Thresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds: ArcSwap::from_pointee(thresholds),
        })
    }

    /// Thresholds in effect right now.
    pub fn snapshot(&self) -> Arc<Thresholds> {
        self.thresholds.load_full()
    }

    /// Replace the thresholds for subsequent calls.
    ///
    /// Invalid thresholds are rejected and the current set stays in effect.
    pub fn reconfigure(&self, thresholds: Thresholds) -> Result<(), ConfigError> {
        thresholds.validate()?;
        let previous = self.thresholds.swap(Arc::new(thresholds));
        info!(
            warning_rms = thresholds.warning_rms,
            failure_rms = thresholds.failure_rms,
            critical_kurtosis = thresholds.critical_kurtosis,
            previous_warning_rms = previous.warning_rms,
            previous_failure_rms = previous.failure_rms,
            "Thresholds reconfigured"
        );
        Ok(())
    }
}
