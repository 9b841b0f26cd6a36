//! Sentinel Configuration Module
//!
//! Provides the engine thresholds and collaborator settings loaded from TOML,
//! replacing literal constants with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `SENTINEL_CONFIG` environment variable (path to TOML file)
//! 2. `sentinel.toml` in the current working directory
//! 3. Built-in defaults (the reference thresholds), only when no file is found
//!
//! A config file that exists but fails to parse or validate is an error.
//!
//! ## Usage
//!
//! Configuration is an explicit value, never process-global. Load it once at
//! startup and build the engine from it:
//!
//! ```ignore
//! let config = SentinelConfig::load()?;
//! let assessor = Assessor::from_config(&config)?;
//! ```

mod sentinel_config;
pub mod defaults;
pub mod validation;

pub use sentinel_config::*;
