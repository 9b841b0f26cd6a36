//! Sentinel Configuration - engine thresholds and collaborator settings as TOML values
//!
//! Every threshold that the assessment engine uses is a field in this module.
//! Each struct implements `Default` with the reference values, so a missing
//! config file changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::HealthState;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one monitored component.
///
/// Load with `SentinelConfig::load()` which searches:
/// 1. `$SENTINEL_CONFIG` env var
/// 2. `./sentinel.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SentinelConfig {
    /// Component identification
    #[serde(default)]
    pub equipment: EquipmentInfo,

    /// Assessment engine thresholds
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Learned classifier / regressor source
    #[serde(default)]
    pub models: ModelsConfig,

    /// Narrative report generation
    #[serde(default)]
    pub report: ReportConfig,

    /// Maintenance manual lookup
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl SentinelConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SENTINEL_CONFIG` environment variable
    /// 2. `./sentinel.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// Defaults apply only when no file is found. A file that is found but
    /// cannot be read, parsed or validated is an error, and so is a
    /// `$SENTINEL_CONFIG` that names a missing file.
    pub fn load() -> Result<Self, ConfigError> {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            let config = Self::load_from_file(&p)?;
            info!(path = %p.display(), equipment = %config.equipment.name, "Loaded config from SENTINEL_CONFIG");
            return Ok(config);
        }

        // 2. Check ./sentinel.toml
        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!(equipment = %config.equipment.name, "Loaded config from ./sentinel.toml");
            return Ok(config);
        }

        // 3. Defaults
        info!("No sentinel.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Two passes: unknown keys are reported as warnings first, then the
    /// document is deserialized and validated.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every section, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.thresholds.collect_errors();

        let r = &self.report;
        if !r.temperature.is_finite() || !(0.0..=2.0).contains(&r.temperature) {
            errors.push(format!(
                "report.temperature ({}) must be within 0.0-2.0",
                r.temperature
            ));
        }
        if r.max_tokens == 0 {
            errors.push("report.max_tokens must be > 0".to_string());
        }
        if r.backend == ReportBackend::Chat && r.endpoint.trim().is_empty() {
            errors.push("report.endpoint must be set when report.backend = \"chat\"".to_string());
        }

        let m = &self.models;
        if m.backend == ModelBackend::Remote && m.endpoint.trim().is_empty() {
            errors.push("models.endpoint must be set when models.backend = \"remote\"".to_string());
        }
        if m.backend == ModelBackend::Fixed
            && (!m.fixed_rul_hours.is_finite() || m.fixed_rul_hours < 0.0)
        {
            errors.push(format!(
                "models.fixed_rul_hours ({}) must be a finite, non-negative number",
                m.fixed_rul_hours
            ));
        }

        if self.knowledge.max_results == 0 {
            errors.push("knowledge.max_results must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Equipment Info
// ============================================================================

/// Identification metadata - not used for logic, but appears in logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentInfo {
    /// Component name / tag
    #[serde(default = "default_equipment_name")]
    pub name: String,

    /// Plant / line location
    #[serde(default)]
    pub location: String,
}

fn default_equipment_name() -> String {
    "BEARING-1".to_string()
}

impl Default for EquipmentInfo {
    fn default() -> Self {
        Self {
            name: default_equipment_name(),
            location: String::new(),
        }
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// Read-only engine thresholds.
///
/// Constructed once and passed into every stage; never mutated while a call
/// is in flight (see `engine::EngineHandle` for explicit reconfiguration).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    /// RMS at/above which the SPC stage leaves Normal
    #[serde(default = "default_warning_rms")]
    pub warning_rms: f64,
    /// RMS at/above which the SPC stage enters Failure
    #[serde(default = "default_failure_rms")]
    pub failure_rms: f64,
    /// Kurtosis above which the impulsive-fault override fires
    #[serde(default = "default_critical_kurtosis")]
    pub critical_kurtosis: f64,
    /// Reference RUL used to floor Normal-state output
    #[serde(default = "default_dataset_max_rul")]
    pub dataset_max_rul_hours: f64,
    /// Lower RUL bound while in Warning
    #[serde(default = "default_warning_rul_floor")]
    pub warning_rul_floor_hours: f64,
    /// Upper RUL bound while in Warning
    #[serde(default = "default_warning_rul_ceiling")]
    pub warning_rul_ceiling_hours: f64,
    /// Absolute RUL ceiling while in Failure
    #[serde(default = "default_failure_rul_cap")]
    pub failure_rul_cap_hours: f64,
}

fn default_warning_rms() -> f64 { defaults::WARNING_RMS }
fn default_failure_rms() -> f64 { defaults::FAILURE_RMS }
fn default_critical_kurtosis() -> f64 { defaults::CRITICAL_KURTOSIS }
fn default_dataset_max_rul() -> f64 { defaults::DATASET_MAX_RUL_HOURS }
fn default_warning_rul_floor() -> f64 { defaults::WARNING_RUL_FLOOR_HOURS }
fn default_warning_rul_ceiling() -> f64 { defaults::WARNING_RUL_CEILING_HOURS }
fn default_failure_rul_cap() -> f64 { defaults::FAILURE_RUL_CAP_HOURS }

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_rms: default_warning_rms(),
            failure_rms: default_failure_rms(),
            critical_kurtosis: default_critical_kurtosis(),
            dataset_max_rul_hours: default_dataset_max_rul(),
            warning_rul_floor_hours: default_warning_rul_floor(),
            warning_rul_ceiling_hours: default_warning_rul_ceiling(),
            failure_rul_cap_hours: default_failure_rul_cap(),
        }
    }
}

impl Thresholds {
    /// Validate for internal consistency.
    ///
    /// Rules:
    /// - Every value must be finite
    /// - `failure_rms` and `critical_kurtosis` are divisors and must be > 0
    /// - `warning_rms` must be > 0 and not above `failure_rms`
    /// - RUL bounds must be >= 0 and the Warning band must not be inverted
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.collect_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("warning_rms", self.warning_rms),
            ("failure_rms", self.failure_rms),
            ("critical_kurtosis", self.critical_kurtosis),
            ("dataset_max_rul_hours", self.dataset_max_rul_hours),
            ("warning_rul_floor_hours", self.warning_rul_floor_hours),
            ("warning_rul_ceiling_hours", self.warning_rul_ceiling_hours),
            ("failure_rul_cap_hours", self.failure_rul_cap_hours),
        ]
    }

    fn collect_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let non_finite: Vec<String> = self
            .fields()
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, v)| format!("thresholds.{name} must be finite (got {v})"))
            .collect();
        if !non_finite.is_empty() {
            // Ordering checks below are meaningless with NaN/Inf present
            return non_finite;
        }

        // Divisors in the Failure RUL decay
        if self.failure_rms <= 0.0 {
            errors.push(format!(
                "thresholds.failure_rms = {} must be > 0 (used as divisor)",
                self.failure_rms
            ));
        }
        if self.critical_kurtosis <= 0.0 {
            errors.push(format!(
                "thresholds.critical_kurtosis = {} must be > 0 (used as divisor)",
                self.critical_kurtosis
            ));
        }

        if self.warning_rms <= 0.0 {
            errors.push(format!(
                "thresholds.warning_rms = {} must be > 0",
                self.warning_rms
            ));
        }
        if self.warning_rms > self.failure_rms {
            errors.push(format!(
                "thresholds.warning_rms ({:.3}) must be <= failure_rms ({:.3})",
                self.warning_rms, self.failure_rms
            ));
        }

        for (name, value) in &self.fields()[3..] {
            if *value < 0.0 {
                errors.push(format!("thresholds.{name} = {value} cannot be negative"));
            }
        }
        if self.warning_rul_floor_hours > self.warning_rul_ceiling_hours {
            errors.push(format!(
                "thresholds.warning_rul_floor_hours ({:.1}) must be <= warning_rul_ceiling_hours ({:.1})",
                self.warning_rul_floor_hours, self.warning_rul_ceiling_hours
            ));
        }

        errors
    }
}

// ============================================================================
// Models Config
// ============================================================================

/// Where the learned classifier and regressor come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// Serialized linear model bundle (JSON)
    #[default]
    Linear,
    /// HTTP inference service
    Remote,
    /// Constant outputs (bench testing)
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsConfig {
    #[serde(default)]
    pub backend: ModelBackend,

    /// Model bundle file for the `linear` backend
    #[serde(default = "default_bundle_path")]
    pub bundle_path: String,

    /// Base URL for the `remote` backend
    #[serde(default)]
    pub endpoint: String,

    /// HTTP timeout for remote inference calls (seconds)
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// State returned by the `fixed` backend
    #[serde(default)]
    pub fixed_state: HealthState,

    /// RUL returned by the `fixed` backend (hours)
    #[serde(default = "default_dataset_max_rul")]
    pub fixed_rul_hours: f64,
}

fn default_bundle_path() -> String { defaults::MODEL_BUNDLE_PATH.to_string() }
fn default_model_timeout() -> u64 { defaults::MODEL_HTTP_TIMEOUT_SECS }

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            bundle_path: default_bundle_path(),
            endpoint: String::new(),
            timeout_secs: default_model_timeout(),
            fixed_state: HealthState::Normal,
            fixed_rul_hours: default_dataset_max_rul(),
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

/// Narrative report generator selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportBackend {
    /// OpenAI-compatible chat completions service
    #[default]
    Chat,
    /// Deterministic offline work order
    Template,
    /// No report generation
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub backend: ReportBackend,

    /// Chat completions URL
    #[serde(default = "default_report_endpoint")]
    pub endpoint: String,

    /// Model identifier sent to the service
    #[serde(default = "default_report_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP timeout for report requests (seconds)
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,
}

fn default_report_endpoint() -> String { defaults::REPORT_ENDPOINT.to_string() }
fn default_report_model() -> String { defaults::REPORT_MODEL.to_string() }
fn default_api_key_env() -> String { defaults::REPORT_API_KEY_ENV.to_string() }
fn default_temperature() -> f64 { defaults::REPORT_TEMPERATURE }
fn default_max_tokens() -> u32 { defaults::REPORT_MAX_TOKENS }
fn default_report_timeout() -> u64 { defaults::REPORT_HTTP_TIMEOUT_SECS }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            backend: ReportBackend::default(),
            endpoint: default_report_endpoint(),
            model: default_report_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_report_timeout(),
        }
    }
}

// ============================================================================
// Knowledge Config
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeConfig {
    /// Plain-text maintenance manual; empty uses the built-in snippets
    #[serde(default)]
    pub manual_path: String,

    /// Snippets passed to the report generator per request
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { defaults::MANUAL_MAX_RESULTS }

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            manual_path: String::new(),
            max_results: default_max_results(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
