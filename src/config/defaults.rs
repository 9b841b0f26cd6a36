//! System-wide default constants.
//!
//! Grouped by subsystem. Threshold defaults come from the statistical
//! baseline of the reference run-to-failure dataset (healthy mean ~0.075 g).

// ============================================================================
// SPC Thresholds
// ============================================================================

/// RMS at/above which the threshold stage leaves Normal (~2.5x baseline).
pub const WARNING_RMS: f64 = 0.18;

/// RMS at/above which the threshold stage enters Failure (~6x baseline).
pub const FAILURE_RMS: f64 = 0.45;

/// Kurtosis above which the impulsive-fault override fires.
pub const CRITICAL_KURTOSIS: f64 = 5.0;

// ============================================================================
// RUL Bands (hours)
// ============================================================================

/// Life of the reference bearing from first record to failure.
pub const DATASET_MAX_RUL_HOURS: f64 = 984.0;

pub const WARNING_RUL_FLOOR_HOURS: f64 = 48.0;

pub const WARNING_RUL_CEILING_HOURS: f64 = 500.0;

pub const FAILURE_RUL_CAP_HOURS: f64 = 48.0;

// ============================================================================
// Collaborators
// ============================================================================

/// Default OpenAI-compatible chat completions endpoint.
pub const REPORT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const REPORT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the report service API key.
pub const REPORT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Low temperature keeps work orders factual.
pub const REPORT_TEMPERATURE: f64 = 0.4;

pub const REPORT_MAX_TOKENS: u32 = 1024;

pub const REPORT_HTTP_TIMEOUT_SECS: u64 = 60;

pub const MODEL_HTTP_TIMEOUT_SECS: u64 = 10;

pub const MODEL_BUNDLE_PATH: &str = "models/bearing_models.json";

/// Manual snippets passed to the report generator per request.
pub const MANUAL_MAX_RESULTS: usize = 1;

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "SENTINEL_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sentinel.toml";
