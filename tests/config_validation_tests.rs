//! Config Validation Tests
//!
//! Typo detection and range validation for `sentinel.toml`, exercised
//! independently from the engine.

use bearing_sentinel::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use bearing_sentinel::config::{ConfigError, ModelBackend, ReportBackend, SentinelConfig};
use bearing_sentinel::HealthState;
use std::io::Write;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_threshold_warns_with_suggestion() {
    let toml_str = r#"
[thresholds]
critical_kurtosys = 6.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("critical_kurtosys"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("thresholds.critical_kurtosis")
    );
}

#[test]
fn typo_in_section_name_warns() {
    let toml_str = r#"
[treshold]
warning_rms = 0.2
"#;
    let warnings = validate_unknown_keys(toml_str);
    // Both the section and the key beneath it are unknown
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.field == "treshold"));
}

#[test]
fn unrelated_key_has_no_suggestion() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("completely_unrelated_key", &known), None);
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[equipment]
name = "PUMP-7-DE"
location = "Line 3"

[thresholds]
warning_rms = 0.2
failure_rms = 0.5
critical_kurtosis = 5.5

[models]
backend = "fixed"
fixed_state = "Warning"
fixed_rul_hours = 120.0

[report]
backend = "template"

[knowledge]
max_results = 2
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());

    let config = SentinelConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.equipment.name, "PUMP-7-DE");
    assert_eq!(config.thresholds.warning_rms, 0.2);
    assert_eq!(config.thresholds.dataset_max_rul_hours, 984.0);
    assert_eq!(config.models.backend, ModelBackend::Fixed);
    assert_eq!(config.models.fixed_state, HealthState::Warning);
    assert_eq!(config.report.backend, ReportBackend::Template);
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let config = SentinelConfig::from_toml_str("[thresholds]\nwarnig_rms = 0.3\n").unwrap();
    // Misspelled key is ignored; default stays in effect
    assert_eq!(config.thresholds.warning_rms, 0.18);
}

// ============================================================================
// Range Validation
// ============================================================================

fn validation_errors(toml_str: &str) -> Vec<String> {
    match SentinelConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn zero_failure_rms_is_fatal() {
    let errors = validation_errors("[thresholds]\nfailure_rms = 0.0\n");
    assert!(errors.iter().any(|e| e.contains("failure_rms")));
}

#[test]
fn zero_critical_kurtosis_is_fatal() {
    let errors = validation_errors("[thresholds]\ncritical_kurtosis = 0.0\n");
    assert!(errors.iter().any(|e| e.contains("critical_kurtosis")));
}

#[test]
fn non_finite_threshold_is_fatal() {
    let errors = validation_errors("[thresholds]\nwarning_rms = nan\n");
    assert!(errors.iter().any(|e| e.contains("warning_rms must be finite")));
}

#[test]
fn all_violations_reported_together() {
    let errors = validation_errors(
        r#"
[thresholds]
warning_rms = 0.6
failure_rms = 0.45
warning_rul_floor_hours = 600.0

[report]
temperature = 3.0
max_tokens = 0

[knowledge]
max_results = 0
"#,
    );
    assert!(errors.len() >= 5, "got {errors:?}");
}

#[test]
fn remote_models_need_endpoint() {
    let errors = validation_errors("[models]\nbackend = \"remote\"\n");
    assert!(errors.iter().any(|e| e.contains("models.endpoint")));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_from_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let original = SentinelConfig::default();
    write!(file, "{}", original.to_toml().unwrap()).unwrap();

    let loaded = SentinelConfig::load_from_file(file.path()).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[thresholds\nwarning_rms = ").unwrap();
    let err = SentinelConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

/// The only test in this binary that touches `SENTINEL_CONFIG`; all cases
/// run in sequence so the variable is never shared across threads.
#[test]
fn env_config_errors_refuse_to_start() {
    let env = bearing_sentinel::config::defaults::CONFIG_ENV_VAR;

    let mut invalid = tempfile::NamedTempFile::new().unwrap();
    write!(invalid, "[thresholds]\nfailure_rms = 0.0\n").unwrap();
    std::env::set_var(env, invalid.path());
    let err = SentinelConfig::load().unwrap_err();
    match &err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("failure_rms")), "got {errors:?}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut malformed = tempfile::NamedTempFile::new().unwrap();
    write!(malformed, "[thresholds\n").unwrap();
    std::env::set_var(env, malformed.path());
    assert!(matches!(SentinelConfig::load(), Err(ConfigError::Parse { .. })));

    std::env::set_var(env, "/nonexistent/sentinel.toml");
    assert!(matches!(SentinelConfig::load(), Err(ConfigError::Io { .. })));

    let mut valid = tempfile::NamedTempFile::new().unwrap();
    write!(valid, "[thresholds]\nfailure_rms = 0.5\n").unwrap();
    std::env::set_var(env, valid.path());
    let config = SentinelConfig::load().unwrap();
    assert_eq!(config.thresholds.failure_rms, 0.5);
    assert!(bearing_sentinel::Assessor::from_config(&config).is_ok());

    std::env::remove_var(env);
}

#[test]
fn example_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("sentinel.example.toml");
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(validate_unknown_keys(&raw).is_empty());
    assert_eq!(SentinelConfig::load_from_file(&path).unwrap(), SentinelConfig::default());
}
