//! bearing-sentinel - bearing condition assessment CLI
//!
//! # Usage
//!
//! ```bash
//! # Assess a feature set from flags
//! bearing-sentinel assess --rms 0.31 --std-dev 0.22 --max-amp 1.05 --kurtosis 3.4 --skewness 0.02
//!
//! # Assess JSON from a file or stdin
//! bearing-sentinel assess --input features.json
//! echo '{"RMS":0.5,"Std_Dev":0.3,"Max_Amp":1.9,"Kurtosis":6.1,"Skewness":0.1}' | bearing-sentinel assess
//!
//! # Validate configuration
//! bearing-sentinel --config sentinel.toml check-config
//! ```
//!
//! # Environment Variables
//!
//! - `SENTINEL_CONFIG`: config file path (default: ./sentinel.toml)
//! - `GROQ_API_KEY`: report API key (name configurable via `report.api_key_env`)
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use bearing_sentinel::config::{defaults, validation};
use bearing_sentinel::context;
use bearing_sentinel::{Assessor, ErrorKind, FeatureSet, ModelSet, SentinelConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "bearing-sentinel")]
#[command(about = "Hybrid condition assessment for rolling bearings")]
#[command(version)]
struct CliArgs {
    /// Config file (overrides SENTINEL_CONFIG and ./sentinel.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Assess one feature set and print the result as JSON
    Assess(AssessArgs),

    /// Load and validate the configuration
    CheckConfig,

    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(clap::Args, Debug)]
struct AssessArgs {
    /// JSON file holding the feature set (reads stdin when no input is given)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["rms", "std_dev", "max_amp", "kurtosis", "skewness"])]
    input: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    rms: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    std_dev: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_amp: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    kurtosis: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    skewness: Option<f64>,
}

impl AssessArgs {
    fn read_features(&self) -> Result<FeatureSet> {
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return parse_features(&raw);
        }

        match (self.rms, self.std_dev, self.max_amp, self.kurtosis, self.skewness) {
            (Some(rms), Some(std_dev), Some(max_amp), Some(kurtosis), Some(skewness)) => {
                Ok(FeatureSet::new(rms, std_dev, max_amp, kurtosis, skewness))
            }
            (None, None, None, None, None) => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .context("Failed to read feature set from stdin")?;
                parse_features(&raw)
            }
            _ => bail!("--rms, --std-dev, --max-amp, --kurtosis and --skewness must be given together"),
        }
    }
}

fn parse_features(raw: &str) -> Result<FeatureSet> {
    serde_json::from_str(raw).context("Invalid feature set JSON")
}

// ============================================================================
// Configuration
// ============================================================================

/// Config file to use, if any: --config, then $SENTINEL_CONFIG, then ./sentinel.toml.
fn config_path(cli: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = cli {
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(defaults::CONFIG_ENV_VAR) {
        return Some(PathBuf::from(p));
    }
    let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
    local.exists().then_some(local)
}

fn load_config(cli: Option<&Path>) -> Result<SentinelConfig> {
    match cli {
        Some(path) => SentinelConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => SentinelConfig::load().context("Failed to load configuration"),
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn run_assess(args: &AssessArgs, config_file: Option<&Path>) -> Result<ExitCode> {
    let config = load_config(config_file)?;
    info!(
        equipment = %config.equipment.name,
        models = ?config.models.backend,
        report = ?config.report.backend,
        "Starting assessment"
    );

    let assessor = Assessor::from_config(&config).context("Invalid thresholds")?;
    if !assessor.models().is_ready() {
        warn!(backend = ?config.models.backend, "Models unavailable, assessments will fail");
    }
    let features = args.read_features()?;

    match assessor.assess(&features).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, kind = ?e.kind(), "Assessment failed");
            eprintln!("error: {e}");
            Ok(match e.kind() {
                ErrorKind::BadRequest => ExitCode::from(2),
                ErrorKind::ServiceUnavailable => ExitCode::from(3),
            })
        }
    }
}

fn run_check_config(config_file: Option<&Path>) -> Result<ExitCode> {
    let Some(path) = config_path(config_file) else {
        let config = SentinelConfig::default();
        config.validate()?;
        println!("No config file found; built-in defaults are in effect and valid.");
        print_readiness(&config);
        return Ok(ExitCode::SUCCESS);
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let warnings = validation::validate_unknown_keys(&raw);
    for w in &warnings {
        println!("warning: {w}");
    }

    match SentinelConfig::load_from_file(&path) {
        Ok(config) => {
            println!(
                "{}: OK ({} warning(s), equipment {})",
                path.display(),
                warnings.len(),
                config.equipment.name
            );
            print_readiness(&config);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}: {e}", path.display());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Report whether the configured models and manual can actually be used.
fn print_readiness(config: &SentinelConfig) {
    let models = ModelSet::from_config(&config.models);
    println!(
        "models ({:?}): {}",
        config.models.backend,
        if models.is_ready() { "ready" } else { "UNAVAILABLE" }
    );
    let manual = context::from_config(&config.knowledge);
    println!(
        "manual ({}): {}",
        manual.store_name(),
        if manual.is_healthy() { "ready" } else { "EMPTY" }
    );
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let config_file = args.config.as_deref();
    match &args.command {
        SubCommand::Assess(assess) => run_assess(assess, config_file).await,
        SubCommand::CheckConfig => run_check_config(config_file),
        SubCommand::DefaultConfig => {
            print!("{}", SentinelConfig::default().to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
