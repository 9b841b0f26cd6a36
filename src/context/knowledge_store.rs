//! Manual lookup trait and the in-process backends
//!
//! - `StaticManual`: keyword search over the built-in bearing snippets
//! - `ManualIndex`: keyword search over an operator-supplied manual file
//! - `NoOpStore`: returns empty results (no manual available)

use super::bearing_manual;
use super::manual_index::ManualIndex;
use crate::config::KnowledgeConfig;
use std::path::Path;
use tracing::{info, warn};

/// Trait for manual lookup backends
///
/// Shared across concurrent assessments, so implementations must be
/// Send + Sync. Empty results are valid.
pub trait ManualLookup: Send + Sync {
    /// Return the snippets most relevant to `query`, best first
    fn search(&self, query: &str) -> Vec<String>;

    /// Get the store name for logging and health checks
    fn store_name(&self) -> &'static str;

    /// Check if the store is healthy and available
    fn is_healthy(&self) -> bool;
}

/// Store that never returns anything
pub struct NoOpStore;

impl ManualLookup for NoOpStore {
    fn search(&self, _query: &str) -> Vec<String> {
        Vec::new()
    }

    fn store_name(&self) -> &'static str {
        "NoOp"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// Keyword search over the built-in bearing maintenance snippets
pub struct StaticManual {
    max_results: usize,
}

impl StaticManual {
    pub const fn new(max_results: usize) -> Self {
        Self { max_results }
    }
}

impl ManualLookup for StaticManual {
    fn search(&self, query: &str) -> Vec<String> {
        bearing_manual::search_with_limit(query, self.max_results)
    }

    fn store_name(&self) -> &'static str {
        "StaticManual"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// Build the configured lookup backend.
///
/// An unreadable manual file falls back to the built-in snippets.
pub fn from_config(config: &KnowledgeConfig) -> Box<dyn ManualLookup> {
    if config.manual_path.is_empty() {
        return Box::new(StaticManual::new(config.max_results));
    }

    let path = Path::new(&config.manual_path);
    match ManualIndex::load(path, config.max_results) {
        Ok(index) => {
            info!(
                path = %path.display(),
                paragraphs = index.len(),
                "Maintenance manual indexed"
            );
            Box::new(index)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to read maintenance manual, using built-in snippets"
            );
            Box::new(StaticManual::new(config.max_results))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_noop_store() {
        let store = NoOpStore;
        assert!(store.search("anything").is_empty());
        assert!(store.is_healthy());
        assert_eq!(store.store_name(), "NoOp");
    }

    #[test]
    fn test_static_manual_respects_limit() {
        let store = StaticManual::new(2);
        let results = store.search("State: Failure, RMS: 0.612, Kurtosis: 7.400");
        assert!(!results.is_empty());
        assert!(results.len() <= 2);
        assert_eq!(store.store_name(), "StaticManual");
    }

    #[test]
    fn test_from_config_defaults_to_builtin() {
        let store = from_config(&KnowledgeConfig::default());
        assert_eq!(store.store_name(), "StaticManual");
    }

    #[test]
    fn test_from_config_missing_file_falls_back() {
        let config = KnowledgeConfig {
            manual_path: "/nonexistent/manual.txt".to_string(),
            ..KnowledgeConfig::default()
        };
        assert_eq!(from_config(&config).store_name(), "StaticManual");
    }

    #[test]
    fn test_from_config_loads_manual() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Replace the bearing when kurtosis stays high.").unwrap();
        let config = KnowledgeConfig {
            manual_path: file.path().display().to_string(),
            max_results: 1,
        };
        let store = from_config(&config);
        assert_eq!(store.store_name(), "ManualIndex");
        assert_eq!(store.search("kurtosis").len(), 1);
    }

    #[test]
    fn test_blank_manual_reports_unhealthy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n   \n").unwrap();
        let config = KnowledgeConfig {
            manual_path: file.path().display().to_string(),
            max_results: 1,
        };
        let store = from_config(&config);
        assert_eq!(store.store_name(), "ManualIndex");
        assert!(!store.is_healthy());
        assert!(store.search("kurtosis").is_empty());
    }

    #[test]
    fn test_trait_object() {
        let store: Box<dyn ManualLookup> = Box::new(NoOpStore);
        assert!(store.search("test").is_empty());
        assert!(store.is_healthy());
    }
}
