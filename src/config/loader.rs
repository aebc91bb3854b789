// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_DOCUMENTS, FALLBACK_CONCURRENCY};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure for the ingestion runtime.
///
/// It selects the expansion strategy, bounds the work a single (possibly
/// adversarial) root document can cause, configures the trust policy, and lists
/// the processors to register.
///
/// # Example
/// ```yaml
/// strategy: level
/// executor_options:
///   max_concurrency: 4
/// limits:
///   max_depth: 16
///   max_documents: 5000
/// trust_policy:
///   required_keys: [processor]
/// processors:
///   - type: envelope
///     impl: json_envelope
///   - type: leaf
///     impl: terminal
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub trust_policy: TrustPolicyConfig,
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

/// Traversal strategy for expanding a document.
///
/// # Variants
/// * `WorkQueue` - Sequential FIFO worklist, one document at a time
/// * `Level` - Breadth-first generations, each generation validated concurrently
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    WorkQueue,
    Level,
}

/// Executor-specific configuration options.
///
/// # Fields
/// * `max_concurrency` - Maximum documents validated at once by the level strategy (optional)
#[derive(Debug, Default, Deserialize)]
pub struct ExecutorOptions {
    pub max_concurrency: Option<usize>,
}

impl ExecutorOptions {
    /// Configured concurrency, or the number of available cores.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_CONCURRENCY)
        })
    }
}

/// Bounds on the work one root document may cause.
///
/// Documents are untrusted: an unpack operation may return its own input or an
/// ever-growing chain. Exceeding a bound discards the offending documents; it
/// never fails the expansion.
///
/// # Fields
/// * `max_depth` - Deepest level below the root that is still processed
/// * `max_documents` - Total documents admitted to one expansion, root included
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_documents() -> usize {
    DEFAULT_MAX_DOCUMENTS
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_documents: DEFAULT_MAX_DOCUMENTS,
        }
    }
}

/// Trust policy applied to the metadata returned by each processor.
///
/// An empty `required_keys` list accepts everything that passed trust validation.
#[derive(Debug, Default, Deserialize)]
pub struct TrustPolicyConfig {
    #[serde(default)]
    pub required_keys: Vec<String>,
}

/// Binding of one document type to a built-in processor implementation.
///
/// # Example
/// ```yaml
/// type: "https://example.com/attestation/v1"
/// impl: json_envelope
/// ```
///
/// Built-in processors take no settings; unknown keys fail parsing.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(rename = "impl")]
    pub impl_: String,
}

/// Load a config from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Load and validate a config file.
///
/// Rejects configurations whose limits or concurrency are zero, or whose
/// processor bindings name an empty type or an unknown implementation.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
strategy: level
processors:
  - type: envelope
    impl: json_envelope
  - type: leaf
    impl: terminal
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.strategy, Strategy::Level);
        assert_eq!(cfg.processors.len(), 2);
        assert_eq!(cfg.processors[0].doc_type, "envelope");
        assert_eq!(cfg.processors[1].impl_, "terminal");
    }

    #[test]
    fn test_defaults_when_sections_absent() {
        let cfg: Config = serde_yaml::from_str("processors: []").unwrap();

        assert_eq!(cfg.strategy, Strategy::WorkQueue);
        assert_eq!(cfg.limits, Limits::default());
        assert_eq!(cfg.limits.max_depth, 32);
        assert_eq!(cfg.limits.max_documents, 10_000);
        assert!(cfg.trust_policy.required_keys.is_empty());
        assert!(cfg.executor_options.max_concurrency.is_none());
    }

    #[test]
    fn test_limits_partial_override() {
        let yaml = r#"
limits:
  max_depth: 4
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.limits.max_depth, 4);
        assert_eq!(cfg.limits.max_documents, 10_000);
    }

    #[test]
    fn test_processor_options_are_rejected() {
        let yaml = r#"
processors:
  - type: envelope
    impl: json_envelope
    options:
      mode: strict
"#;

        let err = serde_yaml::from_str::<Config>(yaml).unwrap_err();
        assert!(err.to_string().contains("options"), "unexpected error: {}", err);
    }

    #[test]
    fn test_effective_concurrency() {
        let configured = ExecutorOptions {
            max_concurrency: Some(3),
        };
        assert_eq!(configured.effective_concurrency(), 3);
        assert!(ExecutorOptions::default().effective_concurrency() >= 1);
    }

    #[test]
    fn test_load_toml_config() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
strategy = "level"

[limits]
max_documents = 50

[trust_policy]
required_keys = ["processor"]

[[processors]]
type = "leaf"
impl = "terminal"
"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.strategy, Strategy::Level);
        assert_eq!(cfg.limits.max_documents, 50);
        assert_eq!(cfg.limits.max_depth, 32);
        assert_eq!(cfg.trust_policy.required_keys, vec!["processor"]);
        assert_eq!(cfg.processors[0].doc_type, "leaf");
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedExtension(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/ingestor.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
