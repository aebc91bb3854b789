// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalProcessorFactory;
use crate::config::Config;
use crate::observability::messages::registry::DuplicateProcessorBinding;
use crate::observability::messages::StructuredLog;
use std::collections::HashSet;

/// Validate a configuration before any runtime is built from it.
///
/// Collects every problem instead of stopping at the first. Binding the same
/// type twice is not an error (the later binding wins, as with registry
/// re-registration) but is logged as a warning.
pub fn validate_config(cfg: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if cfg.limits.max_depth == 0 {
        errors.push("limits.max_depth must be at least 1".to_string());
    }
    if cfg.limits.max_documents == 0 {
        errors.push("limits.max_documents must be at least 1".to_string());
    }
    if cfg.executor_options.max_concurrency == Some(0) {
        errors.push("executor_options.max_concurrency must be at least 1".to_string());
    }

    let mut seen = HashSet::new();
    for (index, processor) in cfg.processors.iter().enumerate() {
        if processor.doc_type.trim().is_empty() {
            errors.push(format!("processors[{}]: document type must not be empty", index));
        } else if !seen.insert(processor.doc_type.as_str()) {
            DuplicateProcessorBinding {
                doc_type: &processor.doc_type,
            }
            .log();
        }

        if !LocalProcessorFactory::is_implementation_available(&processor.impl_) {
            errors.push(format!(
                "processors[{}]: unknown implementation '{}' (available: {})",
                index,
                processor.impl_,
                LocalProcessorFactory::list_available_implementations().join(", ")
            ));
        }
    }

    for key in &cfg.trust_policy.required_keys {
        if key.trim().is_empty() {
            errors.push("trust_policy.required_keys must not contain empty keys".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
