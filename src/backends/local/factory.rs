// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::processors::*;
use crate::config::ProcessorConfig;
use crate::errors::ConfigError;
use crate::traits::DocumentProcessor;

/// Factory for creating local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from configuration
    ///
    /// The `impl` field in the config determines which processor to create:
    /// - "json_envelope" -> JsonEnvelopeProcessor
    /// - "terminal" -> TerminalProcessor
    pub fn create_processor(
        config: &ProcessorConfig,
    ) -> Result<Arc<dyn DocumentProcessor>, ConfigError> {
        match config.impl_.as_str() {
            "json_envelope" => Ok(Arc::new(JsonEnvelopeProcessor::new())),
            "terminal" => Ok(Arc::new(TerminalProcessor::new())),
            other => Err(ConfigError::UnknownImplementation {
                doc_type: config.doc_type.clone(),
                impl_name: other.to_string(),
            }),
        }
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["json_envelope", "terminal"]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(impl_name: &str) -> bool {
        Self::list_available_implementations().contains(&impl_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(impl_name: &str) -> ProcessorConfig {
        ProcessorConfig {
            doc_type: "claim".to_string(),
            impl_: impl_name.to_string(),
        }
    }

    #[test]
    fn test_every_listed_implementation_can_be_created() {
        for impl_name in LocalProcessorFactory::list_available_implementations() {
            let processor = LocalProcessorFactory::create_processor(&config(impl_name)).unwrap();
            assert_eq!(processor.name(), impl_name);
        }
    }

    #[test]
    fn test_unknown_implementation() {
        assert!(!LocalProcessorFactory::is_implementation_available("xml_envelope"));
        match LocalProcessorFactory::create_processor(&config("xml_envelope")) {
            Err(ConfigError::UnknownImplementation { doc_type, impl_name }) => {
                assert_eq!(doc_type, "claim");
                assert_eq!(impl_name, "xml_envelope");
            }
            other => panic!("expected UnknownImplementation, got {:?}", other.map(|p| p.name())),
        }
    }
}
