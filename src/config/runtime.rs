// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalProcessorFactory;
use crate::config::{Config, ProcessorRegistry};
use crate::engine::factory::ExecutorFactory;
use crate::errors::ConfigError;
use crate::traits::ExpansionExecutor;

/// Ingestion runtime builder - registers configured processors and creates the executor.
///
/// # Examples
///
/// ```
/// use ingestor::config::{ProcessorRegistry, RuntimeBuilder};
/// use ingestor::traits::ExpansionExecutor;
///
/// let config: ingestor::config::Config = serde_yaml::from_str(
///     "processors:\n  - type: leaf\n    impl: terminal\n",
/// ).unwrap();
///
/// let registry = ProcessorRegistry::new();
/// let executor = RuntimeBuilder::from_config(&config, &registry).unwrap();
///
/// assert_eq!(registry.len(), 1);
/// assert_eq!(executor.strategy(), "work_queue");
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Register every configured processor into `registry` and build the executor.
    ///
    /// Processors are registered in configuration order, so a type listed twice
    /// ends up bound to its last entry.
    pub fn from_config(
        cfg: &Config,
        registry: &ProcessorRegistry,
    ) -> Result<Box<dyn ExpansionExecutor>, ConfigError> {
        Self::register_processors(cfg, registry)?;
        Ok(ExecutorFactory::from_config(cfg))
    }

    /// Same as [`RuntimeBuilder::from_config`], targeting the process-wide registry.
    pub fn from_config_global(cfg: &Config) -> Result<Box<dyn ExpansionExecutor>, ConfigError> {
        Self::from_config(cfg, ProcessorRegistry::global())
    }

    fn register_processors(cfg: &Config, registry: &ProcessorRegistry) -> Result<(), ConfigError> {
        // Build everything first so a bad entry leaves the registry untouched.
        let processors = cfg
            .processors
            .iter()
            .map(|p| {
                LocalProcessorFactory::create_processor(p)
                    .map(|processor| (p.doc_type.clone(), processor))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (doc_type, processor) in processors {
            registry.register(processor, doc_type);
        }
        Ok(())
    }
}
