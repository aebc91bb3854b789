// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::ProcessorMap;
use crate::document::DocumentType;
use crate::observability::messages::registry::{ProcessorOverwritten, ProcessorRegistered};
use crate::observability::messages::StructuredLog;
use crate::traits::DocumentProcessor;

static GLOBAL_REGISTRY: Lazy<ProcessorRegistry> = Lazy::new(ProcessorRegistry::new);

/// Mutable binding of document types to processors.
///
/// Typically populated once during startup and read-mostly afterwards. A type
/// maps to at most one processor; registering again replaces the binding for
/// every later expansion and logs a warning.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: RwLock<HashMap<DocumentType, Arc<dyn DocumentProcessor>>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, initialized empty on first use.
    pub fn global() -> &'static ProcessorRegistry {
        &GLOBAL_REGISTRY
    }

    /// Bind `processor` to `doc_type`, returning the processor it replaced.
    pub fn register(
        &self,
        processor: Arc<dyn DocumentProcessor>,
        doc_type: impl Into<DocumentType>,
    ) -> Option<Arc<dyn DocumentProcessor>> {
        let doc_type = doc_type.into();
        let processor_name = processor.name();

        // A panic while holding the lock cannot leave the map half-updated.
        let mut processors = self
            .processors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = processors.insert(doc_type.clone(), processor);
        drop(processors);

        match &previous {
            Some(replaced) => ProcessorOverwritten {
                doc_type: doc_type.as_str(),
                previous: replaced.name(),
                replacement: processor_name,
            }
            .log(),
            None => ProcessorRegistered {
                doc_type: doc_type.as_str(),
                processor: processor_name,
            }
            .log(),
        }

        previous
    }

    pub fn lookup(&self, doc_type: &DocumentType) -> Option<Arc<dyn DocumentProcessor>> {
        self.processors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(doc_type)
            .cloned()
    }

    pub fn contains(&self, doc_type: &DocumentType) -> bool {
        self.processors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(doc_type)
    }

    pub fn len(&self) -> usize {
        self.processors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the current bindings into a frozen table for one expansion.
    pub fn snapshot(&self) -> ProcessorMap {
        ProcessorMap(
            self.processors
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        )
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProcessorRegistry").field(&self.snapshot()).finish()
    }
}

/// Register a processor in the process-wide registry.
///
/// Intended for plugin initialization; see [`ProcessorRegistry::register`].
pub fn register_document_processor(
    processor: Arc<dyn DocumentProcessor>,
    doc_type: impl Into<DocumentType>,
) {
    ProcessorRegistry::global().register(processor, doc_type);
}
