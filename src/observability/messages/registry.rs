// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor registration events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A processor was bound to a document type that had no binding.
///
/// # Log Level
/// `info!` - Startup event
pub struct ProcessorRegistered<'a> {
    pub doc_type: &'a str,
    pub processor: &'a str,
}

impl Display for ProcessorRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "registered document processor '{}' for type: {}",
            self.processor, self.doc_type
        )
    }
}

impl StructuredLog for ProcessorRegistered<'_> {
    fn log(&self) {
        tracing::info!(
            doc_type = self.doc_type,
            processor = self.processor,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_registered",
            span_name = name,
            doc_type = self.doc_type,
            processor = self.processor,
        )
    }
}

/// An existing binding was replaced; every later expansion uses the replacement.
///
/// # Log Level
/// `warn!` - Potential misconfiguration
///
/// # Example
/// ```
/// use ingestor::observability::messages::registry::ProcessorOverwritten;
///
/// let msg = ProcessorOverwritten {
///     doc_type: "envelope",
///     previous: "json_envelope",
///     replacement: "stub",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "the document processor is being overwritten: envelope (json_envelope -> stub)"
/// );
/// ```
pub struct ProcessorOverwritten<'a> {
    pub doc_type: &'a str,
    pub previous: &'a str,
    pub replacement: &'a str,
}

impl Display for ProcessorOverwritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "the document processor is being overwritten: {} ({} -> {})",
            self.doc_type, self.previous, self.replacement
        )
    }
}

impl StructuredLog for ProcessorOverwritten<'_> {
    fn log(&self) {
        tracing::warn!(
            doc_type = self.doc_type,
            previous = self.previous,
            replacement = self.replacement,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_overwritten",
            span_name = name,
            doc_type = self.doc_type,
            previous = self.previous,
            replacement = self.replacement,
        )
    }
}

/// A configuration binds the same type more than once.
///
/// # Log Level
/// `warn!` - Potential misconfiguration
pub struct DuplicateProcessorBinding<'a> {
    pub doc_type: &'a str,
}

impl Display for DuplicateProcessorBinding<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "document type '{}' is configured more than once; the last binding wins",
            self.doc_type
        )
    }
}

impl StructuredLog for DuplicateProcessorBinding<'_> {
    fn log(&self) {
        tracing::warn!(doc_type = self.doc_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "duplicate_processor_binding",
            span_name = name,
            doc_type = self.doc_type,
        )
    }
}
