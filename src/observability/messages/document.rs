// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-document outcomes during an expansion.

use crate::errors::DiscardReason;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A container document was unpacked into children.
///
/// # Log Level
/// `debug!` - Traversal detail
pub struct DocumentUnpacked<'a> {
    pub doc_type: &'a str,
    pub depth: usize,
    pub child_count: usize,
}

impl Display for DocumentUnpacked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "unpacked '{}' document at depth {} to {} documents",
            self.doc_type, self.depth, self.child_count
        )
    }
}

impl StructuredLog for DocumentUnpacked<'_> {
    fn log(&self) {
        tracing::debug!(
            doc_type = self.doc_type,
            depth = self.depth,
            child_count = self.child_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "document_unpacked",
            span_name = name,
            doc_type = self.doc_type,
            depth = self.depth,
            child_count = self.child_count,
        )
    }
}

/// A document was dropped from the expansion.
///
/// # Log Level
/// `info!` - Untrusted input is expected to fail sometimes; the reason is also
/// returned to the caller in the discard log.
///
/// # Example
/// ```
/// use ingestor::errors::DiscardReason;
/// use ingestor::observability::messages::document::DocumentDiscarded;
///
/// let reason = DiscardReason::CycleDetected;
/// let msg = DocumentDiscarded {
///     doc_type: "envelope",
///     depth: 2,
///     reason: &reason,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "discarded 'envelope' document at depth 2 (cycle): document repeats one of its ancestors"
/// );
/// ```
pub struct DocumentDiscarded<'a> {
    pub doc_type: &'a str,
    pub depth: usize,
    pub reason: &'a DiscardReason,
}

impl Display for DocumentDiscarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "discarded '{}' document at depth {} ({}): {}",
            self.doc_type,
            self.depth,
            self.reason.kind(),
            self.reason
        )
    }
}

impl StructuredLog for DocumentDiscarded<'_> {
    fn log(&self) {
        tracing::info!(
            doc_type = self.doc_type,
            depth = self.depth,
            reason = self.reason.kind(),
            error = %self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "document_discarded",
            span_name = name,
            doc_type = self.doc_type,
            depth = self.depth,
            reason = self.reason.kind(),
        )
    }
}
