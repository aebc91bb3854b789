// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::document::DocumentType;
use crate::errors::{FormatError, ProcessorError};

/// Why a document was dropped from an expansion.
///
/// Every failure at a single worklist node is contained there: the node is
/// discarded with one of these reasons and traversal continues.
#[derive(Debug, Error)]
pub enum DiscardReason {
    #[error("format validation failed: {0}")]
    Format(#[from] FormatError),

    #[error("no document processor registered for type: {0}")]
    UnregisteredType(DocumentType),

    #[error("error validating document schema: {0}")]
    Schema(#[source] ProcessorError),

    #[error("error validating trust information: {0}")]
    Trust(#[source] ProcessorError),

    #[error("trust policy rejected document: {0}")]
    PolicyRejected(String),

    #[error("unable to unpack document: {0}")]
    Unpack(#[source] ProcessorError),

    #[error("document at depth {depth} exceeds maximum depth {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    #[error("document repeats one of its ancestors")]
    CycleDetected,

    #[error("unpacking would exceed the limit of {limit} documents per expansion")]
    DocumentLimitExceeded { limit: usize },
}

impl DiscardReason {
    /// Short stable label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            DiscardReason::Format(_) => "format",
            DiscardReason::UnregisteredType(_) => "unregistered_type",
            DiscardReason::Schema(_) => "schema",
            DiscardReason::Trust(_) => "trust",
            DiscardReason::PolicyRejected(_) => "policy",
            DiscardReason::Unpack(_) => "unpack",
            DiscardReason::DepthExceeded { .. } => "depth_exceeded",
            DiscardReason::CycleDetected => "cycle",
            DiscardReason::DocumentLimitExceeded { .. } => "document_limit",
        }
    }
}
