// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by document processors.

use thiserror::Error;

/// Failure reported by a processor while validating or unpacking a document.
///
/// The engine does not interpret the variant; it records the error against the
/// stage that produced it (schema, trust or unpack).
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The document content violates the processor's rules.
    #[error("{0}")]
    Invalid(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A collaborator the processor depends on (e.g. a remote verifier) could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl ProcessorError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ProcessorError::Invalid(message.into())
    }
}
