// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The value object flowing through the expansion engine.
//!
//! A [`Document`] is a format/type-tagged payload plus the [`Provenance`] of the
//! root it was ingested under. The engine never interprets the payload beyond
//! checking that it is well-formed for its declared [`Format`].

mod format;
mod payload;
mod provenance;

pub use format::Format;
pub use provenance::Provenance;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Open-ended tag naming the schema and trust domain of a document.
///
/// Any processor author may mint a new type; the engine only uses it as a
/// registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentType(String);

impl DocumentType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentType {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// blake3 digest identifying a document by format, type and payload.
///
/// Provenance is deliberately excluded so a document that reappears under
/// different metadata still fingerprints the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A document awaiting (or having survived) validation and unpacking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub format: Format,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(with = "payload::base64_bytes")]
    payload: Arc<[u8]>,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Document {
    pub fn new(
        format: Format,
        doc_type: impl Into<DocumentType>,
        payload: impl Into<Vec<u8>>,
        provenance: Provenance,
    ) -> Self {
        Self {
            format,
            doc_type: doc_type.into(),
            payload: Arc::from(payload.into()),
            provenance,
        }
    }

    /// Raw payload bytes. Immutable for the lifetime of the document.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.format.wire_name().as_bytes());
        hasher.update(&[0]);
        hasher.update(self.doc_type.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(&self.payload);
        Fingerprint(*hasher.finalize().as_bytes())
    }
}
