// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::document::{Document, DocumentType, Format};
use crate::errors::ProcessorError;
use crate::traits::{DocumentProcessor, TrustInfo};

/// How a child's `payload` string is turned back into bytes.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum PayloadEncoding {
    #[default]
    Utf8,
    Base64,
}

#[derive(Debug, Deserialize)]
struct EnvelopeChild {
    format: Format,
    #[serde(rename = "type")]
    doc_type: DocumentType,
    payload: String,
    #[serde(default)]
    encoding: PayloadEncoding,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    children: Vec<EnvelopeChild>,
}

/// JSON container processor.
///
/// Payload shape:
///
/// ```json
/// {"children": [{"format": "JSON", "type": "claim", "payload": "{\"id\":1}"},
///               {"format": "BINARY", "type": "blob", "payload": "AAEC", "encoding": "base64"}]}
/// ```
///
/// Fields beyond `children` are ignored. Children inherit the envelope's
/// provenance unchanged.
pub struct JsonEnvelopeProcessor;

impl JsonEnvelopeProcessor {
    pub fn new() -> Self {
        Self
    }

    fn parse(document: &Document) -> Result<Envelope, ProcessorError> {
        if document.format != Format::Json {
            return Err(ProcessorError::invalid(format!(
                "envelope must be JSON, got {}",
                document.format
            )));
        }
        Ok(serde_json::from_slice(document.payload())?)
    }
}

impl Default for JsonEnvelopeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentProcessor for JsonEnvelopeProcessor {
    async fn validate_schema(&self, document: &Document) -> Result<(), ProcessorError> {
        let envelope = Self::parse(document)?;
        if let Some(index) = envelope
            .children
            .iter()
            .position(|child| child.doc_type.as_str().trim().is_empty())
        {
            return Err(ProcessorError::invalid(format!(
                "child {} has an empty type",
                index
            )));
        }
        Ok(())
    }

    async fn validate_trust_information(
        &self,
        document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        let envelope = Self::parse(document)?;
        Ok(TrustInfo::from([
            ("processor".to_string(), json!(self.name())),
            ("child_count".to_string(), json!(envelope.children.len())),
        ]))
    }

    async fn unpack(&self, document: &Document) -> Result<Vec<Document>, ProcessorError> {
        Self::parse(document)?
            .children
            .into_iter()
            .map(|child| -> Result<Document, ProcessorError> {
                let bytes = match child.encoding {
                    PayloadEncoding::Utf8 => child.payload.into_bytes(),
                    PayloadEncoding::Base64 => {
                        base64::engine::general_purpose::STANDARD.decode(child.payload)?
                    }
                };
                Ok(Document::new(
                    child.format,
                    child.doc_type,
                    bytes,
                    document.provenance.clone(),
                ))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "json_envelope"
    }
}
