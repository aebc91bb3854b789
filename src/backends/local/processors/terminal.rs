// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;

use crate::document::Document;
use crate::errors::ProcessorError;
use crate::traits::{DocumentProcessor, TrustInfo};

/// Terminal processor - accepts any well-formed document and never unpacks it.
///
/// Reports the payload's blake3 digest as trust information so policies and
/// callers can pin leaves to exact content.
pub struct TerminalProcessor;

impl TerminalProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentProcessor for TerminalProcessor {
    async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
        Ok(())
    }

    async fn validate_trust_information(
        &self,
        document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        Ok(TrustInfo::from([
            ("processor".to_string(), json!(self.name())),
            (
                "payload_digest".to_string(),
                json!(format!("blake3:{}", blake3::hash(document.payload()))),
            ),
        ]))
    }

    async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}
