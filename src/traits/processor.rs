// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;

use crate::document::Document;
use crate::errors::ProcessorError;

/// Trust metadata extracted by a processor, e.g. signer identities or digests.
pub type TrustInfo = HashMap<String, serde_json::Value>;

/// Capability every document type must supply.
///
/// The engine invokes the three operations in a fixed order (schema, trust,
/// unpack) and never inspects the processor beyond them. Implementations face
/// untrusted input and must not panic on malformed payloads.
#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    /// Structural/semantic check of the payload against the type's schema.
    async fn validate_schema(&self, document: &Document) -> Result<(), ProcessorError>;

    /// Verify authenticity and integrity, returning the trust metadata found.
    async fn validate_trust_information(
        &self,
        document: &Document,
    ) -> Result<TrustInfo, ProcessorError>;

    /// Decompose a container into its children. An empty list marks the
    /// document as terminal.
    async fn unpack(&self, document: &Document) -> Result<Vec<Document>, ProcessorError>;

    fn name(&self) -> &'static str;
}
