// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::ProcessorMap;
use crate::document::Document;
use crate::errors::DiscardReason;
use crate::traits::{AcceptAll, DocumentProcessor, TrustInfo, TrustPolicy};

/// The validate-then-unpack protocol applied to a single worklist node.
///
/// Stages run in a fixed order and stop at the first failure:
/// format, processor lookup, schema, trust, trust policy, unpack. The pipeline
/// touches no shared mutable state, so any number of nodes may run it at once.
#[derive(Clone)]
pub struct NodePipeline {
    policy: Arc<dyn TrustPolicy>,
}

impl Default for NodePipeline {
    fn default() -> Self {
        Self::new(Arc::new(AcceptAll))
    }
}

impl NodePipeline {
    pub fn new(policy: Arc<dyn TrustPolicy>) -> Self {
        Self { policy }
    }

    /// Run every stage up to, but not including, unpacking.
    pub async fn validate(
        &self,
        processors: &ProcessorMap,
        document: &Document,
    ) -> Result<TrustInfo, DiscardReason> {
        self.validated_processor(processors, document)
            .await
            .map(|(_, trust)| trust)
    }

    /// Run the full pipeline, returning the document's children.
    ///
    /// `Ok(vec![])` means the document is a leaf.
    pub async fn run(
        &self,
        processors: &ProcessorMap,
        document: &Document,
    ) -> Result<Vec<Document>, DiscardReason> {
        let (processor, _trust) = self.validated_processor(processors, document).await?;
        processor.unpack(document).await.map_err(DiscardReason::Unpack)
    }

    async fn validated_processor(
        &self,
        processors: &ProcessorMap,
        document: &Document,
    ) -> Result<(Arc<dyn DocumentProcessor>, TrustInfo), DiscardReason> {
        document.format.validate(document.payload())?;

        let processor = processors
            .get(&document.doc_type)
            .cloned()
            .ok_or_else(|| DiscardReason::UnregisteredType(document.doc_type.clone()))?;

        processor
            .validate_schema(document)
            .await
            .map_err(DiscardReason::Schema)?;

        let trust = processor
            .validate_trust_information(document)
            .await
            .map_err(DiscardReason::Trust)?;

        self.policy
            .evaluate(document, &trust)
            .map_err(DiscardReason::PolicyRejected)?;

        Ok((processor, trust))
    }
}
