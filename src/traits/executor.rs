// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::ProcessorMap;
use crate::document::Document;
use crate::engine::ExpansionOutcome;
use crate::errors::ExpansionError;

#[async_trait]
pub trait ExpansionExecutor: Send + Sync {
    /// Expand `root` into its leaf documents.
    ///
    /// - `processors`: frozen type -> processor table used for the whole expansion
    /// - `root`: the ingested document; its provenance is stamped onto every leaf
    ///
    /// Returns a Result containing either:
    /// - Ok(ExpansionOutcome): surviving leaves plus a log of discarded documents
    /// - Err(ExpansionError): the expansion as a whole could not finish
    async fn expand(
        &self,
        processors: ProcessorMap,
        root: Document,
    ) -> Result<ExpansionOutcome, ExpansionError> {
        self.expand_with_cancellation(processors, root, CancellationToken::new())
            .await
    }

    /// Expand with an external cancellation signal, checked between documents.
    async fn expand_with_cancellation(
        &self,
        processors: ProcessorMap,
        root: Document,
        cancel: CancellationToken,
    ) -> Result<ExpansionOutcome, ExpansionError>;

    fn strategy(&self) -> &'static str;
}
