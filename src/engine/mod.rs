// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The recursive expansion engine.
//!
//! [`process`] turns one root document into the flat set of leaf documents that
//! survive validation, using the process-wide registry and the sequential work
//! queue. Embedders wanting their own registry, limits, trust policy or
//! strategy use an [`ExpansionExecutor`](crate::traits::ExpansionExecutor)
//! directly.

pub mod factory;
pub mod level_by_level;
pub mod outcome;
pub mod pipeline;
pub mod work_queue;
mod worklist;

pub use factory::ExecutorFactory;
pub use level_by_level::LevelByLevelExecutor;
pub use outcome::{DiscardedDocument, ExpansionOutcome};
pub use pipeline::NodePipeline;
pub use work_queue::WorkQueueExecutor;

use crate::config::ProcessorRegistry;
use crate::document::Document;
use crate::errors::{DiscardReason, ExpansionError};
use crate::traits::{ExpansionExecutor, TrustInfo};

/// Expand `root` with the global registry, returning only the surviving leaves.
///
/// Documents that fail any check are dropped without failing the call; use
/// [`process_with_report`] to see what was dropped and why.
pub async fn process(root: Document) -> Result<Vec<Document>, ExpansionError> {
    Ok(process_with_report(root).await?.leaves)
}

/// Expand `root` with the global registry, returning leaves and the discard log.
pub async fn process_with_report(root: Document) -> Result<ExpansionOutcome, ExpansionError> {
    WorkQueueExecutor::default()
        .expand(ProcessorRegistry::global().snapshot(), root)
        .await
}

/// Validate a single document against the global registry without unpacking it.
pub async fn validate(document: &Document) -> Result<TrustInfo, DiscardReason> {
    NodePipeline::default()
        .validate(&ProcessorRegistry::global().snapshot(), document)
        .await
}
