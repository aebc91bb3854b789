// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential breadth-first expansion over a FIFO worklist.
//!
//! The root is the only initial entry. Each popped document runs the full
//! [`NodePipeline`]; its children are appended to the back of the queue, so every
//! document of depth `n` is popped before any document of depth `n + 1`.
//! Documents with no children are leaves and receive the root's provenance.
//! Any failure discards only the node it happened at.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use ingestor::backends::local::TerminalProcessor;
//! use ingestor::config::{Limits, ProcessorRegistry};
//! use ingestor::document::{Document, Format, Provenance};
//! use ingestor::engine::WorkQueueExecutor;
//! use ingestor::traits::{AcceptAll, ExpansionExecutor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProcessorRegistry::new();
//! registry.register(Arc::new(TerminalProcessor::new()), "leaf");
//!
//! let executor = WorkQueueExecutor::new(Limits::default(), Arc::new(AcceptAll));
//! let root = Document::new(Format::Json, "leaf", r#"{"ok":true}"#, Provenance::new("upload"));
//!
//! let outcome = executor.expand(registry.snapshot(), root).await?;
//! assert_eq!(outcome.leaves.len(), 1);
//! assert!(outcome.discarded.is_empty());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::{Limits, ProcessorMap};
use crate::document::Document;
use crate::engine::outcome::ExpansionOutcome;
use crate::engine::pipeline::NodePipeline;
use crate::engine::worklist::{ExpansionState, WorkItem};
use crate::errors::ExpansionError;
use crate::observability::messages::engine::{
    ExpansionCancelled, ExpansionCompleted, ExpansionStarted, QueueDepth,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{AcceptAll, ExpansionExecutor, TrustPolicy};

const STRATEGY: &str = "work_queue";

/// Single-threaded FIFO worklist executor.
pub struct WorkQueueExecutor {
    pipeline: NodePipeline,
    limits: Limits,
}

impl WorkQueueExecutor {
    pub fn new(limits: Limits, policy: Arc<dyn TrustPolicy>) -> Self {
        Self {
            pipeline: NodePipeline::new(policy),
            limits,
        }
    }
}

impl Default for WorkQueueExecutor {
    fn default() -> Self {
        Self::new(Limits::default(), Arc::new(AcceptAll))
    }
}

#[async_trait]
impl ExpansionExecutor for WorkQueueExecutor {
    async fn expand_with_cancellation(
        &self,
        processors: ProcessorMap,
        root: Document,
        cancel: CancellationToken,
    ) -> Result<ExpansionOutcome, ExpansionError> {
        let start_time = Instant::now();
        let started = ExpansionStarted {
            strategy: STRATEGY,
            root_type: root.doc_type.as_str(),
            processor_count: processors.len(),
        };
        started.log();
        let span = started.span("work_queue_expansion");

        let mut state = ExpansionState::new(&root, self.limits);
        let mut queue = VecDeque::from([WorkItem::root(root)]);

        while !queue.is_empty() {
            if cancel.is_cancelled() {
                return Err(cancelled(&state));
            }
            QueueDepth {
                remaining: queue.len(),
            }
            .log();

            let Some(item) = queue.pop_front() else {
                break;
            };

            // A stalled processor must not outlive cancellation.
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(&state)),
                result = self
                    .pipeline
                    .run(&processors, &item.document)
                    .instrument(span.clone()) => result,
            };

            queue.extend(state.settle(item, result));
        }

        let processed = state.processed();
        let outcome = state.finish();
        ExpansionCompleted {
            strategy: STRATEGY,
            processed,
            leaf_count: outcome.leaves.len(),
            discarded_count: outcome.discarded.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(outcome)
    }

    fn strategy(&self) -> &'static str {
        STRATEGY
    }
}

fn cancelled(state: &ExpansionState) -> ExpansionError {
    let processed = state.processed();
    ExpansionCancelled {
        strategy: STRATEGY,
        processed,
    }
    .log();
    ExpansionError::Cancelled { processed }
}
