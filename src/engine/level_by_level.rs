// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span};

use crate::config::{Limits, ProcessorMap};
use crate::document::Document;
use crate::engine::outcome::ExpansionOutcome;
use crate::engine::pipeline::NodePipeline;
use crate::engine::worklist::{ExpansionState, WorkItem};
use crate::errors::{DiscardReason, ExpansionError};
use crate::observability::messages::engine::{
    ExpansionCancelled, ExpansionCompleted, ExpansionStarted, GenerationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{AcceptAll, ExpansionExecutor, TrustPolicy};

const STRATEGY: &str = "level";

type NodeResult = Result<Vec<Document>, DiscardReason>;

/// Level-by-Level executor that validates each generation of documents concurrently.
///
/// A generation is every document at the same depth below the root. All of its
/// documents run the [`NodePipeline`] in parallel (bounded by `max_concurrency`),
/// and the executor synchronizes only at the generation boundary, where results
/// are settled in worklist order. Leaves, discards and the next generation are
/// therefore ordered exactly as the sequential work queue would order them; only
/// the wall-clock interleaving of processor calls differs.
///
/// ## Concurrency Control
/// - A `tokio::sync::Semaphore` limits in-flight pipelines within a generation
/// - The processor table is shared through `Arc`, never mutated during expansion
/// - Cancellation is observed between generations and by every in-flight pipeline
pub struct LevelByLevelExecutor {
    /// Maximum number of documents validated at once within a generation
    max_concurrency: usize,
    pipeline: Arc<NodePipeline>,
    limits: Limits,
}

impl LevelByLevelExecutor {
    pub fn new(max_concurrency: usize, limits: Limits, policy: Arc<dyn TrustPolicy>) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1), // Ensure at least 1
            pipeline: Arc::new(NodePipeline::new(policy)),
            limits,
        }
    }

    /// Create an executor with default limits, accepting all trust information,
    /// using one task per available core.
    pub fn with_available_parallelism() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(crate::config::consts::FALLBACK_CONCURRENCY);
        Self::new(concurrency, Limits::default(), Arc::new(AcceptAll))
    }

    /// Run the pipeline for every document of one generation.
    ///
    /// Results are returned in generation order regardless of completion order.
    /// Returns `Ok(None)` when cancellation interrupted the generation.
    async fn execute_generation(
        &self,
        generation: Vec<WorkItem>,
        processors: &Arc<ProcessorMap>,
        cancel: &CancellationToken,
        span: &Span,
    ) -> Result<Option<Vec<(WorkItem, NodeResult)>>, ExpansionError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut items = Vec::with_capacity(generation.len());

        for (index, item) in generation.into_iter().enumerate() {
            let document = item.document.clone(); // payload is shared, not copied
            let pipeline = Arc::clone(&self.pipeline);
            let processors = Arc::clone(processors);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(
                async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        ExpansionError::Internal {
                            message: format!(
                                "Failed to acquire semaphore permit for '{}' document: {}",
                                document.doc_type, e
                            ),
                        }
                    })?;

                    let result = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => None,
                        result = pipeline.run(&processors, &document) => Some(result),
                    };
                    Ok::<_, ExpansionError>((index, result))
                }
                .instrument(span.clone()),
            );
            items.push(item);
        }

        // Early returns drop `tasks`, which aborts every pipeline still running.
        let mut slots: Vec<Option<NodeResult>> = items.iter().map(|_| None).collect();
        let mut interrupted = false;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((index, Some(result)))) => slots[index] = Some(result),
                Ok(Ok((_, None))) => interrupted = true,
                Ok(Err(e)) => return Err(e),
                Err(join_error) => {
                    return Err(ExpansionError::Internal {
                        message: format!("Task join error: {}", join_error),
                    });
                }
            }
        }

        if interrupted {
            return Ok(None);
        }

        items
            .into_iter()
            .zip(slots)
            .map(|(item, slot)| {
                slot.map(|result| (item, result))
                    .ok_or_else(|| ExpansionError::Internal {
                        message: "generation task finished without a result".to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
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
}

#[async_trait]
impl ExpansionExecutor for LevelByLevelExecutor {
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
        let span = started.span("level_expansion");

        let processors = Arc::new(processors);
        let mut state = ExpansionState::new(&root, self.limits);
        let mut generation = vec![WorkItem::root(root)];
        let mut level = 0;

        while !generation.is_empty() {
            if cancel.is_cancelled() {
                return Err(Self::cancelled(&state));
            }
            GenerationStarted {
                level,
                size: generation.len(),
                max_concurrency: self.max_concurrency,
            }
            .log();

            let Some(results) = self
                .execute_generation(generation, &processors, &cancel, &span)
                .await?
            else {
                return Err(Self::cancelled(&state));
            };

            let mut next_generation = Vec::new();
            for (item, result) in results {
                next_generation.extend(state.settle(item, result));
            }
            generation = next_generation;
            level += 1;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FixedChildrenProcessor, StubProcessor};
    use crate::document::{DocumentType, Format, Provenance};
    use crate::traits::{DocumentProcessor, TrustInfo};
    use crate::errors::ProcessorError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    fn json_doc(doc_type: &str, payload: &str) -> Document {
        Document::new(Format::Json, doc_type, payload, Provenance::new("inner"))
    }

    /// Terminal processor that records how many unpacks overlap in time.
    struct ConcurrencyProbe {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ConcurrencyProbe {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentProcessor for ConcurrencyProbe {
        async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
            Ok(())
        }

        async fn validate_trust_information(
            &self,
            _document: &Document,
        ) -> Result<TrustInfo, ProcessorError> {
            Ok(TrustInfo::new())
        }

        async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "concurrency_probe"
        }
    }

    fn fan_out(width: usize, probe: Arc<ConcurrencyProbe>) -> ProcessorMap {
        let children = (0..width)
            .map(|i| json_doc("probe", &i.to_string()))
            .collect();
        let mut processors = ProcessorMap::new();
        processors.insert(
            DocumentType::from("envelope"),
            Arc::new(FixedChildrenProcessor::new(children)),
        );
        processors.insert(DocumentType::from("probe"), probe);
        processors
    }

    #[tokio::test]
    async fn test_single_document() {
        let mut processors = ProcessorMap::new();
        processors.insert(DocumentType::from("leaf"), Arc::new(StubProcessor::new()));
        let executor = LevelByLevelExecutor::new(2, Limits::default(), Arc::new(AcceptAll));

        let outcome = executor
            .expand(processors, json_doc("leaf", "{}"))
            .await
            .unwrap();

        assert_eq!(outcome.leaves.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_generation_runs_concurrently_within_limit() {
        let probe = Arc::new(ConcurrencyProbe::new());
        let executor = LevelByLevelExecutor::new(3, Limits::default(), Arc::new(AcceptAll));

        let outcome = executor
            .expand(fan_out(8, Arc::clone(&probe)), json_doc("envelope", "{}"))
            .await
            .unwrap();

        assert_eq!(outcome.leaves.len(), 8);
        let peak = probe.peak.load(Ordering::SeqCst);
        assert!(peak >= 2, "expected overlapping unpacks, peak was {}", peak);
        assert!(peak <= 3, "concurrency limit exceeded, peak was {}", peak);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_leaves_keep_worklist_order() {
        let probe = Arc::new(ConcurrencyProbe::new());
        let executor = LevelByLevelExecutor::new(8, Limits::default(), Arc::new(AcceptAll));

        let outcome = executor
            .expand(fan_out(6, probe), json_doc("envelope", "{}"))
            .await
            .unwrap();

        let payloads: Vec<String> = outcome
            .leaves
            .iter()
            .map(|d| String::from_utf8(d.payload().to_vec()).unwrap())
            .collect();
        assert_eq!(payloads, vec!["0", "1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let executor = LevelByLevelExecutor::new(0, Limits::default(), Arc::new(AcceptAll));
        assert_eq!(executor.max_concurrency, 1);
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_generation() {
        let probe = Arc::new(ConcurrencyProbe::new());
        let executor = LevelByLevelExecutor::new(1, Limits::default(), Arc::new(AcceptAll));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            trigger.cancel();
        });

        // 50 probes at 20ms each with concurrency 1 would take a second.
        let result = executor
            .expand_with_cancellation(fan_out(50, probe), json_doc("envelope", "{}"), cancel)
            .await;

        assert!(matches!(result, Err(ExpansionError::Cancelled { processed: 1 })));
    }

    /// Panics on unpack, standing in for a buggy plugin.
    struct PanickingProcessor;

    /// Slow remote verifier that flags when its unpack ran to completion.
    struct SlowProcessor {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl DocumentProcessor for PanickingProcessor {
        async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
            Ok(())
        }

        async fn validate_trust_information(
            &self,
            _document: &Document,
        ) -> Result<TrustInfo, ProcessorError> {
            Ok(TrustInfo::new())
        }

        async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
            panic!("processor bug");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[async_trait]
    impl DocumentProcessor for SlowProcessor {
        async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
            Ok(())
        }

        async fn validate_trust_information(
            &self,
            _document: &Document,
        ) -> Result<TrustInfo, ProcessorError> {
            Ok(TrustInfo::new())
        }

        async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_panicking_sibling_aborts_rest_of_generation() {
        let finished = Arc::new(AtomicBool::new(false));
        let mut processors = ProcessorMap::new();
        processors.insert(
            DocumentType::from("envelope"),
            Arc::new(FixedChildrenProcessor::new(vec![
                json_doc("panicking", "{}"),
                json_doc("slow", "{}"),
            ])),
        );
        processors.insert(DocumentType::from("panicking"), Arc::new(PanickingProcessor));
        processors.insert(
            DocumentType::from("slow"),
            Arc::new(SlowProcessor {
                finished: Arc::clone(&finished),
            }),
        );
        let executor = LevelByLevelExecutor::new(2, Limits::default(), Arc::new(AcceptAll));

        let result = executor
            .expand(processors, json_doc("envelope", "{}"))
            .await;

        assert!(matches!(result, Err(ExpansionError::Internal { .. })));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(
            !finished.load(Ordering::SeqCst),
            "slow pipeline kept running after the expansion failed"
        );
    }
}
