// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Worklist bookkeeping shared by every expansion strategy.
//!
//! Both executors feed node results through [`ExpansionState::settle`], so
//! leaf emission, provenance stamping, discard logging and the hardening
//! bounds behave identically whatever the scheduling.

use std::sync::Arc;

use crate::config::Limits;
use crate::document::{Document, Fingerprint, Provenance};
use crate::engine::outcome::{DiscardedDocument, ExpansionOutcome};
use crate::errors::DiscardReason;
use crate::observability::messages::document::{DocumentDiscarded, DocumentUnpacked};
use crate::observability::messages::StructuredLog;

/// Fingerprints of a node and all of its ancestors, shared between siblings.
struct Lineage {
    fingerprint: Fingerprint,
    parent: Option<Arc<Lineage>>,
}

impl Lineage {
    fn contains(&self, fingerprint: &Fingerprint) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.fingerprint == *fingerprint {
                return true;
            }
            current = node.parent.as_deref();
        }
        false
    }
}

/// A document waiting in the worklist.
pub(crate) struct WorkItem {
    pub document: Document,
    pub depth: usize,
    lineage: Arc<Lineage>,
}

impl WorkItem {
    pub fn root(document: Document) -> Self {
        let lineage = Arc::new(Lineage {
            fingerprint: document.fingerprint(),
            parent: None,
        });
        Self {
            document,
            depth: 0,
            lineage,
        }
    }

    fn child(&self, document: Document, fingerprint: Fingerprint) -> Self {
        Self {
            document,
            depth: self.depth + 1,
            lineage: Arc::new(Lineage {
                fingerprint,
                parent: Some(Arc::clone(&self.lineage)),
            }),
        }
    }
}

/// Mutable state of one expansion: the result set, the discard log and the
/// admission budget.
pub(crate) struct ExpansionState {
    root_provenance: Provenance,
    limits: Limits,
    admitted: usize,
    processed: usize,
    outcome: ExpansionOutcome,
}

impl ExpansionState {
    pub fn new(root: &Document, limits: Limits) -> Self {
        Self {
            root_provenance: root.provenance.clone(),
            limits,
            admitted: 1,
            processed: 0,
            outcome: ExpansionOutcome::default(),
        }
    }

    /// Documents whose pipeline has completed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Record the pipeline result for `item` and return the children to enqueue.
    pub fn settle(
        &mut self,
        item: WorkItem,
        result: Result<Vec<Document>, DiscardReason>,
    ) -> Vec<WorkItem> {
        self.processed += 1;

        let children = match result {
            Ok(children) => children,
            Err(reason) => {
                self.discard(item.document, item.depth, reason);
                return Vec::new();
            }
        };

        if children.is_empty() {
            let mut leaf = item.document;
            leaf.provenance = self.root_provenance.clone();
            self.outcome.leaves.push(leaf);
            return Vec::new();
        }

        DocumentUnpacked {
            doc_type: item.document.doc_type.as_str(),
            depth: item.depth,
            child_count: children.len(),
        }
        .log();

        if self.admitted.saturating_add(children.len()) > self.limits.max_documents {
            let limit = self.limits.max_documents;
            self.discard(
                item.document,
                item.depth,
                DiscardReason::DocumentLimitExceeded { limit },
            );
            return Vec::new();
        }
        self.admitted += children.len();

        let child_depth = item.depth + 1;
        let mut admitted = Vec::with_capacity(children.len());
        for child in children {
            if child_depth > self.limits.max_depth {
                let max_depth = self.limits.max_depth;
                self.discard(
                    child,
                    child_depth,
                    DiscardReason::DepthExceeded {
                        depth: child_depth,
                        max_depth,
                    },
                );
                continue;
            }

            let fingerprint = child.fingerprint();
            if item.lineage.contains(&fingerprint) {
                self.discard(child, child_depth, DiscardReason::CycleDetected);
                continue;
            }

            admitted.push(item.child(child, fingerprint));
        }
        admitted
    }

    pub fn finish(self) -> ExpansionOutcome {
        self.outcome
    }

    fn discard(&mut self, document: Document, depth: usize, reason: DiscardReason) {
        DocumentDiscarded {
            doc_type: document.doc_type.as_str(),
            depth,
            reason: &reason,
        }
        .log();

        self.outcome.discarded.push(DiscardedDocument {
            document,
            depth,
            reason,
        });
    }
}
