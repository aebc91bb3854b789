// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::document::Document;
use crate::errors::DiscardReason;

/// A document dropped from an expansion, and why.
#[derive(Debug)]
pub struct DiscardedDocument {
    pub document: Document,
    /// Distance from the root; the root itself is depth 0.
    pub depth: usize,
    pub reason: DiscardReason,
}

/// Result of expanding one root document.
///
/// `leaves` holds every terminal document that passed all checks, in traversal
/// order, each carrying the root's provenance. `discarded` lets callers tell an
/// empty input apart from one whose branches were all rejected.
#[derive(Debug, Default)]
pub struct ExpansionOutcome {
    pub leaves: Vec<Document>,
    pub discarded: Vec<DiscardedDocument>,
}

impl ExpansionOutcome {
    pub fn is_fully_trusted(&self) -> bool {
        self.discarded.is_empty()
    }

    /// Discards whose reason has the given [`DiscardReason::kind`] label.
    pub fn discarded_by_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a DiscardedDocument> + 'a {
        self.discarded
            .iter()
            .filter(move |discard| discard.reason.kind() == kind)
    }
}
