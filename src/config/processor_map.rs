// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::document::DocumentType;
use crate::traits::DocumentProcessor;
use std::collections::HashMap;
use std::sync::Arc;

/// A frozen table mapping document types to their processors.
///
/// One `ProcessorMap` is taken from the [`ProcessorRegistry`](crate::config::ProcessorRegistry)
/// at the start of an expansion and used for all of it, so registrations made
/// while the expansion runs only affect later expansions. Cloning is cheap:
/// processors are shared through `Arc`.
#[derive(Clone, Default)]
pub struct ProcessorMap(pub HashMap<DocumentType, Arc<dyn DocumentProcessor>>);

impl ProcessorMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, doc_type: DocumentType, processor: Arc<dyn DocumentProcessor>) {
        self.0.insert(doc_type, processor);
    }

    pub fn get(&self, doc_type: &DocumentType) -> Option<&Arc<dyn DocumentProcessor>> {
        self.0.get(doc_type)
    }

    pub fn contains_key(&self, doc_type: &DocumentType) -> bool {
        self.0.contains_key(doc_type)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DocumentType> {
        self.0.keys()
    }
}

impl std::fmt::Debug for ProcessorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.0.keys().map(DocumentType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("ProcessorMap")
            .field("processor_count", &self.0.len())
            .field("document_types", &types)
            .finish()
    }
}

impl From<HashMap<DocumentType, Arc<dyn DocumentProcessor>>> for ProcessorMap {
    fn from(map: HashMap<DocumentType, Arc<dyn DocumentProcessor>>) -> Self {
        Self(map)
    }
}

impl FromIterator<(DocumentType, Arc<dyn DocumentProcessor>)> for ProcessorMap {
    fn from_iter<I: IntoIterator<Item = (DocumentType, Arc<dyn DocumentProcessor>)>>(
        iter: I,
    ) -> Self {
        Self(iter.into_iter().collect())
    }
}
