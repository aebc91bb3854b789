// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::document::Document;
use crate::errors::ProcessorError;
use crate::traits::{DocumentProcessor, TrustInfo};

fn trust_for(name: &str) -> TrustInfo {
    TrustInfo::from([("processor".to_string(), json!(name))])
}

/// A stub processor that accepts everything and never has children
pub struct StubProcessor;

impl StubProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentProcessor for StubProcessor {
    async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
        Ok(())
    }

    async fn validate_trust_information(
        &self,
        _document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        Ok(trust_for(self.name()))
    }

    async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
        Ok(vec![])
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Schema,
    Trust,
    Unpack,
}

/// A processor that fails at one chosen stage for testing containment
pub struct FailingProcessor {
    pub stage: FailureStage,
}

impl FailingProcessor {
    pub fn new(stage: FailureStage) -> Self {
        Self { stage }
    }

    fn check(&self, stage: FailureStage) -> Result<(), ProcessorError> {
        if self.stage == stage {
            Err(ProcessorError::invalid(format!("forced {:?} failure", stage)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentProcessor for FailingProcessor {
    async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
        self.check(FailureStage::Schema)
    }

    async fn validate_trust_information(
        &self,
        _document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        self.check(FailureStage::Trust)?;
        Ok(trust_for(self.name()))
    }

    async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
        self.check(FailureStage::Unpack)?;
        Ok(vec![])
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A processor that unpacks every document into the same fixed children
pub struct FixedChildrenProcessor {
    children: Vec<Document>,
}

impl FixedChildrenProcessor {
    pub fn new(children: Vec<Document>) -> Self {
        Self { children }
    }
}

#[async_trait]
impl DocumentProcessor for FixedChildrenProcessor {
    async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
        Ok(())
    }

    async fn validate_trust_information(
        &self,
        _document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        Ok(trust_for(self.name()))
    }

    async fn unpack(&self, _document: &Document) -> Result<Vec<Document>, ProcessorError> {
        Ok(self.children.clone())
    }

    fn name(&self) -> &'static str {
        "fixed_children"
    }
}

/// A processor whose only child is the document itself
pub struct SelfReferencingProcessor;

impl SelfReferencingProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentProcessor for SelfReferencingProcessor {
    async fn validate_schema(&self, _document: &Document) -> Result<(), ProcessorError> {
        Ok(())
    }

    async fn validate_trust_information(
        &self,
        _document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        Ok(trust_for(self.name()))
    }

    async fn unpack(&self, document: &Document) -> Result<Vec<Document>, ProcessorError> {
        Ok(vec![document.clone()])
    }

    fn name(&self) -> &'static str {
        "self_referencing"
    }
}

/// Wraps another processor and records `type:payload` of every document it unpacks
pub struct RecordingProcessor {
    inner: Arc<dyn DocumentProcessor>,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingProcessor {
    pub fn new(inner: Arc<dyn DocumentProcessor>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { inner, log }
    }
}

#[async_trait]
impl DocumentProcessor for RecordingProcessor {
    async fn validate_schema(&self, document: &Document) -> Result<(), ProcessorError> {
        self.inner.validate_schema(document).await
    }

    async fn validate_trust_information(
        &self,
        document: &Document,
    ) -> Result<TrustInfo, ProcessorError> {
        self.inner.validate_trust_information(document).await
    }

    async fn unpack(&self, document: &Document) -> Result<Vec<Document>, ProcessorError> {
        let entry = format!(
            "{}:{}",
            document.doc_type,
            String::from_utf8_lossy(document.payload())
        );
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
        self.inner.unpack(document).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
