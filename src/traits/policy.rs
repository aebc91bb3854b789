// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Accept/reject decisions over the trust metadata a processor reports.

use serde_json::Value;

use crate::document::Document;
use crate::traits::processor::TrustInfo;

/// Decides whether a document whose trust information validated may continue
/// through the expansion.
pub trait TrustPolicy: Send + Sync {
    /// `Err` carries a human-readable rejection reason.
    fn evaluate(&self, document: &Document, trust: &TrustInfo) -> Result<(), String>;
}

/// Accepts every document that passed its processor's trust validation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl TrustPolicy for AcceptAll {
    fn evaluate(&self, _document: &Document, _trust: &TrustInfo) -> Result<(), String> {
        Ok(())
    }
}

/// Requires each listed key to be present with a value other than `null` or `false`.
#[derive(Debug, Clone)]
pub struct RequireTrustKeys {
    keys: Vec<String>,
}

impl RequireTrustKeys {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl TrustPolicy for RequireTrustKeys {
    fn evaluate(&self, document: &Document, trust: &TrustInfo) -> Result<(), String> {
        for key in &self.keys {
            match trust.get(key) {
                None | Some(Value::Null) | Some(Value::Bool(false)) => {
                    return Err(format!(
                        "trust key '{}' missing for document of type '{}'",
                        key, document.doc_type
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
