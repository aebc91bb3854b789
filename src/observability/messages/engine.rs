// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for expansion lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Expansion lifecycle (start, completion, cancellation)
//! * Worklist progress for the work queue strategy
//! * Generation boundaries for the level-by-level strategy

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Expansion started for a root document.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use ingestor::observability::messages::engine::ExpansionStarted;
///
/// let msg = ExpansionStarted {
///     strategy: "work_queue",
///     root_type: "envelope",
///     processor_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExpansionStarted<'a> {
    pub strategy: &'a str,
    pub root_type: &'a str,
    pub processor_count: usize,
}

impl Display for ExpansionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting expansion of '{}' document with {} strategy: {} processors registered",
            self.root_type, self.strategy, self.processor_count
        )
    }
}

impl StructuredLog for ExpansionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            root_type = self.root_type,
            processor_count = self.processor_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "expansion",
            span_name = name,
            strategy = self.strategy,
            root_type = self.root_type,
            processor_count = self.processor_count,
        )
    }
}

/// Expansion finished; the worklist is empty.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExpansionCompleted<'a> {
    pub strategy: &'a str,
    pub processed: usize,
    pub leaf_count: usize,
    pub discarded_count: usize,
    pub duration: std::time::Duration,
}

impl Display for ExpansionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Expansion completed with {} strategy: {} documents processed, {} leaves, {} discarded in {:?}",
            self.strategy, self.processed, self.leaf_count, self.discarded_count, self.duration
        )
    }
}

impl StructuredLog for ExpansionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            processed = self.processed,
            leaf_count = self.leaf_count,
            discarded_count = self.discarded_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "expansion_completed",
            span_name = name,
            strategy = self.strategy,
            processed = self.processed,
            leaf_count = self.leaf_count,
            discarded_count = self.discarded_count,
            duration = ?self.duration,
        )
    }
}

/// Expansion stopped by an external cancellation signal.
///
/// # Log Level
/// `warn!` - Partial work was abandoned
pub struct ExpansionCancelled<'a> {
    pub strategy: &'a str,
    pub processed: usize,
}

impl Display for ExpansionCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Expansion cancelled with {} strategy after {} documents",
            self.strategy, self.processed
        )
    }
}

impl StructuredLog for ExpansionCancelled<'_> {
    fn log(&self) {
        tracing::warn!(
            strategy = self.strategy,
            processed = self.processed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "expansion_cancelled",
            span_name = name,
            strategy = self.strategy,
            processed = self.processed,
        )
    }
}

/// Documents still waiting in the work queue.
///
/// # Log Level
/// `debug!` - Traversal detail
pub struct QueueDepth {
    pub remaining: usize,
}

impl Display for QueueDepth {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} documents left in queue", self.remaining)
    }
}

impl StructuredLog for QueueDepth {
    fn log(&self) {
        tracing::debug!(remaining = self.remaining, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("queue_depth", span_name = name, remaining = self.remaining)
    }
}

/// A new generation of the level-by-level expansion is about to be validated.
///
/// # Log Level
/// `debug!` - Traversal detail
pub struct GenerationStarted {
    pub level: usize,
    pub size: usize,
    pub max_concurrency: usize,
}

impl Display for GenerationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing generation {}: {} documents, max_concurrency={}",
            self.level, self.size, self.max_concurrency
        )
    }
}

impl StructuredLog for GenerationStarted {
    fn log(&self) {
        tracing::debug!(
            level = self.level,
            size = self.size,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "generation",
            span_name = name,
            level = self.level,
            size = self.size,
            max_concurrency = self.max_concurrency,
        )
    }
}
