// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `engine` - expansion lifecycle, worklist and generation progress
//! * `document` - per-document outcomes (unpacked, discarded)
//! * `registry` - processor registration events

use tracing::Span;

pub mod document;
pub mod engine;
pub mod registry;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
