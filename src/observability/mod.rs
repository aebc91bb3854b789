// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic output of the crate goes through the message types in
//! [`messages`]. Each type implements `Display` for the human-readable line and
//! [`messages::StructuredLog`] to emit it with structured fields at its level.
//! Messages are diagnostic only: nothing in the expansion contract depends on
//! them being emitted.
//!
//! # Usage
//!
//! ```rust
//! use ingestor::observability::messages::engine::QueueDepth;
//! use ingestor::observability::messages::StructuredLog;
//!
//! QueueDepth { remaining: 3 }.log();
//! ```

pub mod messages;
