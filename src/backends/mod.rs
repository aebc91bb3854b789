// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in document processors.
//!
//! Real deployments register their own processors for their document types;
//! the processors here cover generic containers and terminal documents and are
//! what configuration files refer to by implementation name.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process processors selected by `impl` name:
//! - **json_envelope**: JSON container listing child documents
//! - **terminal**: accepts any well-formed document, never has children
//!
//! ## Stub Backend (Test-Only)
//! Test doubles for engine tests (only available in test builds):
//! - **StubProcessor**: accepts everything, no children
//! - **FailingProcessor**: fails at a chosen stage
//! - **FixedChildrenProcessor**: always unpacks to the same children
//! - **SelfReferencingProcessor**: unpacks a document into itself
//! - **RecordingProcessor**: records the order documents are unpacked in
//!
//! # Examples
//!
//! ```rust
//! use ingestor::backends::local::LocalProcessorFactory;
//! use ingestor::config::ProcessorConfig;
//!
//! let config = ProcessorConfig {
//!     doc_type: "envelope".to_string(),
//!     impl_: "json_envelope".to_string(),
//! };
//!
//! let processor = LocalProcessorFactory::create_processor(&config)?;
//! assert_eq!(processor.name(), "json_envelope");
//! # Ok::<(), ingestor::errors::ConfigError>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
