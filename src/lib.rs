// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // built-in processors
pub mod config;     // config + registry
pub mod document;   // document value types
pub mod engine;     // expansion executors
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // unified abstractions

pub use config::register_document_processor;
pub use document::{Document, DocumentType, Format, Provenance};
pub use engine::{process, process_with_report, validate};
