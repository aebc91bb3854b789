// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod discard;
mod execution;
mod format;
mod processor;

pub use config::ConfigError;
pub use discard::DiscardReason;
pub use execution::ExpansionError;
pub use format::FormatError;
pub use processor::ProcessorError;
