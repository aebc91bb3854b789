// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::document::Format;

/// A payload is not well-formed for its declared wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("payload is not valid {format}: {reason}")]
    Malformed { format: Format, reason: String },

    #[error("unsupported document format")]
    Unsupported,
}
