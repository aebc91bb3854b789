// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure of an expansion as a whole.
///
/// Node-level problems never appear here; they are recorded as discards.
#[derive(Debug, Error)]
pub enum ExpansionError {
    #[error("expansion cancelled after {processed} documents")]
    Cancelled { processed: usize },

    #[error("internal error: {message}")]
    Internal { message: String },
}
