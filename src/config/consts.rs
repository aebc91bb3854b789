// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default maximum unpacking depth below the root document
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Default maximum number of documents admitted to a single expansion (root included)
pub const DEFAULT_MAX_DOCUMENTS: usize = 10_000;
/// Concurrency used when none is configured and core count detection fails
pub const FALLBACK_CONCURRENCY: usize = 4;
