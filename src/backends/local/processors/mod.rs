// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod json_envelope;
pub mod terminal;

pub use json_envelope::*;
pub use terminal::*;
