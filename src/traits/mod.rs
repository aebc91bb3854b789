// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod policy;
pub mod processor;

pub use executor::ExpansionExecutor;
pub use policy::{AcceptAll, RequireTrustKeys, TrustPolicy};
pub use processor::{DocumentProcessor, TrustInfo};
