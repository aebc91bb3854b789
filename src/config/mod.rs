// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod processor_map;
mod registry;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, Config, ExecutorOptions, Limits, ProcessorConfig,
    Strategy, TrustPolicyConfig,
};
pub use processor_map::ProcessorMap;
pub use registry::{register_document_processor, ProcessorRegistry};
pub use runtime::RuntimeBuilder;
pub use validation::validate_config;
