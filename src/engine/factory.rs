// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, Strategy, TrustPolicyConfig};
use crate::engine::level_by_level::LevelByLevelExecutor;
use crate::engine::work_queue::WorkQueueExecutor;
use crate::traits::{AcceptAll, ExpansionExecutor, RequireTrustKeys, TrustPolicy};

/// Factory for creating expansion executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create an expansion executor based on the configuration strategy
    pub fn from_config(cfg: &Config) -> Box<dyn ExpansionExecutor> {
        let policy = Self::policy_from_config(&cfg.trust_policy);

        match cfg.strategy {
            Strategy::WorkQueue => Box::new(WorkQueueExecutor::new(cfg.limits, policy)),
            Strategy::Level => Box::new(LevelByLevelExecutor::new(
                cfg.executor_options.effective_concurrency(),
                cfg.limits,
                policy,
            )),
        }
    }

    pub fn policy_from_config(cfg: &TrustPolicyConfig) -> Arc<dyn TrustPolicy> {
        if cfg.required_keys.is_empty() {
            Arc::new(AcceptAll)
        } else {
            Arc::new(RequireTrustKeys::new(cfg.required_keys.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        let work_queue: Config = serde_yaml::from_str("strategy: work_queue").unwrap();
        let level: Config = serde_yaml::from_str("strategy: level").unwrap();

        assert_eq!(ExecutorFactory::from_config(&work_queue).strategy(), "work_queue");
        assert_eq!(ExecutorFactory::from_config(&level).strategy(), "level");
    }
}
