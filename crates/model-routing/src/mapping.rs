//! Scenario-to-model mapping store.
//!
//! Holds each scenario's routing policy: the primary list, the fallback
//! chain, and the scoring weights. Seeded with built-in defaults at
//! construction; `update` merges partial changes that are visible to the
//! very next selection (no cache in front, no TTL).

use std::collections::HashMap;
use std::sync::RwLock;

use crate::scenario::{Scenario, ScenarioConfig, ScenarioConfigPatch, SelectionWeights};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Built-in routing defaults per scenario.
///
/// Primaries lean on hosted frontier models, fallback chains prefer cheap
/// high-availability backends. Chat weighs latency much higher than the
/// document scenarios; parsing and analysis run in the background where
/// latency barely matters.
pub fn default_scenario_configs() -> HashMap<Scenario, ScenarioConfig> {
    let mut configs = HashMap::new();
    configs.insert(
        Scenario::ResumeParsing,
        ScenarioConfig {
            primary_models: names(&["gpt-4", "qwen-plus"]),
            fallback_models: names(&["qwen-turbo", "deepseek-chat"]),
            weights: SelectionWeights::new(0.5, 0.3, 0.2),
        },
    );
    configs.insert(
        Scenario::ResumeOptimization,
        ScenarioConfig {
            primary_models: names(&["gpt-4", "deepseek-reasoner"]),
            fallback_models: names(&["qwen-plus", "deepseek-chat"]),
            weights: SelectionWeights::new(0.7, 0.2, 0.1),
        },
    );
    configs.insert(
        Scenario::JdAnalysis,
        ScenarioConfig {
            primary_models: names(&["qwen-plus", "gpt-4"]),
            fallback_models: names(&["deepseek-chat", "qwen-turbo"]),
            weights: SelectionWeights::new(0.5, 0.3, 0.2),
        },
    );
    configs.insert(
        Scenario::CoverLetter,
        ScenarioConfig {
            primary_models: names(&["gpt-4", "qwen-plus"]),
            fallback_models: names(&["deepseek-chat", "qwen-turbo"]),
            weights: SelectionWeights::new(0.6, 0.25, 0.15),
        },
    );
    configs.insert(
        Scenario::Chat,
        ScenarioConfig {
            primary_models: names(&["qwen-turbo", "gpt-4o-mini"]),
            fallback_models: names(&["deepseek-chat", "qwen-plus"]),
            weights: SelectionWeights::new(0.35, 0.25, 0.4),
        },
    );
    configs
}

/// Thread-safe store for scenario routing configs.
///
/// Updates are last-write-wins. Reads clone the config out, so selection
/// never runs while holding the lock.
#[derive(Debug)]
pub struct ScenarioConfigStore {
    configs: RwLock<HashMap<Scenario, ScenarioConfig>>,
}

impl ScenarioConfigStore {
    /// Store seeded with the built-in defaults.
    pub fn new() -> Self {
        Self::with_configs(default_scenario_configs())
    }

    /// Store over explicit configs, e.g. restored from persisted admin
    /// state at boot.
    pub fn with_configs(configs: HashMap<Scenario, ScenarioConfig>) -> Self {
        Self {
            configs: RwLock::new(configs),
        }
    }

    /// Current config for a scenario. Unseeded scenarios read as an empty
    /// config with default weights.
    pub fn config_for(&self, scenario: Scenario) -> ScenarioConfig {
        self.configs
            .read()
            .expect("scenario config lock poisoned")
            .get(&scenario)
            .cloned()
            .unwrap_or_default()
    }

    /// Merges a partial update into the stored config, effective for the
    /// very next read.
    pub fn update(&self, scenario: Scenario, patch: ScenarioConfigPatch) {
        let mut configs = self
            .configs
            .write()
            .expect("scenario config lock poisoned");
        configs.entry(scenario).or_default().apply(patch);
    }
}

impl Default for ScenarioConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
