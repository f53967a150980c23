//! Model router, the facade request handlers and agents talk to.
//!
//! Composes the scenario config store, the pure selection core, and the
//! selection event log. Everything is synchronous and lock-scoped; the
//! hosting runtime decides threading. The caller owns the candidate pool
//! (a health-checked registry snapshot) and passes it into every call.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::errors::RoutingError;
use crate::events::{AgentContext, FallbackEvent, SelectionLog, SelectionLogEntry};
use crate::mapping::ScenarioConfigStore;
use crate::model::ModelInfo;
use crate::scenario::{Scenario, ScenarioConfig, ScenarioConfigPatch};
use crate::selector::{self, SelectionPath};
use crate::stats::{self, SelectionStats};

pub struct ModelRouter {
    store: ScenarioConfigStore,
    log: SelectionLog,
    terminal_fallback: String,
}

impl ModelRouter {
    /// Router seeded with the built-in scenario defaults and the default
    /// terminal fallback.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            store: ScenarioConfigStore::new(),
            log: SelectionLog::new(),
            terminal_fallback: config.terminal_fallback,
        }
    }

    /// Router over explicit scenario configs, e.g. restored from persisted
    /// admin state at boot.
    pub fn with_scenario_configs(
        configs: HashMap<Scenario, ScenarioConfig>,
        config: RouterConfig,
    ) -> Self {
        Self {
            store: ScenarioConfigStore::with_configs(configs),
            log: SelectionLog::new(),
            terminal_fallback: config.terminal_fallback,
        }
    }

    /// Best available primary for the scenario, by weighted score.
    ///
    /// Errors with `NoPrimaryAvailable` when no primary is usable; callers
    /// that want recovery go through `select_with_fallback` instead. Does
    /// not touch the selection log.
    pub fn select_model_for_scenario(
        &self,
        scenario: Scenario,
        candidates: &[ModelInfo],
    ) -> Result<String, RoutingError> {
        let config = self.store.config_for(scenario);
        match selector::pick_primary(&config, candidates, &[]) {
            Some(model) => {
                debug!("Primary selection for {}: {}", scenario, model.name);
                Ok(model.name.clone())
            }
            None => Err(RoutingError::NoPrimaryAvailable { scenario }),
        }
    }

    /// Selection with the full recovery walk: scored primaries, then the
    /// configured fallback chain in order, then the terminal local model.
    ///
    /// `excluded` names models the caller already tried for this request.
    /// Every successful call appends one log entry; the entry carries a
    /// fallback event exactly when the choice did not come from primary
    /// scoring.
    pub fn select_with_fallback(
        &self,
        scenario: Scenario,
        candidates: &[ModelInfo],
        excluded: &[String],
        agent_context: Option<&AgentContext>,
    ) -> Result<String, RoutingError> {
        let config = self.store.config_for(scenario);
        let outcome = selector::select(&config, &self.terminal_fallback, candidates, excluded)
            .ok_or_else(|| {
                warn!(
                    "No model available for {} (excluded: {:?})",
                    scenario, excluded
                );
                RoutingError::NoModelAvailable {
                    scenario,
                    excluded: excluded.to_vec(),
                }
            })?;

        let fallback_event = match outcome.path {
            SelectionPath::Primary => {
                debug!("Primary selection for {}: {}", scenario, outcome.model);
                None
            }
            SelectionPath::Fallback(kind) => {
                let original = selector::original_model_name(&config, &self.terminal_fallback);
                warn!(
                    "Fallback selection for {}: {} -> {} ({:?})",
                    scenario, original, outcome.model, kind
                );
                Some(FallbackEvent {
                    original_model: original,
                    fallback_model: outcome.model.clone(),
                    scenario,
                    excluded_models: excluded.to_vec(),
                    kind,
                    agent_type: agent_context.and_then(|ctx| ctx.agent_type.clone()),
                    workflow_step: agent_context.and_then(|ctx| ctx.workflow_step.clone()),
                    user_id: agent_context.and_then(|ctx| ctx.user_id),
                })
            }
        };

        self.log.record(SelectionLogEntry {
            timestamp: Utc::now(),
            scenario,
            chosen_model: outcome.model.clone(),
            fallback_event,
        });

        Ok(outcome.model)
    }

    /// Merges a partial config change, visible to the very next selection.
    pub fn update_scenario_config(&self, scenario: Scenario, patch: ScenarioConfigPatch) {
        self.store.update(scenario, patch);
        info!("Scenario config updated for {}", scenario);
    }

    /// Current effective config for a scenario.
    pub fn scenario_config(&self, scenario: Scenario) -> ScenarioConfig {
        self.store.config_for(scenario)
    }

    /// Snapshot of the selection log in insertion order.
    pub fn selection_log(&self) -> Vec<SelectionLogEntry> {
        self.log.entries()
    }

    pub fn clear_selection_log(&self) {
        self.log.clear();
    }

    /// Fallback-frequency summary over the current log.
    pub fn selection_stats(&self) -> SelectionStats {
        stats::summarize(&self.selection_log())
    }
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::new()
    }
}
