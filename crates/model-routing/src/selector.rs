//! Model selection core: weighted primary scoring and the ordered fallback
//! walk.
//!
//! Pure functions over in-memory arguments. No I/O, no clock, no
//! randomness; determinism is part of the contract. For a fixed candidate
//! snapshot, config, and exclusion set, repeated calls pick the same model.

use crate::events::FallbackKind;
use crate::model::ModelInfo;
use crate::scenario::{ScenarioConfig, SelectionWeights};

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Weighted score for one candidate.
///
/// Success rate raises the score; per-token cost and latency lower it,
/// each scaled by its configured weight. Latency enters in seconds, so a
/// 2000 ms backend loses `2.0 * latency_weight`.
pub fn score_model(model: &ModelInfo, weights: &SelectionWeights) -> f64 {
    let weights = weights.sanitized();
    weights.quality * model.success_rate
        - weights.cost * model.token_cost()
        - weights.latency * (f64::from(model.latency_ms) / 1000.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Selection walk
// ────────────────────────────────────────────────────────────────────────────

/// How a selection was made. Anything but `Primary` carries a fallback
/// event into the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPath {
    Primary,
    Fallback(FallbackKind),
}

/// A chosen model name plus the path that produced it.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub model: String,
    pub path: SelectionPath,
}

fn usable<'a>(candidates: &'a [ModelInfo], name: &str, excluded: &[String]) -> Option<&'a ModelInfo> {
    if excluded.iter().any(|e| e.as_str() == name) {
        return None;
    }
    candidates.iter().find(|m| m.name == name && m.is_available)
}

/// Best usable primary for the config, or `None`.
///
/// Walks the primary list in order, keeping the highest-scoring usable
/// candidate; ties keep the earlier list position. NaN scores (possible
/// only through NaN candidate metrics) rank behind every finite score.
pub fn pick_primary<'a>(
    config: &ScenarioConfig,
    candidates: &'a [ModelInfo],
    excluded: &[String],
) -> Option<&'a ModelInfo> {
    let mut best: Option<(&ModelInfo, f64)> = None;
    for name in &config.primary_models {
        let candidate = match usable(candidates, name, excluded) {
            Some(candidate) => candidate,
            None => continue,
        };
        let mut score = score_model(candidate, &config.weights);
        if score.is_nan() {
            score = f64::NEG_INFINITY;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(model, _)| model)
}

/// First usable entry of the configured fallback chain.
///
/// A strict ordered walk. Chain order encodes an explicit operator
/// preference, so entries are never re-scored.
pub fn walk_fallback_chain<'a>(
    config: &ScenarioConfig,
    candidates: &'a [ModelInfo],
    excluded: &[String],
) -> Option<&'a ModelInfo> {
    config
        .fallback_models
        .iter()
        .find_map(|name| usable(candidates, name, excluded))
}

/// The terminal local model, if present in the pool, available, and not
/// excluded.
pub fn pick_terminal<'a>(
    terminal_fallback: &str,
    candidates: &'a [ModelInfo],
    excluded: &[String],
) -> Option<&'a ModelInfo> {
    usable(candidates, terminal_fallback, excluded)
}

/// Full selection walk: scored primaries, then the configured chain in
/// order, then the terminal local fallback. `None` means exhaustion.
pub fn select(
    config: &ScenarioConfig,
    terminal_fallback: &str,
    candidates: &[ModelInfo],
    excluded: &[String],
) -> Option<SelectionOutcome> {
    if let Some(model) = pick_primary(config, candidates, excluded) {
        return Some(SelectionOutcome {
            model: model.name.clone(),
            path: SelectionPath::Primary,
        });
    }
    if let Some(model) = walk_fallback_chain(config, candidates, excluded) {
        return Some(SelectionOutcome {
            model: model.name.clone(),
            path: SelectionPath::Fallback(FallbackKind::ConfiguredChain),
        });
    }
    if let Some(model) = pick_terminal(terminal_fallback, candidates, excluded) {
        return Some(SelectionOutcome {
            model: model.name.clone(),
            path: SelectionPath::Fallback(FallbackKind::TerminalLocal),
        });
    }
    None
}

/// The model a fallback stands in for, recorded as `original_model` on
/// fallback events: head of the primary list, else head of the fallback
/// chain, else the terminal name itself (nothing else was configured).
pub fn original_model_name(config: &ScenarioConfig, terminal_fallback: &str) -> String {
    config
        .primary_models
        .first()
        .or_else(|| config.fallback_models.first())
        .cloned()
        .unwrap_or_else(|| terminal_fallback.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
