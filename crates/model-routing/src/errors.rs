use thiserror::Error;

use crate::scenario::Scenario;

/// Errors surfaced by the routing layer.
///
/// Exhaustion is an error, never a silent default: when every candidate is
/// down or excluded the caller gets `NoModelAvailable` and decides whether
/// to retry, queue, or degrade the request.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Unknown scenario: '{0}'")]
    UnknownScenario(String),

    #[error("Invalid scenario config patch: {0}")]
    InvalidConfigPatch(String),

    #[error("No primary model available for scenario '{scenario}'")]
    NoPrimaryAvailable { scenario: Scenario },

    #[error("No model available for scenario '{scenario}' after primaries, fallback chain, and terminal fallback (excluded: {excluded:?})")]
    NoModelAvailable {
        scenario: Scenario,
        excluded: Vec<String>,
    },
}
