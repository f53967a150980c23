//! Selection event log consumed by the monitoring and alerting side.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scenario::Scenario;

/// Which recovery path produced a non-primary selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// An entry of the scenario's configured fallback chain.
    ConfiguredChain,
    /// The terminal local model, after the whole chain was exhausted.
    TerminalLocal,
}

/// Caller-side context attached by the agent framework and copied verbatim
/// into fallback events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentContext {
    pub agent_type: Option<String>,
    pub workflow_step: Option<String>,
    pub user_id: Option<Uuid>,
}

/// A degraded selection, with enough context to alert on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEvent {
    /// The primary that would have been chosen had it been usable.
    pub original_model: String,
    pub fallback_model: String,
    pub scenario: Scenario,
    /// Exclusions the caller passed in, usually models that already failed
    /// this request.
    pub excluded_models: Vec<String>,
    pub kind: FallbackKind,
    pub agent_type: Option<String>,
    pub workflow_step: Option<String>,
    pub user_id: Option<Uuid>,
}

/// One record per fallback-capable selection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub scenario: Scenario,
    pub chosen_model: String,
    /// Present exactly when the choice did not come from primary scoring.
    pub fallback_event: Option<FallbackEvent>,
}

/// Append-only in-memory log of selection outcomes.
///
/// Unbounded; rotation and persistence belong to whoever drains it. Reads
/// are snapshots and never consume entries.
#[derive(Debug, Default)]
pub struct SelectionLog {
    entries: Mutex<Vec<SelectionLogEntry>>,
}

impl SelectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, entry: SelectionLogEntry) {
        self.entries
            .lock()
            .expect("selection log lock poisoned")
            .push(entry);
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<SelectionLogEntry> {
        self.entries
            .lock()
            .expect("selection log lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("selection log lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("selection log lock poisoned")
            .clear();
    }
}
