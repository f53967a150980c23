//! Model routing for the resume platform's LLM calls.
//!
//! Decides which backend serves a given usage scenario: weighted scoring
//! over the scenario's primary models (quality vs. cost vs. latency), an
//! ordered fallback chain when no primary is usable, and a terminal local
//! model as the last resort. Every degraded selection lands in an
//! in-memory event log for the monitoring side to drain.
//!
//! The crate has no wire surface of its own. The health-checked model
//! registry that feeds the candidate pool, the admin API that pushes
//! config updates, and the alerting pipeline that reads the log are all
//! external callers of [`ModelRouter`].

pub mod config;
pub mod errors;
pub mod events;
pub mod mapping;
pub mod model;
pub mod router;
pub mod scenario;
pub mod selector;
pub mod stats;

pub use config::{RouterConfig, DEFAULT_TERMINAL_FALLBACK};
pub use errors::RoutingError;
pub use events::{AgentContext, FallbackEvent, FallbackKind, SelectionLog, SelectionLogEntry};
pub use model::{ModelInfo, Provider};
pub use router::ModelRouter;
pub use scenario::{Scenario, ScenarioConfig, ScenarioConfigPatch, SelectionWeights};
pub use stats::{ScenarioStats, SelectionStats};
