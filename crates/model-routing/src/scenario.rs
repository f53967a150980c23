//! Scenario keys and the per-scenario routing policy types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RoutingError;

/// A platform usage scenario with its own routing policy.
///
/// Closed enumeration shared with callers; wire names are snake_case and
/// stable (they key persisted configs and log queries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    ResumeParsing,
    ResumeOptimization,
    JdAnalysis,
    CoverLetter,
    Chat,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::ResumeParsing => "resume_parsing",
            Scenario::ResumeOptimization => "resume_optimization",
            Scenario::JdAnalysis => "jd_analysis",
            Scenario::CoverLetter => "cover_letter",
            Scenario::Chat => "chat",
        }
    }

    /// All scenarios in declaration order, for callers that enumerate the
    /// closed set (exhaustiveness checks, admin listings).
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::ResumeParsing,
            Scenario::ResumeOptimization,
            Scenario::JdAnalysis,
            Scenario::CoverLetter,
            Scenario::Chat,
        ]
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resume_parsing" => Ok(Scenario::ResumeParsing),
            "resume_optimization" => Ok(Scenario::ResumeOptimization),
            "jd_analysis" => Ok(Scenario::JdAnalysis),
            "cover_letter" => Ok(Scenario::CoverLetter),
            "chat" => Ok(Scenario::Chat),
            other => Err(RoutingError::UnknownScenario(other.to_string())),
        }
    }
}

/// Relative weights for the three scoring dimensions.
///
/// Only the ratios matter within one selection; the components need not sum
/// to 1. Negative values pass through unchanged (an operator can invert a
/// term on purpose), NaN components are replaced with that dimension's
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionWeights {
    pub quality: f64,
    pub cost: f64,
    pub latency: f64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            quality: 0.5,
            cost: 0.3,
            latency: 0.2,
        }
    }
}

impl SelectionWeights {
    pub const fn new(quality: f64, cost: f64, latency: f64) -> Self {
        Self {
            quality,
            cost,
            latency,
        }
    }

    /// Replaces NaN components with the default for that dimension.
    pub fn sanitized(self) -> Self {
        let defaults = SelectionWeights::default();
        Self {
            quality: if self.quality.is_nan() {
                defaults.quality
            } else {
                self.quality
            },
            cost: if self.cost.is_nan() {
                defaults.cost
            } else {
                self.cost
            },
            latency: if self.latency.is_nan() {
                defaults.latency
            } else {
                self.latency
            },
        }
    }
}

/// Routing policy for one scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Preferred models, scored against each other. List order breaks ties.
    pub primary_models: Vec<String>,
    /// Backup chain, walked strictly in order when no primary is usable.
    pub fallback_models: Vec<String>,
    pub weights: SelectionWeights,
}

impl ScenarioConfig {
    /// Merges a partial update into this config. Absent patch fields leave
    /// the current value untouched; weights are sanitized on the way in.
    pub fn apply(&mut self, patch: ScenarioConfigPatch) {
        if let Some(primary_models) = patch.primary_models {
            self.primary_models = primary_models;
        }
        if let Some(fallback_models) = patch.fallback_models {
            self.fallback_models = fallback_models;
        }
        if let Some(weights) = patch.weights {
            self.weights = weights.sanitized();
        }
    }
}

/// Partial update for a scenario config, as submitted by the admin surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfigPatch {
    pub primary_models: Option<Vec<String>>,
    pub fallback_models: Option<Vec<String>>,
    pub weights: Option<SelectionWeights>,
}

impl ScenarioConfigPatch {
    /// Parses a patch from JSON, rejecting malformed input before it can
    /// touch the store.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        serde_json::from_str(json).map_err(|e| RoutingError::InvalidConfigPatch(e.to_string()))
    }
}
