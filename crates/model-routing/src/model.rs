use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor behind a model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Qwen,
    DeepSeek,
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Qwen => "qwen",
            Provider::DeepSeek => "deepseek",
            Provider::Ollama => "ollama",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One model backend known to the platform.
///
/// The registry that owns the candidate pool refreshes `is_available` from
/// health checks and `success_rate` from call history; selection treats a
/// snapshot of these as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub provider: Provider,
    /// Maximum input size in tokens.
    pub context_window: u32,
    pub cost_per_input_token: f64,
    pub cost_per_output_token: f64,
    /// Expected response time in milliseconds.
    pub latency_ms: u32,
    /// Historical share of successful calls, in [0, 1].
    pub success_rate: f64,
    pub is_available: bool,
}

impl ModelInfo {
    /// Combined per-token price used by the scoring formula.
    pub fn token_cost(&self) -> f64 {
        self.cost_per_input_token + self.cost_per_output_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(
            serde_json::to_string(&Provider::DeepSeek).unwrap(),
            "\"deepseek\""
        );
    }

    #[test]
    fn test_provider_display_matches_wire_name() {
        assert_eq!(Provider::Qwen.to_string(), "qwen");
    }

    #[test]
    fn test_token_cost_sums_both_directions() {
        let model = ModelInfo {
            name: "gpt-4".to_string(),
            provider: Provider::OpenAi,
            context_window: 8192,
            cost_per_input_token: 0.00003,
            cost_per_output_token: 0.00006,
            latency_ms: 2000,
            success_rate: 0.98,
            is_available: true,
        };
        assert!((model.token_cost() - 0.00009).abs() < f64::EPSILON);
    }
}
