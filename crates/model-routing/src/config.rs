use anyhow::{ensure, Result};

/// Name of the last-resort local model when nothing overrides it.
pub const DEFAULT_TERMINAL_FALLBACK: &str = "ollama";

/// Router configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Last-resort local model, consulted only after the scenario's whole
    /// fallback chain is exhausted. Deployments without a local runtime can
    /// point this at any always-on backend.
    pub terminal_fallback: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            terminal_fallback: DEFAULT_TERMINAL_FALLBACK.to_string(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment (reads `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let terminal_fallback = std::env::var("MODEL_ROUTING_TERMINAL_FALLBACK")
            .unwrap_or_else(|_| DEFAULT_TERMINAL_FALLBACK.into());
        Self::validated(terminal_fallback)
    }

    fn validated(terminal_fallback: String) -> Result<Self> {
        ensure!(
            !terminal_fallback.trim().is_empty(),
            "MODEL_ROUTING_TERMINAL_FALLBACK must not be empty"
        );
        Ok(Self { terminal_fallback })
    }
}
