//! Agent configuration loading.
//!
//! Settings are resolved with the following priority (highest first):
//! 1. Environment variables (`C4AGENT_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! Loading never fails: an unreadable or unparseable file logs a warning
//! and falls back to the defaults.

use mcts::MctsConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Recognized agent options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Base search iterations per move.
    pub iterations: u32,
    /// UCT exploration constant.
    pub exploration: f64,
    /// Depth bound on backpropagation rollouts.
    pub rollout_depth: u32,
    /// RNG seed; unset means nondeterministic play.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            exploration: 1.2,
            rollout_depth: 20,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// The search-crate view of this configuration. The seed stays at
    /// the agent level, where the RNG lives.
    pub fn search_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration(self.exploration)
            .with_rollout_depth(self.rollout_depth)
    }
}

/// Load the agent configuration.
///
/// Checks `C4AGENT_CONFIG` for an explicit path, then the default search
/// locations, then falls back to built-in defaults. Environment overrides
/// are applied last in every case.
pub fn load_config() -> AgentConfig {
    if let Ok(path) = std::env::var("C4AGENT_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from C4AGENT_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!(
            "C4AGENT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(AgentConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> AgentConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(AgentConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(AgentConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    ($config:expr, $field:ident, $key:expr) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$field = v;
        }
    };
    ($config:expr, $field:ident, $key:expr, optional) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$field = Some(v);
        }
    };
}

/// Apply `C4AGENT_*` environment variable overrides.
pub fn apply_env_overrides(mut config: AgentConfig) -> AgentConfig {
    env_override!(config, iterations, "C4AGENT_ITERATIONS");
    env_override!(config, exploration, "C4AGENT_EXPLORATION");
    env_override!(config, rollout_depth, "C4AGENT_ROLLOUT_DEPTH");
    env_override!(config, seed, "C4AGENT_SEED", optional);
    config
}
