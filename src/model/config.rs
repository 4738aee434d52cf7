use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Estimate assigned to tasks created without one, in minutes.
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_minutes: default_minutes(),
            ui: UiConfig::default(),
        }
    }
}

fn default_minutes() -> u32 {
    crate::model::task::DEFAULT_MINUTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides by theme slot name (e.g. `highlight = "#FB4196"`).
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
