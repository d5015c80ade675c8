use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use snippet_placement::RankerConfig;
use snippet_sandbox::SandboxConfig;
use std::fs;
use std::path::Path;

/// Settings file layout: one table per library crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sandbox: SandboxConfig,
    pub ranker: RankerConfig,
}

impl AppConfig {
    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        Ok(Self {
            sandbox: config.sandbox.with_env_overrides(),
            ranker: config.ranker,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.sandbox.validate()?;
        config.ranker.validate()?;
        Ok(config)
    }
}
