//! Simulation configuration loader.

use std::path::Path;

use entity_core::EntityConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::oracle::WildernessConfig;

/// Top-level layout of a configuration file.
///
/// ```toml
/// [entity]
/// health_restore = 0.1
/// health_regen_threshold = 0.5
/// base_health = 10
///
/// [wilderness]
/// safe_radius = 8
/// ```
///
/// Missing sections and fields fall back to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub entity: EntityConfig,
    pub wilderness: WildernessConfig,
}

/// Loader for simulation configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> LoadResult<SimulationConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "simulation config loaded");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<SimulationConfig> {
        let config: SimulationConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config
            .entity
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid entity config: {}", e))?;

        Ok(config)
    }

    /// Load only the `[entity]` section.
    pub fn load_entity(path: &Path) -> LoadResult<EntityConfig> {
        Ok(Self::load(path)?.entity)
    }
}
