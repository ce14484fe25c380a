//! Configuration file for the CLI.
//!
//! YAML by default; files ending in `.json` are read as JSON. Every section
//! is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;
use waymark_checkpoint::CheckpointOptions;
use waymark_host::SimulatedTerrain;
use waymark_spatial::{NodeSafety, NodeSafetyConfig, NodeSafetyError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid node safety list: {0}")]
    NodeSafety(#[from] NodeSafetyError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Terrain of the simulated host.
    pub terrain: SimulatedTerrain,
    pub node_safety: NodeSafetyConfig,
    /// Options for checkpoints created by `session`.
    pub checkpoint: CheckpointOptions,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Build the blacklist once for the lifetime of the process.
    pub fn node_safety(&self) -> Result<NodeSafety, ConfigError> {
        Ok(NodeSafety::from_config(&self.node_safety)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.node_safety().unwrap(), NodeSafety::default());
    }

    #[test]
    fn load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "terrain:\n  ground_height: 5.0\ncheckpoint:\n  force_ground: true\n  radius: 2.0"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.terrain.ground_height, Some(5.0));
        assert!(config.checkpoint.force_ground);
        assert_eq!(config.checkpoint.radius, 2.0);
        assert_eq!(config.checkpoint.checkpoint_type, 47);
    }

    #[test]
    fn load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"node_safety": {{"blacklisted_node_types": [5]}}}}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        let safety = config.node_safety().unwrap();
        assert!(safety.is_blacklisted(5));
        assert!(!safety.is_blacklisted(0));
    }

    #[test]
    fn sentinel_in_blacklist_is_rejected() {
        let config: AppConfig =
            serde_yaml::from_str("node_safety:\n  blacklisted_node_types: [-1]").unwrap();
        assert!(matches!(
            config.node_safety(),
            Err(ConfigError::NodeSafety(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load("/nonexistent/waymark.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
