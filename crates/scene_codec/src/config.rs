//! Configuration system

pub use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Paths of the renderer resources the importer binds onto the camera
///
/// These are fixed per installation rather than per scene, which is why they
/// live in configuration instead of the scene document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineResourcesConfig {
    /// Mega-kernel resource asset
    pub mega_kernel_resource: PathBuf,
    /// Wavefront resource asset
    pub wavefront_resource: PathBuf,
    /// Output blit material asset
    pub blit_material: PathBuf,
}

impl Default for EngineResourcesConfig {
    fn default() -> Self {
        Self {
            mega_kernel_resource: PathBuf::from("resources/mega_kernel.asset"),
            wavefront_resource: PathBuf::from("resources/wavefront.asset"),
            blit_material: PathBuf::from("resources/blit.mat"),
        }
    }
}

impl Config for EngineResourcesConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let config = EngineResourcesConfig {
            mega_kernel_resource: PathBuf::from("a/mega.asset"),
            wavefront_resource: PathBuf::from("a/wave.asset"),
            blit_material: PathBuf::from("a/blit.mat"),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineResourcesConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let config = EngineResourcesConfig::default();
        let err = config.save_to_file("resources.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
