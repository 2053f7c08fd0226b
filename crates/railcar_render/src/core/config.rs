//! Configuration system
//!
//! Serializable settings for the per-frame evaluator. Values are tuning
//! constants rather than behavior switches: the defaults reproduce the
//! reference resource-pack renderer exactly, and a TOML file can override
//! them per installation.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Configuration trait
///
/// Implemented by settings structs that can round-trip through a TOML file.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from a TOML file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
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
}

/// Tuning values for display rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Marquee advance per frame, in block units of scrolled content
    pub scroll_speed: f32,

    /// Display height below which the denser small-glyph mode is selected
    pub small_text_threshold: f32,

    /// Lift applied along the anchor normal so text never z-fights the face
    pub z_fight_lift: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scroll_speed: 0.005,
            small_text_threshold: 0.1,
            z_fight_lift: 0.0025,
        }
    }
}

impl Config for RenderSettings {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        assert_eq!(settings.small_text_threshold, 0.1);
        assert!(settings.scroll_speed > 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: RenderSettings = toml::from_str("scroll_speed = 0.01").unwrap();
        assert_eq!(settings.scroll_speed, 0.01);
        assert_eq!(settings.small_text_threshold, 0.1);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = RenderSettings {
            scroll_speed: 0.02,
            small_text_threshold: 0.25,
            z_fight_lift: 0.001,
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: RenderSettings = toml::from_str(&text).unwrap();
        assert_eq!(back.scroll_speed, 0.02);
        assert_eq!(back.small_text_threshold, 0.25);
    }
}
