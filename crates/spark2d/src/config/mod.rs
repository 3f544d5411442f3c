//! Configuration files
//!
//! Settings structs derive serde and pick up [`Config`] for free; the file
//! format is chosen by extension, with TOML and RON supported.

use thiserror::Error;

pub use serde::{Deserialize, Serialize};

use crate::graphics::color::Color;

/// File load and save for serde-derived settings structs
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Reads a settings file, picking the format from the extension
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

    /// Writes a settings file in the format the extension names
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

/// Errors from reading or writing settings files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// File contents did not parse as the expected format
    #[error("Parse error: {0}")]
    Parse(String),
    /// Settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Extension names no supported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Engine startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window or activity title
    pub title: String,
    /// Width the game was designed against
    pub target_width: u32,
    /// Height the game was designed against
    pub target_height: u32,
    /// Directory game assets are read from
    pub assets_dir: String,
    /// Color the frame is cleared to
    pub clear_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "spark2d game".to_string(),
            target_width: 480,
            target_height: 320,
            assets_dir: "assets".to_string(),
            clear_color: Color::BLACK,
        }
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_round_trip() {
        let config = EngineConfig {
            title: "meteors".to_string(),
            target_width: 640,
            ..EngineConfig::default()
        };
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        let parsed: EngineConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.title, "meteors");
        assert_eq!(parsed.target_width, 640);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let config = EngineConfig::default();
        assert!(matches!(
            config.save_to_file("config.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            EngineConfig::load_from_file("does-not-exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn toml_parses_defaults() {
        let text = r#"
title = "demo"
target_width = 480
target_height = 320
assets_dir = "assets"

[clear_color]
r = 0.0
g = 0.0
b = 0.0
a = 1.0
"#;
        let parsed: EngineConfig = toml::from_str(text).unwrap();
        assert_eq!(parsed.title, "demo");
        assert_eq!(parsed.clear_color, Color::BLACK);
    }
}
