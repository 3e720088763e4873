//! # Engine Configuration
//!
//! Serializable settings read once at engine start. Every section has
//! defaults, so a config file only needs the keys it changes.
//!
//! ```toml
//! [physics]
//! default_scene = "world"
//!
//! [input]
//! active_gamepad = 0
//!
//! [[input.mappings]]
//! name = "movement"
//!
//! [[input.mappings.axes]]
//! name = "horizontal"
//! gamepad_axis = 0
//! decrement = ["a", "arrowleft"]
//! increment = ["d", "arrowright"]
//!
//! [logging]
//! filter = "radon_engine=debug"
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::input::InputMappingDef;
use crate::physics::DEFAULT_SCENE;

/// # Physics Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Physics scene used by colliders that do not name one
    pub default_scene: String,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            default_scene: DEFAULT_SCENE.to_string(),
        }
    }
}

/// # Input Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Gamepad slot read by mappings
    pub active_gamepad: usize,
    /// Mappings created when the engine starts, in order
    pub mappings: Vec<InputMappingDef>,
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// # Complete Engine Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Collider registry settings
    pub physics: PhysicsConfig,
    /// Input system settings
    pub input: InputConfig,
    /// Logger settings
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default physics scene name
    #[must_use]
    pub fn with_default_scene(mut self, name: impl Into<String>) -> Self {
        self.physics.default_scene = name.into();
        self
    }

    /// Add a mapping created at engine start
    #[must_use]
    pub fn with_mapping(mut self, mapping: InputMappingDef) -> Self {
        self.input.mappings.push(mapping);
        self
    }

    /// Set the logger filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::input::AxisDef;

    #[test]
    fn empty_file_gives_defaults() {
        let config = EngineConfig::from_str_with_format("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.physics.default_scene, "default");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn mappings_load_from_toml() {
        let config = EngineConfig::from_str_with_format(
            r#"
            [input]
            active_gamepad = 1

            [[input.mappings]]
            name = "movement"

            [[input.mappings.axes]]
            name = "horizontal"
            gamepad_axis = 0
            invert_axis = true
            decrement = ["a"]
            increment = ["d"]
            "#,
            ConfigFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.input.active_gamepad, 1);
        let axis = &config.input.mappings[0].axes[0];
        assert_eq!(axis.name, "horizontal");
        assert!(axis.invert_axis);
        assert_eq!(axis.increment, vec!["d".to_string()]);
    }

    #[test]
    fn ron_round_trip_keeps_mappings() {
        let config = EngineConfig::new()
            .with_default_scene("arena")
            .with_mapping(
                InputMappingDef::named("look").axis(AxisDef::new("yaw").with_gamepad_axis(2, false)),
            );
        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        assert_eq!(
            EngineConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap(),
            config
        );
    }
}
