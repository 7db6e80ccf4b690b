//! Configuration loading for the driver.
//!
//! All tunable rates, caps, and output paths are loaded from a TOML
//! configuration file; every section falls back to the core defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use psyche_core::connections::INTERACTION_HISTORY_CAP;
use psyche_core::emotion::emotion_constants;
use psyche_core::updater::update_constants;

/// Complete driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Personality adaptation settings
    #[serde(default)]
    pub updater: UpdaterConfig,
    /// Connection manager settings
    #[serde(default)]
    pub connections: ConnectionsConfig,
    /// Emotion engine settings
    #[serde(default)]
    pub emotions: EmotionsConfig,
    /// Tick scheduling settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            updater: UpdaterConfig::default(),
            connections: ConnectionsConfig::default(),
            emotions: EmotionsConfig::default(),
            simulation: SimulationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every rate and cap is usable before the driver is
    /// built around it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn rate(name: &str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )))
            }
        }
        fn cap(name: &str, value: usize) -> Result<(), ConfigError> {
            if value >= 1 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{} must be at least 1, got {}",
                    name, value
                )))
            }
        }

        rate("updater.adaptation_rate", self.updater.adaptation_rate)?;
        rate("updater.decay_rate", self.updater.decay_rate)?;
        rate("emotions.decay_rate", self.emotions.decay_rate)?;
        if !(0.0..1.0).contains(&self.emotions.mood_inertia) {
            return Err(ConfigError::Invalid(format!(
                "emotions.mood_inertia must be in [0, 1), got {}",
                self.emotions.mood_inertia
            )));
        }
        cap(
            "updater.emotional_memory_cap",
            self.updater.emotional_memory_cap,
        )?;
        cap("connections.history_cap", self.connections.history_cap)?;
        cap("emotions.history_cap", self.emotions.history_cap)?;
        Ok(())
    }
}

/// Personality adaptation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// How strongly events shift adaptive traits and relationships
    pub adaptation_rate: f32,
    /// Pull toward baseline applied per decay pass
    pub decay_rate: f32,
    /// Events retained per agent in emotional memory
    pub emotional_memory_cap: usize,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            adaptation_rate: update_constants::ADAPTATION_RATE,
            decay_rate: update_constants::DECAY_RATE,
            emotional_memory_cap: update_constants::EMOTIONAL_MEMORY_CAP,
        }
    }
}

/// Connection manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionsConfig {
    /// Interactions retained per directed pair
    pub history_cap: usize,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            history_cap: INTERACTION_HISTORY_CAP,
        }
    }
}

/// Emotion engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionsConfig {
    /// Intensity an active emotion loses per tick
    pub decay_rate: f32,
    /// Resistance of the dimensional mood to change
    pub mood_inertia: f32,
    /// Emotion triggers retained per agent
    pub history_cap: usize,
}

impl Default for EmotionsConfig {
    fn default() -> Self {
        Self {
            decay_rate: emotion_constants::DECAY_RATE,
            mood_inertia: emotion_constants::MOOD_INERTIA,
            history_cap: emotion_constants::EMOTION_HISTORY_CAP,
        }
    }
}

/// Tick scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks between personality decay passes (0 disables decay)
    pub decay_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { decay_interval: 10 }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSONL change log path; changes are discarded when unset
    pub change_log: Option<PathBuf>,
}

/// Errors that can occur during configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error serializing config back to TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value outside its usable range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Psyche Simulation Configuration

[updater]
adaptation_rate = 0.05
decay_rate = 0.1
emotional_memory_cap = 100

[connections]
history_cap = 100

[emotions]
decay_rate = 0.1
mood_inertia = 0.8
history_cap = 100

[simulation]
decay_interval = 10

[output]
# change_log = "output/changes.jsonl"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();

        assert_eq!(config.updater.adaptation_rate, 0.05);
        assert_eq!(config.updater.decay_rate, 0.1);
        assert_eq!(config.updater.emotional_memory_cap, 100);
        assert_eq!(config.connections.history_cap, 100);
        assert_eq!(config.emotions.mood_inertia, 0.8);
        assert_eq!(config.simulation.decay_interval, 10);
        assert!(config.output.change_log.is_none());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [updater]
            adaptation_rate = 0.1
            emotional_memory_cap = 50

            [emotions]
            mood_inertia = 0.5

            [output]
            change_log = "changes.jsonl"
        "#;

        let config = DriverConfig::from_str(toml).unwrap();

        assert_eq!(config.updater.adaptation_rate, 0.1);
        assert_eq!(config.updater.emotional_memory_cap, 50);
        assert_eq!(config.emotions.mood_inertia, 0.5);
        assert_eq!(
            config.output.change_log,
            Some(PathBuf::from("changes.jsonl"))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [simulation]
            decay_interval = 25
        "#;

        let config = DriverConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.simulation.decay_interval, 25);
        // Default values
        assert_eq!(config.updater.adaptation_rate, 0.05);
        assert_eq!(config.emotions.history_cap, 100);
    }

    #[test]
    fn test_config_to_toml() {
        let config = DriverConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[updater]"));
        assert!(toml.contains("[connections]"));
        assert!(toml.contains("[emotions]"));
        assert!(toml.contains("[simulation]"));
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = DriverConfig::from_str(&toml).unwrap();

        assert_eq!(config.updater.adaptation_rate, 0.05);
        assert_eq!(config.connections.history_cap, 100);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_accepts_defaults() {
        DriverConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_out_of_range_rate() {
        let mut config = DriverConfig::default();
        config.updater.adaptation_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(ref msg)) if msg.contains("adaptation_rate")
        ));

        let mut config = DriverConfig::default();
        config.emotions.decay_rate = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_full_inertia() {
        let mut config = DriverConfig::default();
        config.emotions.mood_inertia = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(ref msg)) if msg.contains("mood_inertia")
        ));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let mut config = DriverConfig::default();
        config.connections.history_cap = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, default_config_toml()).unwrap();

        let config = DriverConfig::from_file(&path).unwrap();
        assert_eq!(config.updater.decay_rate, 0.1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DriverConfig::from_file(Path::new("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = DriverConfig::from_str("not = [valid").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
