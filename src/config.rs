use std::path::Path;

use crate::ai::{DqnConfig, TabularConfig};
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dqn: DqnConfig,
    pub tabular: TabularConfig,
    pub training: TrainerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dqn: DqnConfig::default(),
            tabular: TabularConfig::default(),
            training: TrainerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dqn.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "dqn.learning_rate must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dqn.gamma) {
            return Err(ConfigError::Validation("dqn.gamma must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.dqn.epsilon) {
            return Err(ConfigError::Validation(
                "dqn.epsilon must be in [0, 1]".into(),
            ));
        }
        if self.dqn.batch_size == 0 {
            return Err(ConfigError::Validation("dqn.batch_size must be > 0".into()));
        }
        if self.dqn.replay_capacity < self.dqn.batch_size {
            return Err(ConfigError::Validation(
                "dqn.replay_capacity must be >= dqn.batch_size".into(),
            ));
        }
        if self.dqn.target_update_interval == 0 {
            return Err(ConfigError::Validation(
                "dqn.target_update_interval must be > 0".into(),
            ));
        }

        if self.tabular.alpha <= 0.0 || self.tabular.alpha > 1.0 {
            return Err(ConfigError::Validation(
                "tabular.alpha must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tabular.gamma) {
            return Err(ConfigError::Validation(
                "tabular.gamma must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tabular.epsilon) {
            return Err(ConfigError::Validation(
                "tabular.epsilon must be in [0, 1]".into(),
            ));
        }

        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.max_moves == 0 {
            return Err(ConfigError::Validation(
                "training.max_moves must be > 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [dqn]
            batch_size = 16

            [training]
            num_episodes = 500
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dqn.batch_size, 16);
        assert_eq!(config.training.num_episodes, 500);
        // Unspecified sections keep their defaults.
        assert!((config.tabular.alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_gamma_rejected() {
        let config = AppConfig {
            dqn: DqnConfig {
                gamma: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_replay_capacity_smaller_than_batch_rejected() {
        let config = AppConfig {
            dqn: DqnConfig {
                batch_size: 64,
                replay_capacity: 32,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("does-not-exist.toml")).unwrap();
        assert!(config.validate().is_ok());
    }
}
