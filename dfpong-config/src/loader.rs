// Configuration loader

use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::validation::validate_config;
use crate::ControllerTomlConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a controller configuration file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dfpong_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::load("controller.toml").unwrap();
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<ControllerTomlConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Load and validate a configuration held in memory
    pub fn load_str(content: &str) -> ConfigResult<ControllerTomlConfig> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> ConfigResult<ControllerTomlConfig> {
        let config: ControllerTomlConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: origin.to_string(),
            message: e.message().to_string(),
        })?;
        validate_config(&config)?;
        Ok(config)
    }
}
