use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and caches it. A missing config falls
/// back to `TConfig::default()` without being written out.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self
            .config
            .lock()
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|e| ConfigError::Write(e.to_string()))?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InMemoryConfigProvider, validate_grid_size};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct BoardConfig {
        grid_size: usize,
    }

    impl Default for BoardConfig {
        fn default() -> Self {
            Self { grid_size: 20 }
        }
    }

    impl Validate for BoardConfig {
        fn validate(&self) -> Result<(), String> {
            validate_grid_size(self.grid_size)
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, BoardConfig> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_config_yields_default() {
        let config = manager(None).get_config().unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_stored_config_is_loaded() {
        let config = manager(Some("grid_size: 12\n")).get_config().unwrap();
        assert_eq!(config.grid_size, 12);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = manager(Some("grid_size: 2\n")).get_config();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let result = manager(Some("grid_size: [oops")).get_config();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let manager = manager(None);
        manager.set_config(&BoardConfig { grid_size: 30 }).unwrap();
        assert_eq!(manager.get_config().unwrap().grid_size, 30);
        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("grid_size: 30"));
    }

    #[test]
    fn test_set_config_refuses_invalid() {
        let manager = manager(None);
        assert!(manager.set_config(&BoardConfig { grid_size: 1000 }).is_err());
        assert!(manager.config_content_provider.get_config_content().unwrap().is_none());
    }
}
