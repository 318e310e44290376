use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{FieldKind, StyleTable};

/// Importer configuration for ntmx
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Message series the imported NMs belong to
    pub series_id: String,
    /// Optional tag attached to the imported NMs
    pub tag_id: Option<String>,

    /// Hour of the Friday publish timestamp
    pub publish_hour: u32,

    /// Style name prefixes that are skipped without a warning
    pub ignored_prefixes: Vec<String>,
    /// Extra paragraph style names, mapped to the field they hold
    pub aliases: HashMap<String, FieldKind>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        ImporterConfig {
            series_id: "dma-nm".to_string(),
            tag_id: None,
            publish_hour: 12,
            ignored_prefixes: vec!["1rom".to_string()],
            aliases: HashMap::new(),
        }
    }
}

impl ImporterConfig {
    /// Load configuration from the given file, or the config directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(Self::get_config_path);
        if let Some(config_path) = config_path {
            if config_path.exists() {
                let content = fs::read_to_string(&config_path)?;
                let config: ImporterConfig = toml::from_str(&content)?;
                config.validate()?;
                return Ok(config);
            }
            if path.is_some() {
                bail!("Config file not found: {}", config_path.display());
            }
        }

        // Return default config if no file found
        Ok(ImporterConfig::default())
    }

    /// Save configuration to the config directory
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            self.save_to(&config_path)?;
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ntmx").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<()> {
        let config = ImporterConfig::default();
        config.save()?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.publish_hour > 23 {
            bail!("publish_hour must be between 0 and 23, got {}", self.publish_hour);
        }
        Ok(())
    }

    /// Dispatch table with the configured aliases and prefixes applied
    pub fn style_table(&self) -> StyleTable {
        StyleTable::with_overrides(&self.aliases, &self.ignored_prefixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ImporterConfig = toml::from_str(
            r#"
            series_id = "dma-nm-2016"

            [aliases]
            Detaljer2 = "details"
            "#,
        )
        .unwrap();
        assert_eq!(config.series_id, "dma-nm-2016");
        assert_eq!(config.publish_hour, 12);
        assert_eq!(config.ignored_prefixes, vec!["1rom"]);
        assert_eq!(config.style_table().classify("detaljer2"), FieldKind::Details);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ntmx").join("config.toml");
        let mut config = ImporterConfig::default();
        config.tag_id = Some("uge-49".to_string());
        config.save_to(&path).unwrap();

        let loaded = ImporterConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.tag_id.as_deref(), Some("uge-49"));
        assert_eq!(loaded.series_id, "dma-nm");
    }

    #[test]
    fn test_invalid_hour_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "publish_hour = 25\n").unwrap();
        assert!(ImporterConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ImporterConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
