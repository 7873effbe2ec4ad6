//! Configuration module for tagliatelle
//!
//! Settings live in `~/.config/tagliatelle/config.toml`. Any key can be
//! overridden from the environment with a `TAGLIATELLE_` prefix, e.g.
//! `TAGLIATELLE_ITEMS_PER_PAGE=20`. Alias groups are stored here too and are
//! always saved as a whole list.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::schema::AliasGroup;

const APP_DIR: &str = "tagliatelle";
const ENV_PREFIX: &str = "TAGLIATELLE";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TagliatelleConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Directory where catalogued files are stored
    pub upload_dir: PathBuf,

    /// Display name of this catalogue
    pub instance_name: String,

    /// Page size for listings
    pub items_per_page: usize,

    /// Alias groups used when filtering
    pub tag_aliases: Vec<AliasGroup>,

    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for TagliatelleConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join(APP_DIR));
        Self {
            database_path: data_dir.join("tagliatelle.db"),
            upload_dir: PathBuf::from("uploads"),
            instance_name: "Tagliatelle".to_string(),
            items_per_page: 100,
            tag_aliases: Vec::new(),
            path: None,
        }
    }
}

impl TagliatelleConfig {
    /// Get the default path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    ///
    /// Environment variables are applied on top of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let mut default_config = Self::default();
            default_config.path = Some(path.to_path_buf());
            default_config.save()?;
            info!(path = %path.display(), "Created default configuration");
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        loaded.path = Some(path.to_path_buf());
        debug!(path = %path.display(), aliases = loaded.tag_aliases.len(), "Configuration loaded");
        Ok(loaded)
    }

    /// Save configuration to the file it was loaded from (or the default path)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Replace every alias group and save
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn replace_aliases(&mut self, groups: Vec<AliasGroup>) -> Result<(), ConfigError> {
        self.tag_aliases = groups;
        self.save()?;
        info!(groups = self.tag_aliases.len(), "Alias groups saved");
        Ok(())
    }

    /// Page size used for listings, never zero
    #[must_use]
    pub const fn page_size(&self) -> usize {
        if self.items_per_page == 0 { 1 } else { self.items_per_page }
    }

    /// Path the configuration is saved to, if known
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
