//! Configuration module.
//!
//! Layered configuration:
//! - Default values
//! - TOML configuration file (`.docqa/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the caller)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCQA_` and use double
//! underscores to separate nested levels:
//! - `DOCQA_CHUNKING__CHUNK_SIZE=800` sets `chunking.chunk_size`
//! - `DOCQA_EMBEDDING__BACKEND=hash` sets `embedding.backend`
//! - `DOCQA_RETRIEVAL__TOP_K=8` sets `retrieval.top_k`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::agent::RetrievalConfig;
use crate::chunking::ChunkingConfig;
use crate::embedding::EmbedderConfig;

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".docqa";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";

const ENV_PREFIX: &str = "DOCQA_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub embedding: EmbedderConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log levels, global and per target.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level applied to every target without an override.
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `embedding = "debug"`.
    #[serde(default)]
    pub modules: IndexMap<String, String>,
}

fn default_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            chunking: ChunkingConfig::default(),
            embedding: EmbedderConfig::default(),
            retrieval: RetrievalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: IndexMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path =
            Self::find_workspace_config().unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref(), ENV_PREFIX)
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: &Path, env_prefix: &str) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels
            .merge(Env::prefixed(env_prefix).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }

    /// Find `.docqa/settings.toml` from the current directory upwards.
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get the workspace root directory (where .docqa is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(ancestor.to_path_buf());
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Write a default settings file under `root`.
    pub fn init_config_file(root: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingBackend;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.chunking.chunk_size, 500);
        assert_eq!(settings.chunking.row_chunk_size, 10);
        assert_eq!(settings.embedding.model, "AllMiniLML6V2");
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[chunking]
chunk_size = 800
row_chunk_size = 25

[embedding]
backend = "hash"
hash_dimension = 128

[retrieval]
top_k = 6

[logging]
default = "info"

[logging.modules]
embedding = "debug"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.chunking.chunk_size, 800);
        assert_eq!(settings.chunking.row_chunk_size, 25);
        assert_eq!(settings.embedding.backend, EmbeddingBackend::Hash);
        assert_eq!(settings.embedding.hash_dimension, 128);
        assert_eq!(settings.retrieval.top_k, 6);
        assert_eq!(settings.logging.default, "info");
        assert_eq!(settings.logging.modules["embedding"], "debug");
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        fs::write(&config_path, "[chunking]\nchunk_size = 120\n").unwrap();

        let settings = Settings::load_from(&config_path).unwrap();

        // Modified value
        assert_eq!(settings.chunking.chunk_size, 120);

        // Default values should still be present
        assert_eq!(settings.chunking.row_chunk_size, 10);
        assert_eq!(settings.embedding.batch_size, 64);
        assert_eq!(settings.retrieval.top_k, 4);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.chunking.chunk_size = 2;
        settings.retrieval.top_k = 9;

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.chunking.chunk_size, 2);
        assert_eq!(loaded.retrieval.top_k, 9);
    }

    #[test]
    fn test_init_config_file_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();

        let path = Settings::init_config_file(temp_dir.path(), false).unwrap();
        assert!(path.ends_with(".docqa/settings.toml"));
        assert!(Settings::init_config_file(temp_dir.path(), false).is_err());
        assert!(Settings::init_config_file(temp_dir.path(), true).is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[chunking]\nchunk_size = 300\nrow_chunk_size = 4\n").unwrap();

        // Unique prefix so parallel tests never observe these variables
        let prefix = "DOCQA_CFGTEST_";
        unsafe {
            std::env::set_var("DOCQA_CFGTEST_CHUNKING__CHUNK_SIZE", "64");
            std::env::set_var("DOCQA_CFGTEST_RETRIEVAL__TOP_K", "2");
        }

        let settings: Settings = Settings::figment(&config_path, prefix).extract().unwrap();

        // Environment variable should override config file
        assert_eq!(settings.chunking.chunk_size, 64);
        // Config file value should be used when no env var
        assert_eq!(settings.chunking.row_chunk_size, 4);
        // Env var sets a value absent from the file
        assert_eq!(settings.retrieval.top_k, 2);

        unsafe {
            std::env::remove_var("DOCQA_CFGTEST_CHUNKING__CHUNK_SIZE");
            std::env::remove_var("DOCQA_CFGTEST_RETRIEVAL__TOP_K");
        }
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 0;
        assert!(settings.validate().is_err());
    }
}
