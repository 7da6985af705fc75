use ffa_core::{Routes, DEFAULT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Root of the data tree walked at startup
    pub data_dir: ConfigValue<PathBuf>,
    /// HTTP port for `ffa serve`
    pub port: ConfigValue<u16>,
    /// Extension of files the watcher reacts to
    pub extension: ConfigValue<String>,
    /// Directory name -> category
    pub routes: ConfigValue<Routes>,
    /// Directories subscribed to for changes
    pub watch_dirs: ConfigValue<Vec<PathBuf>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    port: Option<u16>,
    extension: Option<String>,
    routes: Option<Routes>,
    watch_dirs: Option<Vec<PathBuf>>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_dir = ConfigValue::new(PathBuf::from("data"), ConfigSource::Default);
        let mut port = ConfigValue::new(8080, ConfigSource::Default);
        let mut extension = ConfigValue::new(DEFAULT_EXTENSION.to_string(), ConfigSource::Default);
        let mut routes = ConfigValue::new(Routes::default(), ConfigSource::Default);
        let mut watch_dirs = None;
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(p) = file_config.port {
                port = ConfigValue::new(p, ConfigSource::File);
            }
            if let Some(ext) = file_config.extension {
                extension = ConfigValue::new(ext, ConfigSource::File);
            }
            if let Some(r) = file_config.routes {
                routes = ConfigValue::new(r, ConfigSource::File);
            }
            if let Some(dirs) = file_config.watch_dirs {
                let dirs = dirs
                    .into_iter()
                    .map(|d| resolve_relative(&path, d))
                    .collect();
                watch_dirs = Some(ConfigValue::new(dirs, ConfigSource::File));
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("FFA_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(p) = std::env::var("FFA_PORT").ok().and_then(|p| p.parse().ok()) {
            port = ConfigValue::new(p, ConfigSource::Environment);
        }

        // Without explicit watch_dirs, watch one directory per route under data_dir
        let watch_dirs = watch_dirs.unwrap_or_else(|| {
            let dirs = routes
                .value
                .dir_names()
                .map(|name| data_dir.value.join(name))
                .collect();
            ConfigValue::new(dirs, ConfigSource::Default)
        });

        Ok(Self {
            data_dir,
            port,
            extension,
            routes,
            watch_dirs,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/ffa/
    /// - macOS: ~/Library/Application Support/ffa/
    /// - Windows: %APPDATA%/ffa/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ffa")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Relative paths in the config file are relative to the file's directory
fn resolve_relative(config_path: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&path))
            .unwrap_or(path)
    } else {
        path
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
