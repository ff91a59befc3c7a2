use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use promptreg::PromptLoader;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory (or single file) of templates to load
    pub templates_dir: Option<PathBuf>,
    /// Start from the templates compiled into the binary
    pub include_builtin: bool,
    /// Glob applied to file names when loading a directory
    pub filter: Option<String>,
    /// Log file location; defaults under the local data directory
    pub log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: None,
            include_builtin: true,
            filter: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. ./promptreg.yml
    /// 3. ~/.config/promptreg/promptreg.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        let local_config = PathBuf::from(format!("{}.yml", project_name));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            eyre::bail!("log-level must not be empty");
        }
        if let Some(filter) = &self.filter {
            glob::Pattern::new(filter).with_context(|| format!("filter '{}' is not a valid glob", filter))?;
        }
        Ok(())
    }

    /// Resolved log file path
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(env!("CARGO_PKG_NAME"))
                .join("logs")
                .join(format!("{}.log", env!("CARGO_PKG_NAME")))
        })
    }

    /// Loader configured with this config's filter
    pub fn loader(&self) -> Result<PromptLoader> {
        let loader = PromptLoader::new();
        match &self.filter {
            Some(filter) => Ok(loader.with_filter(filter)?),
            None => Ok(loader),
        }
    }
}
