use crate::domain::{config::LlmCtlConfig, error::{LlmCtlError, LlmCtlResult}};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> LlmCtlResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_config_path(&dir));

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Manager rooted at explicit paths
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration: defaults, then the global file, then the project
    /// file, each later source replacing the sections it defines.
    pub fn load_config(&self) -> LlmCtlResult<LlmCtlConfig> {
        let mut config = LlmCtlConfig::default();

        if self.global_config_path.exists() {
            debug!("Loading global config from {}", self.global_config_path.display());
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                debug!("Loading project config from {}", project_path.display());
                let content = Self::read(project_path)?;
                let table: toml::Table = toml::from_str(&content).map_err(|e| LlmCtlError::Config {
                    message: format!("Failed to parse config file {}: {}", project_path.display(), e),
                })?;
                let project = Self::parse(project_path, &content)?;
                if table.contains_key("global") {
                    config.global = project.global;
                }
                if table.contains_key("logs") {
                    config.logs = project.logs;
                }
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> LlmCtlResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| LlmCtlError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("llmctl").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
        let mut path = start;

        loop {
            let config_path = path.join(".llmctl").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    fn read(path: &Path) -> LlmCtlResult<String> {
        fs::read_to_string(path).map_err(|e| LlmCtlError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })
    }

    fn parse(path: &Path, content: &str) -> LlmCtlResult<LlmCtlConfig> {
        toml::from_str(content).map_err(|e| LlmCtlError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> LlmCtlResult<LlmCtlConfig> {
        let content = Self::read(path)?;
        Self::parse(path, &content)
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &LlmCtlConfig) -> LlmCtlResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| LlmCtlError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LlmCtlError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        fs::write(path, content).map_err(|e| LlmCtlError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Write a default configuration file, refusing to overwrite one
    pub fn init_config(&self, path: Option<&Path>) -> LlmCtlResult<PathBuf> {
        let path = path.unwrap_or(&self.global_config_path).to_path_buf();

        if path.exists() {
            return Err(LlmCtlError::Config {
                message: format!("Configuration already exists at {}", path.display()),
            });
        }

        self.save_config_to_path(&path, &LlmCtlConfig::default())?;
        Ok(path)
    }
}
