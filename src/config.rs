use crate::log_debug;
use anyhow::{Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration filename, looked up at the repository root
pub const PROJECT_CONFIG_FILENAME: &str = ".gitsnap.toml";

/// Configuration structure for the git-snap application
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    /// Copy-stage settings
    #[serde(default)]
    pub copy: CopyConfig,
    /// Archive-stage settings
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Flag indicating if this config is from a project file
    #[serde(skip)]
    pub is_project_config: bool,
}

/// Copy-stage configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct CopyConfig {
    /// What to do when a listed file cannot be read or copied
    #[serde(default)]
    pub on_error: CopyErrorPolicy,
}

/// Policy for per-file copy failures (e.g. a modified file deleted on disk)
#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CopyErrorPolicy {
    /// Report the file and continue with the rest of the run
    #[default]
    Skip,
    /// Fail the whole run on the first unreadable file
    Abort,
}

/// Archive-stage configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ArchiveConfig {
    /// Keep the uncompressed staging directory after a successful archive
    #[serde(default)]
    pub keep_staging: bool,
}

impl Config {
    /// Load the personal configuration file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            toml::from_str(&config_content)?
        } else {
            Self::default()
        };

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Load configuration for a specific repository: the personal config
    /// merged with the repository's project config, if one exists
    pub fn load_for_repo(repo_root: &Path) -> Result<Self> {
        let mut config = Self::load()?;

        if let Ok(project_config) = Self::load_project_config(repo_root) {
            config.merge_with_project_config(project_config);
        }

        Ok(config)
    }

    /// Load project-specific configuration from the repository root
    pub fn load_project_config(repo_root: &Path) -> Result<Self> {
        let config_path = repo_root.join(PROJECT_CONFIG_FILENAME);
        if !config_path.exists() {
            return Err(anyhow!("Project configuration file not found"));
        }

        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| anyhow!("Failed to read project config file: {}", e))?;

        let mut config: Self = toml::from_str(&config_str).map_err(|e| {
            anyhow!(
                "Invalid project configuration file format: {}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })?;

        config.is_project_config = true;
        Ok(config)
    }

    /// Merge this config with project-specific config, with project config
    /// taking precedence
    pub fn merge_with_project_config(&mut self, project_config: Self) {
        log_debug!("Merging with project configuration");
        self.copy = project_config.copy;
        self.archive = project_config.archive;
    }

    /// Save the configuration to the personal config file
    pub fn save(&self) -> Result<()> {
        // Don't save project configs to the personal config file
        if self.is_project_config {
            return Ok(());
        }

        let config_path = Self::get_config_path()?;
        let config_content = toml::to_string(self)?;
        fs::write(config_path, config_content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Get the path to the personal configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("git-snap");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }
}
