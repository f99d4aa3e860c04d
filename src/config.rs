use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cloner::{CloneOptions, DEFAULT_CONCURRENCY};

pub const DEFAULT_DATABASE_PATH: &str = "workspaces.db";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    pub concurrency: usize,
    /// Used when the settings table has no template workspace id
    pub template_workspace_id: Option<String>,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            template_workspace_id: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub clone: CloneConfig,
}

impl AppConfig {
    /// Reads the YAML file at `path`. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clone.concurrency == 0 {
            bail!("clone.concurrency must be greater than zero");
        }
        if self.database.path.trim().is_empty() {
            bail!("database.path must not be empty");
        }
        Ok(())
    }

    pub fn clone_options(&self) -> CloneOptions {
        CloneOptions {
            concurrency: self.clone.concurrency,
        }
    }
}
