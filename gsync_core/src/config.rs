use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::GsyncError;

pub const DATABASE_FILE: &str = ".gsync.db";
pub const CONFIG_FILE: &str = ".gsync.toml";
pub const DEFAULT_GDRIVE: &str = "gdrive";
pub const DEFAULT_FOLDER_SUFFIX: &str = "-gsync";

/// Optional on-disk settings, every field may be omitted.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GsyncConfigFile {
    pub database_path: Option<PathBuf>,
    pub gdrive_binary: Option<String>,
    pub folder_suffix: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GsyncConfig {
    pub database_path: PathBuf,
    pub gdrive_binary: String,
    pub folder_suffix: String,
}

impl GsyncConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self, GsyncError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Environment variables win over the config file, which wins over
    /// the defaults.
    pub fn resolve<F>(var: F) -> Result<Self, GsyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = var("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| GsyncError::Config("HOME is not set".to_string()))?;

        let config_path = var("GSYNC_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(CONFIG_FILE));
        let config_file = Self::read_file(&config_path)?.unwrap_or_default();

        Ok(GsyncConfig {
            database_path: var("GSYNC_DATABASE_PATH")
                .map(PathBuf::from)
                .or(config_file.database_path)
                .unwrap_or_else(|| home.join(DATABASE_FILE)),
            gdrive_binary: var("GSYNC_GDRIVE")
                .or(config_file.gdrive_binary)
                .unwrap_or_else(|| DEFAULT_GDRIVE.to_string()),
            folder_suffix: config_file
                .folder_suffix
                .unwrap_or_else(|| DEFAULT_FOLDER_SUFFIX.to_string()),
        })
    }

    fn read_file(path: &Path) -> Result<Option<GsyncConfigFile>, GsyncError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded configuration from {}", path.display());
                Ok(Some(toml::from_str(&text)?))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GsyncError::Config(format!(
                "cannot read {}: {}",
                path.display(),
                err
            ))),
        }
    }
}
