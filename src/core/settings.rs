use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

/// Optional overrides read from the game folder.
pub const SETTINGS_FILE: &str = "avrix-launcher.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSettings {
    /// Java binary; a bare name is resolved through `PATH`.
    pub java_path: PathBuf,
    /// Heap ceiling in MiB. `None` keeps the architecture default.
    pub max_memory_mb: Option<u32>,
    pub extra_jvm_args: Vec<String>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            java_path: PathBuf::from("java"),
            max_memory_mb: None,
            extra_jvm_args: Vec::new(),
        }
    }
}

impl LauncherSettings {
    /// Load `avrix-launcher.json` from `game_dir`. A missing file yields the
    /// defaults; an unreadable or malformed one is an error.
    pub fn load(game_dir: &Path) -> LauncherResult<Self> {
        let path = game_dir.join(SETTINGS_FILE);
        if !path.exists() {
            debug!("No {} in {:?}, using defaults", SETTINGS_FILE, game_dir);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| LauncherError::Io {
            path: path.clone(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&raw).map_err(|e| LauncherError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;
        settings.validate(&path)?;

        info!("Loaded launcher settings from {:?}", path);
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> LauncherResult<()> {
        if self.java_path.as_os_str().is_empty() {
            return Err(LauncherError::Settings {
                path: path.to_path_buf(),
                message: "java_path must not be empty".into(),
            });
        }
        if self.max_memory_mb == Some(0) {
            return Err(LauncherError::Settings {
                path: path.to_path_buf(),
                message: "max_memory_mb must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
