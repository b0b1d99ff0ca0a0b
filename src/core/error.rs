use std::path::PathBuf;
use thiserror::Error;

use crate::core::java::MIN_JAVA_MAJOR;

const JDK_DOWNLOAD_URL: &str = "https://www.oracle.com/java/technologies/downloads/";

/// Central error type for the launcher.
/// Every preflight stage returns `Result<T, LauncherError>` and the bootstrap
/// pipeline turns the first failure into a single dialog.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Settings ────────────────────────────────────────
    #[error("Invalid launcher settings at {path:?}: {message}")]
    Settings { path: PathBuf, message: String },

    // ── Java ────────────────────────────────────────────
    #[error("Java not found in PATH")]
    JavaNotFound,

    #[error("Failed to determine Java version")]
    JavaVersionUnknown,

    #[error("Java {required} or higher is required, found {version}")]
    JavaVersionUnsupported { version: String, required: u32 },

    #[error("Java execution failed: {0}")]
    JavaExecution(String),

    // ── Game files ──────────────────────────────────────
    #[error("Required game folder missing: {folder}")]
    GameFilesMissing { folder: String },

    #[error("Wrapper jar '{prefix}*.jar' not found")]
    WrapperNotFound { prefix: String },
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl LauncherError {
    /// Title shown on the error dialog.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            LauncherError::JavaNotFound | LauncherError::JavaVersionUnknown => "JDK not found",
            LauncherError::JavaVersionUnsupported { .. } => "Incorrect JDK version",
            LauncherError::GameFilesMissing { .. } => "Game files not found",
            LauncherError::WrapperNotFound { .. } => "Wrapper not found",
            LauncherError::Settings { .. } => "Invalid launcher settings",
            LauncherError::JavaExecution(_) | LauncherError::Io { .. } => "Error",
        }
    }

    /// Human-readable text shown on the error dialog.
    pub fn dialog_message(&self) -> String {
        match self {
            LauncherError::JavaNotFound => format!(
                "Java is not found in PATH. Please install JDK {} or higher and add it to the PATH.\n\nDownload link: {}",
                MIN_JAVA_MAJOR, JDK_DOWNLOAD_URL
            ),
            LauncherError::JavaVersionUnknown => format!(
                "Failed to determine Java version.\n\nCheck if JDK{}+ is installed and the path is correct in the System PATH.",
                MIN_JAVA_MAJOR
            ),
            LauncherError::JavaVersionUnsupported { version, required } => format!(
                "Java {} or higher is required. Current version is {}\n\nDownload link: {}",
                required, version, JDK_DOWNLOAD_URL
            ),
            LauncherError::GameFilesMissing { .. } => "The necessary folders were not found!\n\nMove core jar file and this launch file to the root folder of your game and try again.".to_string(),
            LauncherError::WrapperNotFound { prefix } => format!(
                "The wrapper Jar file '{}' was not found.\n\nPlace it next to the launcher!",
                prefix.trim_end_matches('-')
            ),
            LauncherError::JavaExecution(_) => "Failed to start Java application.".to_string(),
            other => other.to_string(),
        }
    }

    /// Process exit code reported when the launcher stops on this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
