use std::path::PathBuf;
use std::process::{Command, Stdio};

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use tracing::{debug, info, instrument, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// Oldest Java major release the Avrix core runs on.
pub const MIN_JAVA_MAJOR: u32 = 17;

/// Queries a Java installation. `SystemJava` shells out to the real binary;
/// tests substitute canned answers.
pub trait JavaProbe {
    /// `true` iff `java -version` runs and exits successfully.
    fn is_runtime_reachable(&self) -> bool;

    /// Quoted version taken from `java -fullversion`, or an empty string when
    /// it cannot be determined.
    fn query_version_string(&self) -> String;
}

/// Java binary resolved through `PATH` or an explicit settings override.
#[derive(Debug, Clone)]
pub struct SystemJava {
    binary: PathBuf,
}

impl SystemJava {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, flag: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(flag).stdin(Stdio::null());
        #[cfg(target_os = "windows")]
        {
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
        cmd
    }
}

impl JavaProbe for SystemJava {
    #[instrument(skip(self), fields(binary = ?self.binary))]
    fn is_runtime_reachable(&self) -> bool {
        match self
            .command("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => {
                debug!("java -version exited with {}", status);
                status.success()
            }
            Err(e) => {
                debug!("java -version could not be started: {}", e);
                false
            }
        }
    }

    #[instrument(skip(self), fields(binary = ?self.binary))]
    fn query_version_string(&self) -> String {
        let output = match self.command("-fullversion").output() {
            Ok(output) => output,
            Err(e) => {
                warn!("java -fullversion could not be started: {}", e);
                return String::new();
            }
        };

        // `-fullversion` writes to stderr on every JDK seen so far; merge both
        // streams the way `2>&1` would.
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        debug!("java -fullversion: {}", combined.trim_end());

        parse_version_string(&combined).unwrap_or_default()
    }
}

/// Runs the three environment checks in order and returns the detected
/// version string.
pub fn verify_java(probe: &dyn JavaProbe, required_major: u32) -> LauncherResult<String> {
    if !probe.is_runtime_reachable() {
        return Err(LauncherError::JavaNotFound);
    }

    let version = probe.query_version_string();
    if version.is_empty() {
        return Err(LauncherError::JavaVersionUnknown);
    }

    if !is_version_acceptable(&version, required_major) {
        return Err(LauncherError::JavaVersionUnsupported {
            version,
            required: required_major,
        });
    }

    info!("Java {} accepted (required >= {})", version, required_major);
    Ok(version)
}

/// Text between the first two `"` in `output`.
pub fn parse_version_string(output: &str) -> Option<String> {
    let start = output.find('"')?;
    let end = output[start + 1..].find('"')?;
    Some(output[start + 1..start + 1 + end].to_string())
}

/// Leading integer of the first dot-separated component, e.g. `17` for
/// `17.0.2+8` and `21` for `21-ea`.
pub fn parse_major_version(version: &str) -> Option<u32> {
    let first_part = version.split('.').next().unwrap_or("");
    let digits: String = first_part
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

pub fn is_version_acceptable(version: &str, required_major: u32) -> bool {
    parse_major_version(version).is_some_and(|major| major >= required_major)
}
