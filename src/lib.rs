pub mod core;

use std::ffi::OsString;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::core::bootstrap::Bootstrap;
use crate::core::java::{JavaProbe, SystemJava};
use crate::core::launch::SystemProcessRunner;
use crate::core::notify::{DialogNotifier, Notifier};
use crate::core::platform;
use crate::core::settings::LauncherSettings;

pub use crate::core::error::{LauncherError, LauncherResult};

/// Launcher entry point. Arguments after the program name are forwarded to
/// the game untouched.
pub fn run() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,avrix_launcher_lib=debug")),
        )
        .init();

    tracing::info!("Avrix launcher {} starting...", env!("CARGO_PKG_VERSION"));

    let notifier = DialogNotifier;
    let game_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            notifier.notify(
                &format!("Cannot read the current directory: {}", e),
                "Error",
            );
            return ExitCode::FAILURE;
        }
    };

    // Forwarded verbatim, even when not valid Unicode.
    let forwarded: Vec<OsString> = std::env::args_os().skip(1).collect();

    let probe_factory = |settings: &LauncherSettings| {
        Box::new(SystemJava::new(settings.java_path.clone())) as Box<dyn JavaProbe>
    };
    let runner = SystemProcessRunner;
    let bootstrap = Bootstrap::new(
        game_dir,
        platform::host_architecture(),
        &probe_factory,
        &runner,
        &notifier,
    );

    ExitCode::from(bootstrap.run(&forwarded))
}
