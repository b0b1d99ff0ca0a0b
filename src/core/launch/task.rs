// ─── Launch Task ───
// Spawns the game JVM as a console-less child process and waits for it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

use super::classpath::{get_classpath_separator, LaunchConfiguration};

/// Main class inside the wrapper jar.
pub const ENTRY_POINT: &str = "com.avrix.Launcher";

/// Lets the wrapper attach its own instrumentation agent at runtime.
const ATTACH_FLAGS: &[&str] = &[
    "-Djdk.attach.allowAttachSelf=true",
    "-XX:+EnableDynamicAgentLoading",
];

const DIAGNOSTIC_FLAGS: &[&str] = &[
    "-XX:-CreateCoredumpOnCrash",
    "-XX:-OmitStackTraceInFastThrow",
];

const MODE_FLAGS: &[&str] = &[
    "-Djava.awt.headless=true",
    "-Davrix.mode=client",
    "-Dzomboid.steam=1",
    "-Dzomboid.znetlog=1",
];

/// Program plus argument vector. The OS layer serializes it into a command
/// line, so no manual quoting happens here. Arguments stay `OsString` so
/// forwarded launcher arguments reach the JVM byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl LaunchCommand {
    pub fn to_command(&self, working_dir: &Path) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd.current_dir(working_dir);
        configure_platform_spawn(&mut cmd);
        cmd
    }
}

/// Assemble the JVM invocation.
///
/// Order: attach permissions, diagnostics, headless/mode properties, GC and
/// heap, user JVM args, `java.library.path`, `-cp`, entry point, forwarded
/// launcher arguments.
pub fn build_command(
    java_bin: &Path,
    config: &LaunchConfiguration,
    extra_jvm_args: &[String],
    forwarded_args: &[OsString],
) -> LaunchCommand {
    build_command_with_separator(
        java_bin,
        config,
        extra_jvm_args,
        forwarded_args,
        get_classpath_separator(),
    )
}

pub fn build_command_with_separator(
    java_bin: &Path,
    config: &LaunchConfiguration,
    extra_jvm_args: &[String],
    forwarded_args: &[OsString],
    separator: &str,
) -> LaunchCommand {
    let mut args: Vec<OsString> = Vec::new();

    args.extend(ATTACH_FLAGS.iter().map(OsString::from));
    args.extend(DIAGNOSTIC_FLAGS.iter().map(OsString::from));
    args.extend(MODE_FLAGS.iter().map(OsString::from));
    args.extend(config.jvm_options().iter().map(OsString::from));
    args.extend(
        extra_jvm_args
            .iter()
            .filter(|arg| !arg.trim().is_empty())
            .map(OsString::from),
    );

    args.push(
        format!(
            "-Djava.library.path={}",
            config.library_path(separator)
        )
        .into(),
    );
    args.push("-cp".into());
    args.push(config.classpath(separator).into());
    args.push(ENTRY_POINT.into());
    args.extend(forwarded_args.iter().cloned());

    LaunchCommand {
        program: java_bin.to_path_buf(),
        args,
    }
}

/// Starts a prepared command and blocks until it exits.
pub trait ProcessRunner {
    /// Returns the child's exit code (`None` when killed by a signal).
    fn run(&self, command: &LaunchCommand, working_dir: &Path) -> LauncherResult<Option<i32>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &LaunchCommand, working_dir: &Path) -> LauncherResult<Option<i32>> {
        let mut cmd = command.to_command(working_dir);
        cmd.stdin(Stdio::null());

        info!("Launching game with Java: {:?}", command.program);
        debug!("Command: {:?}", cmd);
        debug!("Command (copy/paste): {}", format_command_for_logs(&cmd));

        let mut child = cmd
            .spawn()
            .map_err(|e| LauncherError::JavaExecution(e.to_string()))?;
        info!("Game process started (pid {})", child.id());

        // No timeout: the launcher lives exactly as long as the game.
        let status = child.wait().map_err(|e| LauncherError::Io {
            path: command.program.clone(),
            source: e,
        })?;
        drop(child);

        info!("Game process exited with {}", status);
        Ok(status.code())
    }
}

fn configure_platform_spawn(cmd: &mut std::process::Command) {
    #[cfg(target_os = "windows")]
    {
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Own process group: terminal signals aimed at the launcher's
        // session do not reach the game.
        cmd.process_group(0);
    }
}

fn format_command_for_logs(cmd: &std::process::Command) -> String {
    let program = shell_escape(&cmd.get_program().to_string_lossy());
    let args = cmd
        .get_args()
        .map(|arg| shell_escape(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ");

    if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args)
    }
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric()
            || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=' | '+' | ';')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}

#[cfg(test)]
impl LaunchCommand {
    /// Value following `flag`, e.g. the classpath after `-cp`.
    pub(crate) fn arg_after(&self, flag: &str) -> Option<&str> {
        let idx = self.args.iter().position(|arg| arg == flag)?;
        self.args.get(idx + 1).and_then(|arg| arg.to_str())
    }

    pub(crate) fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|arg| arg == needle)
    }
}
