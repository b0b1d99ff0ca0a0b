// ─── Bootstrap ───
// Strict preflight pipeline: settings → Java → architecture → game folders →
// wrapper jar → spawn. The first failure is shown once and ends the run.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::{self, JavaProbe};
use crate::core::launch::{
    build_command, find_payload_artifact, first_missing_folder, LaunchConfiguration,
    ProcessRunner,
};
use crate::core::launch::artifact::PAYLOAD_PREFIX;
use crate::core::notify::Notifier;
use crate::core::platform::Architecture;
use crate::core::settings::LauncherSettings;

/// Builds the Java probe once settings are known (they may override the
/// binary).
pub type ProbeFactory<'a> = dyn Fn(&LauncherSettings) -> Box<dyn JavaProbe> + 'a;

pub struct Bootstrap<'a> {
    game_dir: PathBuf,
    architecture: Architecture,
    probe_factory: &'a ProbeFactory<'a>,
    runner: &'a dyn ProcessRunner,
    notifier: &'a dyn Notifier,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        game_dir: impl Into<PathBuf>,
        architecture: Architecture,
        probe_factory: &'a ProbeFactory<'a>,
        runner: &'a dyn ProcessRunner,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            game_dir: game_dir.into(),
            architecture,
            probe_factory,
            runner,
            notifier,
        }
    }

    /// Run the whole pipeline and return the process exit code.
    ///
    /// The child's own exit status is logged but never turned into ours.
    pub fn run(&self, forwarded_args: &[OsString]) -> u8 {
        match self.execute(forwarded_args) {
            Ok(child_code) => {
                info!("Launcher finished (game exit code {:?})", child_code);
                0
            }
            Err(err) => {
                debug!("Launch aborted: {}", err);
                self.notifier
                    .notify(&err.dialog_message(), err.dialog_title());
                err.exit_code()
            }
        }
    }

    #[instrument(skip(self, forwarded_args), fields(game_dir = ?self.game_dir))]
    fn execute(&self, forwarded_args: &[OsString]) -> LauncherResult<Option<i32>> {
        let settings = LauncherSettings::load(&self.game_dir)?;

        let probe = (self.probe_factory)(&settings);
        java::verify_java(probe.as_ref(), java::MIN_JAVA_MAJOR)?;

        info!("Host architecture: {}", self.architecture);
        let mut config = LaunchConfiguration::for_architecture(self.architecture);
        if let Some(max_memory_mb) = settings.max_memory_mb {
            config = config.with_max_memory(max_memory_mb);
        }

        if let Some(folder) = first_missing_folder(&self.game_dir) {
            return Err(LauncherError::GameFilesMissing {
                folder: folder.to_string(),
            });
        }

        let payload = find_payload_artifact(&self.game_dir)?.ok_or_else(|| {
            LauncherError::WrapperNotFound {
                prefix: PAYLOAD_PREFIX.to_string(),
            }
        })?;
        let config = config.with_payload(&payload);

        let command = build_command(
            &settings.java_path,
            &config,
            &settings.extra_jvm_args,
            forwarded_args,
        );
        self.runner.run(&command, &self.game_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::path::Path;

    use crate::core::launch::classpath::get_classpath_separator;
    use crate::core::launch::folders::REQUIRED_FOLDERS;
    use crate::core::launch::LaunchCommand;
    use crate::core::settings::SETTINGS_FILE;

    struct CannedJava {
        reachable: bool,
        version: String,
        version_queried: std::rc::Rc<Cell<bool>>,
    }

    impl JavaProbe for CannedJava {
        fn is_runtime_reachable(&self) -> bool {
            self.reachable
        }

        fn query_version_string(&self) -> String {
            self.version_queried.set(true);
            self.version.clone()
        }
    }

    #[derive(Default)]
    struct RecordingRunner {
        launched: RefCell<Vec<(LaunchCommand, PathBuf)>>,
        fail_spawn: bool,
        child_code: Option<i32>,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, command: &LaunchCommand, working_dir: &Path) -> LauncherResult<Option<i32>> {
            if self.fail_spawn {
                return Err(LauncherError::JavaExecution("spawn refused".into()));
            }
            self.launched
                .borrow_mut()
                .push((command.clone(), working_dir.to_path_buf()));
            Ok(self.child_code)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: RefCell<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, title: &str) {
            self.shown
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
        }
    }

    fn game_dir(tag: &str) -> PathBuf {
        let temp =
            std::env::temp_dir().join(format!("bootstrap-test-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(&temp).unwrap();
        for folder in REQUIRED_FOLDERS {
            std::fs::create_dir_all(temp.join(folder)).unwrap();
        }
        std::fs::write(temp.join("Avrix-Core-3.2.jar"), b"core").unwrap();
        temp
    }

    fn java(reachable: bool, version: &str) -> (Box<ProbeFactory<'static>>, std::rc::Rc<Cell<bool>>) {
        let queried = std::rc::Rc::new(Cell::new(false));
        let flag = queried.clone();
        let version = version.to_string();
        let factory: Box<ProbeFactory<'static>> = Box::new(move |_settings: &LauncherSettings| {
            Box::new(CannedJava {
                reachable,
                version: version.clone(),
                version_queried: flag.clone(),
            }) as Box<dyn JavaProbe>
        });
        (factory, queried)
    }

    #[test]
    fn launches_client_with_64bit_template() {
        let dir = game_dir("happy");
        let (factory, _) = java(true, "17.0.1");
        let runner = RecordingRunner {
            child_code: Some(3),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        let code = bootstrap.run(&[OsString::from("-debug")]);

        assert_eq!(code, 0, "child exit code must not leak into ours");
        assert!(notifier.shown.borrow().is_empty());
        let launched = runner.launched.borrow();
        assert_eq!(launched.len(), 1);
        let (command, working_dir) = &launched[0];
        assert_eq!(working_dir, &dir);
        assert_eq!(command.program, PathBuf::from("java"));

        let sep = get_classpath_separator();
        let classpath = command.arg_after("-cp").unwrap();
        assert!(classpath.ends_with(&format!(
            "commons-compress-1.18.jar{sep}lwjgl-natives-windows.jar{sep}lwjgl-glfw-natives-windows.jar{sep}\
             lwjgl-jemalloc-natives-windows.jar{sep}lwjgl-opengl-natives-windows.jar{sep}Avrix-Core-3.2.jar"
        )));
        assert!(command.has_arg(&format!("-Djava.library.path=./{sep}win64/")));
        assert!(command.has_arg("-XX:+UseZGC"));
        assert!(command.has_arg("-Xmx3072m"));
        assert!(command.args.last().is_some_and(|arg| arg == "-debug"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreachable_java_stops_before_any_other_stage() {
        let dir = std::env::temp_dir().join(format!(
            "bootstrap-test-no-java-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let (factory, queried) = java(false, "17.0.1");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        // The directory has neither game folders nor a wrapper jar: any later
        // stage running would show a different dialog.
        let code = bootstrap.run(&[]);

        assert_eq!(code, 1);
        assert!(!queried.get());
        assert!(runner.launched.borrow().is_empty());
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "JDK not found");
        assert!(shown[0].1.contains("not found in PATH"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn old_java_is_rejected_with_version_in_message() {
        let dir = game_dir("old-java");
        let (factory, _) = java(true, "11.0.2");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        let shown = notifier.shown.borrow();
        assert_eq!(shown[0].0, "Incorrect JDK version");
        assert!(shown[0].1.contains("11.0.2"));
        assert!(runner.launched.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn undeterminable_version_is_fatal() {
        let dir = game_dir("no-version");
        let (factory, _) = java(true, "");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        assert!(notifier.shown.borrow()[0]
            .1
            .starts_with("Failed to determine Java version"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_folder_skips_artifact_scan_and_launch() {
        let dir = game_dir("no-fmod");
        std::fs::remove_dir_all(dir.join("fmod")).unwrap();
        std::fs::remove_file(dir.join("Avrix-Core-3.2.jar")).unwrap();
        let (factory, _) = java(true, "21.0.2");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X86, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "Game files not found");
        assert!(runner.launched.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_wrapper_jar_is_fatal() {
        let dir = game_dir("no-wrapper");
        std::fs::remove_file(dir.join("Avrix-Core-3.2.jar")).unwrap();
        let (factory, _) = java(true, "17.0.1");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        assert_eq!(notifier.shown.borrow()[0].0, "Wrapper not found");
        assert!(runner.launched.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn spawn_failure_notifies_and_fails() {
        let dir = game_dir("spawn-fail");
        let (factory, _) = java(true, "17.0.1");
        let runner = RecordingRunner {
            fail_spawn: true,
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0], ("Error".to_string(), "Failed to start Java application.".to_string()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn settings_override_java_heap_and_jvm_args() {
        let dir = game_dir("settings");
        std::fs::write(
            dir.join(SETTINGS_FILE),
            r#"{ "java_path": "C:/jdk-21/bin/java.exe", "max_memory_mb": 6144, "extra_jvm_args": ["-Dfoo=bar"] }"#,
        )
        .unwrap();
        let seen_java = RefCell::new(None);
        let factory = |settings: &LauncherSettings| {
            *seen_java.borrow_mut() = Some(settings.java_path.clone());
            Box::new(CannedJava {
                reachable: true,
                version: "21.0.2".into(),
                version_queried: Default::default(),
            }) as Box<dyn JavaProbe>
        };
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, &factory, &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 0);
        assert_eq!(
            seen_java.borrow().as_deref(),
            Some(Path::new("C:/jdk-21/bin/java.exe"))
        );
        let launched = runner.launched.borrow();
        let command = &launched[0].0;
        assert_eq!(command.program, PathBuf::from("C:/jdk-21/bin/java.exe"));
        assert!(command.has_arg("-Xmx6144m"));
        assert!(!command.has_arg("-Xmx3072m"));
        assert!(command.has_arg("-Dfoo=bar"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_settings_fail_before_probing_java() {
        let dir = game_dir("bad-settings");
        std::fs::write(dir.join(SETTINGS_FILE), "{ broken").unwrap();
        let (factory, queried) = java(true, "17.0.1");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        assert!(!queried.get());
        assert_eq!(notifier.shown.borrow()[0].0, "Invalid launcher settings");
        assert!(runner.launched.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn settings_cannot_lower_java_floor() {
        let dir = game_dir("java-floor");
        std::fs::write(dir.join(SETTINGS_FILE), r#"{ "min_java_major": 8 }"#).unwrap();
        let (factory, queried) = java(true, "11.0.2");
        let runner = RecordingRunner::default();
        let notifier = RecordingNotifier::default();
        let bootstrap = Bootstrap::new(&dir, Architecture::X64, factory.as_ref(), &runner, &notifier);

        assert_eq!(bootstrap.run(&[]), 1);
        assert!(!queried.get());
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "Invalid launcher settings");
        assert!(runner.launched.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
