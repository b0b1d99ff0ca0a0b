// ─── Classpath Builder ───
// Fixed launch template for the game client: classpath, native library path
// and JVM tuning flags, chosen by host architecture.

use crate::core::platform::Architecture;

/// Game libraries in classloader order. The working directory comes first so
/// loose classes next to the launcher shadow the jars.
const BASE_CLASSPATH: &[&str] = &[
    "./",
    "istack-commons-runtime.jar",
    "jassimp.jar",
    "javacord-2.0.17-shaded.jar",
    "javax.activation-api.jar",
    "jaxb-api.jar",
    "jaxb-runtime.jar",
    "lwjgl.jar",
    "lwjgl-glfw.jar",
    "lwjgl-jemalloc.jar",
    "lwjgl-opengl.jar",
    "lwjgl_util.jar",
    "sqlite-jdbc-3.27.2.1.jar",
    "trove-3.0.3.jar",
    "uncommons-maths-1.2.3.jar",
    "commons-compress-1.18.jar",
];

const NATIVES_X64: &[&str] = &[
    "lwjgl-natives-windows.jar",
    "lwjgl-glfw-natives-windows.jar",
    "lwjgl-jemalloc-natives-windows.jar",
    "lwjgl-opengl-natives-windows.jar",
];

const NATIVES_X86: &[&str] = &[
    "lwjgl-natives-windows-x86.jar",
    "lwjgl-glfw-natives-windows-x86.jar",
    "lwjgl-jemalloc-natives-windows-x86.jar",
    "lwjgl-opengl-natives-windows-x86.jar",
];

const LIBRARY_ROOT: &str = "./";

/// Everything the JVM needs besides the constant flags and the entry point.
///
/// Built once per run with [`LaunchConfiguration::for_architecture`]; the
/// consuming `with_*` methods finish it before it is handed to the process
/// supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfiguration {
    classpath: Vec<String>,
    library_path: Vec<String>,
    jvm_options: Vec<String>,
}

impl LaunchConfiguration {
    pub fn for_architecture(arch: Architecture) -> Self {
        let (natives, native_dir, gc, heap) = match arch {
            Architecture::X64 => (NATIVES_X64, "win64/", "-XX:+UseZGC", "-Xmx3072m"),
            Architecture::X86 => (NATIVES_X86, "win32/", "-XX:+UseG1GC", "-Xmx1200m"),
        };

        let classpath = BASE_CLASSPATH
            .iter()
            .chain(natives.iter())
            .map(|entry| entry.to_string())
            .collect();

        Self {
            classpath,
            library_path: vec![LIBRARY_ROOT.to_string(), native_dir.to_string()],
            jvm_options: vec![gc.to_string(), heap.to_string()],
        }
    }

    /// Replace the heap ceiling picked for the architecture.
    pub fn with_max_memory(mut self, max_memory_mb: u32) -> Self {
        self.jvm_options.retain(|opt| !opt.starts_with("-Xmx"));
        self.jvm_options.push(format!("-Xmx{}m", max_memory_mb));
        self
    }

    /// Append the wrapper jar; it always loads after the game libraries.
    pub fn with_payload(mut self, payload: &str) -> Self {
        self.classpath.push(payload.to_string());
        self
    }

    pub fn classpath_entries(&self) -> &[String] {
        &self.classpath
    }

    pub fn library_path_entries(&self) -> &[String] {
        &self.library_path
    }

    pub fn jvm_options(&self) -> &[String] {
        &self.jvm_options
    }

    pub fn classpath(&self, separator: &str) -> String {
        self.classpath.join(separator)
    }

    pub fn library_path(&self, separator: &str) -> String {
        self.library_path.join(separator)
    }
}

/// Platform-specific Java classpath separator.
pub fn get_classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}
