// ─── Platform ───
// Host architecture detection. Selects the 64-bit or 32-bit launch template.

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X64,
    X86,
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Architecture::X64 => write!(f, "x64"),
            Architecture::X86 => write!(f, "x86"),
        }
    }
}

/// Native CPU architecture of the host, not of this process. A 32-bit
/// launcher running under WOW64 still reports `X64`.
pub fn host_architecture() -> Architecture {
    match native_arch_name() {
        Some(arch) => {
            debug!("native cpu arch: {}", arch);
            architecture_from_name(&arch)
        }
        None => {
            warn!("native cpu arch unavailable, falling back to pointer width");
            if cfg!(target_pointer_width = "64") {
                Architecture::X64
            } else {
                Architecture::X86
            }
        }
    }
}

/// `GetNativeSystemInfo` sees through WOW64, unlike the `GetSystemInfo`
/// call behind `sysinfo::System::cpu_arch` on Windows.
#[cfg(target_os = "windows")]
fn native_arch_name() -> Option<String> {
    use windows_sys::Win32::System::SystemInformation::{
        GetNativeSystemInfo, PROCESSOR_ARCHITECTURE_AMD64, PROCESSOR_ARCHITECTURE_ARM64,
        PROCESSOR_ARCHITECTURE_INTEL, SYSTEM_INFO,
    };

    // SAFETY: SYSTEM_INFO is plain data; GetNativeSystemInfo fills it in and
    // cannot fail.
    let arch = unsafe {
        let mut info: SYSTEM_INFO = std::mem::zeroed();
        GetNativeSystemInfo(&mut info);
        info.Anonymous.Anonymous.wProcessorArchitecture
    };

    match arch {
        PROCESSOR_ARCHITECTURE_AMD64 => Some("x86_64".to_string()),
        PROCESSOR_ARCHITECTURE_INTEL => Some("x86".to_string()),
        PROCESSOR_ARCHITECTURE_ARM64 => Some("aarch64".to_string()),
        other => {
            debug!("unrecognized processor architecture {}", other);
            None
        }
    }
}

/// `uname` machine name; there is no WOW64-style emulation layer to look
/// through on these hosts.
#[cfg(not(target_os = "windows"))]
fn native_arch_name() -> Option<String> {
    sysinfo::System::cpu_arch()
}

/// Only AMD64 gets the 64-bit template; the native jars shipped with the game
/// are x86 and x86_64 builds.
pub fn architecture_from_name(name: &str) -> Architecture {
    match name.trim().to_ascii_lowercase().as_str() {
        "x86_64" | "amd64" | "x64" => Architecture::X64,
        _ => Architecture::X86,
    }
}
