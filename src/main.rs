// Prevents the launcher from opening its own console window on Windows in release.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> std::process::ExitCode {
    avrix_launcher_lib::run()
}
