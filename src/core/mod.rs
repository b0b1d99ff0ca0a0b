// ─── Avrix Launcher Core ───
// Native bootstrap for the Avrix game client.
//
// Architecture:
//   core/
//     bootstrap/  — Linear preflight pipeline + exit codes
//     java/       — Java reachability and version checks
//     platform/   — Native CPU architecture
//     launch/     — Launch template, game folders, wrapper jar, process spawner
//     notify/     — Modal error dialogs
//     settings/   — Optional JSON overrides

pub mod bootstrap;
pub mod error;
pub mod java;
pub mod launch;
pub mod notify;
pub mod platform;
pub mod settings;
