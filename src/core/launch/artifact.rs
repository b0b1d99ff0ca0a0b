use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// File stem prefix of the Avrix wrapper jar, e.g. `Avrix-Core-3.2.jar`.
pub const PAYLOAD_PREFIX: &str = "Avrix-Core-";
pub const PAYLOAD_EXTENSION: &str = "jar";

/// Scan `game_dir` (non-recursive) for the wrapper jar.
///
/// The first entry in directory order wins. That order is filesystem
/// dependent, so with several matching jars any one of them may be picked;
/// extra matches are only reported in the log.
pub fn find_payload_artifact(game_dir: &Path) -> LauncherResult<Option<String>> {
    let entries = std::fs::read_dir(game_dir).map_err(|source| LauncherError::Io {
        path: game_dir.to_path_buf(),
        source,
    })?;

    let mut selected: Option<String> = None;
    let mut ignored = 0usize;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if !is_payload_path(&path) {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if selected.is_none() {
            debug!("Payload candidate {:?}", name);
            selected = Some(name.to_string());
        } else {
            ignored += 1;
            warn!("Ignoring additional payload candidate {:?}", name);
        }
    }

    if let Some(name) = &selected {
        info!("Using wrapper jar {:?} ({} other candidates)", name, ignored);
    }
    Ok(selected)
}

fn is_payload_path(path: &Path) -> bool {
    let extension_matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == PAYLOAD_EXTENSION);
    let stem_matches = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.starts_with(PAYLOAD_PREFIX));

    extension_matches && stem_matches
}
