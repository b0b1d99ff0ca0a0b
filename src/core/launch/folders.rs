use std::path::Path;

use tracing::{debug, warn};

/// Unpacked game asset folders that must sit next to the launcher.
pub const REQUIRED_FOLDERS: [&str; 4] = ["zombie", "se", "fmod", "javax"];

/// First required folder missing from `game_dir`, checked in declaration
/// order. Stops at the first gap.
pub fn first_missing_folder(game_dir: &Path) -> Option<&'static str> {
    let missing = REQUIRED_FOLDERS
        .iter()
        .copied()
        .find(|folder| !game_dir.join(folder).is_dir());

    match missing {
        Some(folder) => warn!("Required game folder {:?} missing in {:?}", folder, game_dir),
        None => debug!("All game folders present in {:?}", game_dir),
    }
    missing
}

pub fn all_required_folders_present(game_dir: &Path) -> bool {
    first_missing_folder(game_dir).is_none()
}
