//! Help file creation and external viewer launch

use std::fs;
use std::path::Path;
use std::process::Command;

/// Help file name, created in the working directory
pub const HELP_FILE: &str = "help.txt";

const HELP_TEXT: &str = "Brick Blitz - Help\n\n\
Controls:\n\
- Move paddle: Mouse or A/D or Left/Right arrows\n\
- Launch ball: Space\n\
- Shoot: Left Mouse Click\n\
- Pause: P\n\n\
Perks:\n\
- Extra life, Wider paddle, Speed up ball, Fireball\n\
- BEWARE: Shrink paddle, Instant Death\n";

/// Write the instructional content if the file is missing or empty
pub fn ensure_help_file(path: &Path) {
    let needs_content = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    if needs_content {
        if let Err(err) = fs::write(path, HELP_TEXT) {
            log::warn!("Failed to write {}: {}", path.display(), err);
        }
    }
}

/// Create the help file if needed and open it in the platform viewer
/// (best effort; the in-game help screen shows the same content anyway).
pub fn open_help() {
    let path = Path::new(HELP_FILE);
    ensure_help_file(path);

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", "", HELP_FILE]).spawn();
    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(HELP_FILE).spawn();
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let result = Command::new("xdg-open").arg(HELP_FILE).spawn();

    if let Err(err) = result {
        log::warn!("Failed to open {HELP_FILE} in a viewer: {err}");
    }
}
