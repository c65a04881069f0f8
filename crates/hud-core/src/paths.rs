use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Path constants
// ---------------------------------------------------------------------------

pub const STATES_FILE: &str = "figma/hud-generator/states.yaml";
pub const OUTPUT_FILE: &str = "figma/hud-generator/hud-mockup.svg";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn states_path(root: &Path) -> PathBuf {
    root.join(STATES_FILE)
}

/// Resolve a configured output path against the project root.
/// Absolute paths are returned unchanged.
pub fn output_path(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}
