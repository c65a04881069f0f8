pub mod config;
pub mod generate;
pub mod states;

use anyhow::Context;
use hud_core::config::HudConfig;
use std::path::Path;

/// Load an explicit state file, or the project's (falling back to the
/// built-in states).
pub(crate) fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<HudConfig> {
    match explicit {
        Some(path) => HudConfig::load(path)
            .with_context(|| format!("failed to load state file {}", path.display())),
        None => HudConfig::load_or_default(root).context("failed to load state file"),
    }
}
