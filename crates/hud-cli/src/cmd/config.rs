use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use hud_core::config::{HudConfig, WarnLevel};
use hud_core::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write the default state file (figma/hud-generator/states.yaml)
    Init {
        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Validate the state file for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    subcmd: ConfigSubcommand,
    config: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init { force } => init(root, config, force, json),
        ConfigSubcommand::Validate => validate(root, config, json),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, config: Option<&Path>, force: bool, json: bool) -> anyhow::Result<()> {
    let path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::states_path(root));
    let cfg = HudConfig::init(&path, force)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        let value = serde_json::json!({
            "path": path,
            "states": cfg.states.len(),
        });
        print_json(&value)?;
    } else {
        println!("Wrote {} ({} states)", path.display(), cfg.states.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let cfg = super::load_config(root, config)?;
    let warnings = cfg.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("State file is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if HudConfig::has_errors(&warnings) {
        anyhow::bail!("state file validation found errors");
    }

    Ok(())
}
