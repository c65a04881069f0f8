use crate::output::print_json;
use anyhow::Context;
use hud_core::config::{HudConfig, WarnLevel};
use hud_core::document::Document;
use hud_core::paths;
use std::path::{Path, PathBuf};

pub fn run(
    root: &Path,
    config: Option<&Path>,
    output: Option<PathBuf>,
    stdout: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root, config)?;

    let warnings = config.validate();
    for w in warnings.iter().filter(|w| w.level == WarnLevel::Warning) {
        tracing::warn!("{}", w.message);
    }
    if HudConfig::has_errors(&warnings) {
        for w in warnings.iter().filter(|w| w.level == WarnLevel::Error) {
            eprintln!("[error] {}", w.message);
        }
        anyhow::bail!("state file has errors; run 'hud-mockup config validate'");
    }

    let doc = Document::from_config(&config).context("failed to assemble document")?;

    if stdout {
        print!("{}", doc.to_svg());
        return Ok(());
    }

    let path = output.unwrap_or_else(|| paths::output_path(root, &config.output));
    let summary = doc
        .write(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&summary)?;
    } else {
        let layout = &config.layout;
        println!("Written → {}", summary.output.display());
        println!(
            "Canvas size: {}×{}px — {} states at {}×{} each",
            summary.width, summary.height, summary.scenes, layout.scene_width, layout.scene_height
        );
    }
    Ok(())
}
