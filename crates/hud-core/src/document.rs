//! Assemble every configured state into one side-by-side SVG document.

use crate::config::{HudConfig, Layout, StateSpec};
use crate::error::{HudError, Result};
use crate::primitive::Primitive;
use crate::scene::{self, Scene};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub scenes: Vec<Scene>,
}

/// What a generation run produced, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub scenes: usize,
    pub primitives: usize,
}

impl Document {
    /// Compose each state at `index × (scene_width + gap)` and size the
    /// canvas to fit them all plus the title strip.
    pub fn assemble(states: &[StateSpec], layout: &Layout) -> Result<Self> {
        if states.is_empty() {
            return Err(HudError::NoStates);
        }
        let (width, height) = layout.canvas_size(states.len())?;
        let scenes: Vec<Scene> = states
            .iter()
            .enumerate()
            .map(|(i, s)| scene::compose(&s.title, &s.params, layout, layout.offset_of(i)))
            .collect();
        Ok(Self {
            width,
            height,
            scenes,
        })
    }

    pub fn from_config(config: &HudConfig) -> Result<Self> {
        Self::assemble(&config.states, &config.layout)
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.scenes.iter().flat_map(|s| s.primitives.iter())
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Serialize and write atomically to `path`.
    pub fn write(&self, path: &Path) -> Result<Summary> {
        crate::io::atomic_write(path, self.to_svg().as_bytes())?;
        let summary = self.summary(path);
        tracing::info!(
            path = %path.display(),
            width = summary.width,
            height = summary.height,
            scenes = summary.scenes,
            "wrote HUD mockup"
        );
        Ok(summary)
    }

    pub fn summary(&self, path: &Path) -> Summary {
        Summary {
            output: path.to_path_buf(),
            width: self.width,
            height: self.height,
            scenes: self.scenes.len(),
            primitives: self.primitives().count(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(f, r#"<svg xmlns="http://www.w3.org/2000/svg""#)?;
        writeln!(f, r#"     width="{w}" height="{h}""#)?;
        writeln!(f, r#"     viewBox="0 0 {w} {h}">"#)?;
        writeln!(f, "  <defs>")?;
        writeln!(
            f,
            "    <style>text {{ font-family: Inter, system-ui, sans-serif; }}</style>"
        )?;
        writeln!(f, "  </defs>")?;
        writeln!(f)?;

        for (i, scene) in self.scenes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{scene}")?;
        }

        f.write_str("\n\n</svg>\n")
    }
}
