//! State file: layout, output location and the ordered HUD states.

use crate::error::{HudError, Result};
use crate::paths;
use crate::scene::SceneParams;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Smallest scene that still fits the fixed HUD panel positions.
pub const MIN_SCENE_WIDTH: u32 = 640;
pub const MIN_SCENE_HEIGHT: u32 = 360;

const SUPPORTED_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    fn warning(message: String) -> Self {
        Self {
            level: WarnLevel::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: WarnLevel::Error,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_scene_width")]
    pub scene_width: u32,
    #[serde(default = "default_scene_height")]
    pub scene_height: u32,
    /// Horizontal space between scenes.
    #[serde(default = "default_gap")]
    pub gap: u32,
    /// Room below each scene for its title.
    #[serde(default = "default_title_margin")]
    pub title_margin: u32,
    /// Width of every progress bar track.
    #[serde(default = "default_bar_width")]
    pub bar_width: u32,
}

fn default_scene_width() -> u32 {
    640
}

fn default_scene_height() -> u32 {
    360
}

fn default_gap() -> u32 {
    48
}

fn default_title_margin() -> u32 {
    32
}

fn default_bar_width() -> u32 {
    152
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scene_width: default_scene_width(),
            scene_height: default_scene_height(),
            gap: default_gap(),
            title_margin: default_title_margin(),
            bar_width: default_bar_width(),
        }
    }
}

impl Layout {
    /// Horizontal distance between the origins of adjacent scenes.
    pub fn stride(&self) -> u64 {
        u64::from(self.scene_width) + u64::from(self.gap)
    }

    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.stride() as f64
    }

    /// `None` when the canvas would not fit in `u32`.
    pub fn canvas_width(&self, scenes: usize) -> Option<u32> {
        let n = u32::try_from(scenes).ok()?;
        let scenes_w = self.scene_width.checked_mul(n)?;
        let gaps_w = self.gap.checked_mul(n.saturating_sub(1))?;
        scenes_w.checked_add(gaps_w)
    }

    pub fn canvas_height(&self) -> Option<u32> {
        self.scene_height.checked_add(self.title_margin)
    }

    /// Canvas size for `scenes` side-by-side scenes.
    pub fn canvas_size(&self, scenes: usize) -> Result<(u32, u32)> {
        match (self.canvas_width(scenes), self.canvas_height()) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(HudError::InvalidConfig(format!(
                "canvas for {scenes} scenes of {}×{} (gap {}, title margin {}) exceeds {} units",
                self.scene_width,
                self.scene_height,
                self.gap,
                self.title_margin,
                u32::MAX
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// StateSpec
// ---------------------------------------------------------------------------

/// One named HUD state. Parameters sit beside the title in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub title: String,
    #[serde(flatten)]
    pub params: SceneParams,
}

impl StateSpec {
    pub fn new(title: impl Into<String>, params: SceneParams) -> Self {
        Self {
            title: title.into(),
            params,
        }
    }
}

/// The five narrative states handed to design: tank, pilot, danger, stalled,
/// run failed.
pub fn default_states() -> Vec<StateSpec> {
    vec![
        StateSpec::new(
            "01 — Tank Mode",
            SceneParams {
                damage: 1.0,
                ..SceneParams::default()
            },
        ),
        StateSpec::new(
            "02 — Pilot Mode",
            SceneParams {
                pilot: true,
                damage: 0.75,
                hp_ratio: 0.73,
                dust: 7,
                ..SceneParams::default()
            },
        ),
        StateSpec::new(
            "03 — Danger Zone",
            SceneParams {
                pilot: true,
                damage: 0.60,
                hp_ratio: 0.43,
                glitch: 0.28,
                dust: 7,
                ..SceneParams::default()
            },
        ),
        StateSpec::new(
            "04 — Stalled",
            SceneParams {
                stalled: true,
                damage: 0.0,
                dust: 3,
                ..SceneParams::default()
            },
        ),
        StateSpec::new(
            "05 — Run Failed",
            SceneParams {
                failed: true,
                damage: 0.0,
                hp_ratio: 0.0,
                dust: 3,
                ..SceneParams::default()
            },
        ),
    ]
}

// ---------------------------------------------------------------------------
// HudConfig (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub layout: Layout,
    /// Output document, relative to the project root unless absolute.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_states")]
    pub states: Vec<StateSpec>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

fn default_output() -> PathBuf {
    PathBuf::from(paths::OUTPUT_FILE)
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            layout: Layout::default(),
            output: default_output(),
            states: default_states(),
        }
    }
}

impl HudConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HudError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: HudConfig = serde_yaml::from_str(&data)?;
        tracing::debug!(path = %path.display(), states = cfg.states.len(), "loaded state file");
        Ok(cfg)
    }

    /// Load the project's state file, or the built-in states when the
    /// project has none.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = paths::states_path(root);
        match Self::load(&path) {
            Err(HudError::ConfigNotFound(_)) => {
                tracing::debug!("no state file, using built-in states");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// Write the default state file. Refuses to clobber an existing one
    /// unless `force` is set.
    pub fn init(path: &Path, force: bool) -> Result<Self> {
        let cfg = Self::default();
        let data = serde_yaml::to_string(&cfg)?;
        if force {
            crate::io::atomic_write(path, data.as_bytes())?;
        } else if !crate::io::write_if_missing(path, data.as_bytes())? {
            return Err(HudError::ConfigExists(path.to_path_buf()));
        }
        Ok(cfg)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != SUPPORTED_VERSION {
            warnings.push(ConfigWarning::error(format!(
                "unsupported version {} (expected {SUPPORTED_VERSION})",
                self.version
            )));
        }

        let l = &self.layout;
        for (name, value) in [
            ("scene_width", l.scene_width),
            ("scene_height", l.scene_height),
            ("bar_width", l.bar_width),
        ] {
            if value == 0 {
                warnings.push(ConfigWarning::error(format!("layout.{name} must be positive")));
            }
        }
        if (l.scene_width != 0 && l.scene_width < MIN_SCENE_WIDTH)
            || (l.scene_height != 0 && l.scene_height < MIN_SCENE_HEIGHT)
        {
            warnings.push(ConfigWarning::warning(format!(
                "scene size {}×{} is smaller than the HUD layout ({MIN_SCENE_WIDTH}×{MIN_SCENE_HEIGHT}); panels will be clipped",
                l.scene_width, l.scene_height
            )));
        }

        if self.states.is_empty() {
            warnings.push(ConfigWarning::error("no states defined".to_string()));
        } else if let Err(e) = l.canvas_size(self.states.len()) {
            warnings.push(ConfigWarning::error(e.to_string()));
        }

        let mut seen = HashSet::new();
        for (i, state) in self.states.iter().enumerate() {
            let label = if state.title.trim().is_empty() {
                warnings.push(ConfigWarning::warning(format!("state #{} has an empty title", i + 1)));
                format!("#{}", i + 1)
            } else {
                if !seen.insert(state.title.as_str()) {
                    warnings.push(ConfigWarning::warning(format!(
                        "duplicate state title '{}'",
                        state.title
                    )));
                }
                format!("'{}'", state.title)
            };

            let p = &state.params;
            for (field, value) in [
                ("damage", p.damage),
                ("hp_ratio", p.hp_ratio),
                ("glitch", p.glitch),
            ] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    warnings.push(ConfigWarning::error(format!(
                        "state {label}: {field}={value} is outside 0..1"
                    )));
                }
            }

            if p.stalled && p.damage > 0.0 {
                warnings.push(ConfigWarning::warning(format!(
                    "state {label}: stalled with damage={} (the HUD stalls at stability 0)",
                    p.damage
                )));
            }
            if p.failed && p.pilot {
                warnings.push(ConfigWarning::warning(format!(
                    "state {label}: failed and pilot are both set"
                )));
            }
        }

        warnings
    }

    pub fn has_errors(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
