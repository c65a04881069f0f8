//! One HUD scene: its parameters and the fixed-layout primitive list.

use crate::config::Layout;
use crate::palette::{AMBER, BLACK, BLUE, GRAY, ONYX, RED, VIOLET};
use crate::primitive::{annotate, line, rect, text, Dash, Primitive, Stroke, TextAnchor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stability readout maximum.
pub const STABILITY_MAX: f64 = 100.0;
/// Jason HP readout maximum.
pub const PILOT_HP_MAX: f64 = 30.0;
/// Overlay fill opacity when no glitch is active.
pub const AMBIENT_OVERLAY_OPACITY: f64 = 0.025;

const OVERLAY_STROKE_OPACITY: f64 = 0.18;
const GLITCH_STROKE_OPACITY: f64 = 0.55;

// ---------------------------------------------------------------------------
// SceneParams
// ---------------------------------------------------------------------------

/// The HUD state drawn by one scene. Omitted fields take the tank-mode
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    /// Stability bar fill fraction.
    #[serde(default = "default_full")]
    pub damage: f64,
    /// Jason HP bar fill fraction.
    #[serde(default = "default_full")]
    pub hp_ratio: f64,
    #[serde(default)]
    pub pilot: bool,
    #[serde(default)]
    pub stalled: bool,
    #[serde(default)]
    pub failed: bool,
    /// Overlay opacity; 0 means no glitch.
    #[serde(default)]
    pub glitch: f64,
    #[serde(default = "default_dust")]
    pub dust: u32,
}

fn default_full() -> f64 {
    1.0
}

fn default_dust() -> u32 {
    12
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            damage: default_full(),
            hp_ratio: default_full(),
            pilot: false,
            stalled: false,
            failed: false,
            glitch: 0.0,
            dust: default_dust(),
        }
    }
}

impl SceneParams {
    pub fn stability_readout(&self) -> i64 {
        (self.damage * STABILITY_MAX).round_ties_even() as i64
    }

    pub fn hp_readout(&self) -> i64 {
        (self.hp_ratio * PILOT_HP_MAX).round_ties_even() as i64
    }

    pub fn glitch_active(&self) -> bool {
        self.glitch > 0.0
    }

    /// Short flag list for listings, e.g. `pilot,glitch`.
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.pilot {
            flags.push("pilot");
        }
        if self.stalled {
            flags.push("stalled");
        }
        if self.failed {
            flags.push("failed");
        }
        if self.glitch_active() {
            flags.push("glitch");
        }
        flags
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: String,
    pub offset: f64,
    pub primitives: Vec<Primitive>,
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.primitives.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Compose one scene in local coordinates, then shift every primitive by
/// `offset`. Emission order is paint order.
pub fn compose(title: &str, params: &SceneParams, layout: &Layout, offset: f64) -> Scene {
    let w = f64::from(layout.scene_width);
    let h = f64::from(layout.scene_height);
    let bar_w = f64::from(layout.bar_width);

    let mut e: Vec<Primitive> = Vec::with_capacity(48);

    // Background
    e.push(rect(0.0, 0.0, w, h, ONYX).into());
    e.push(
        text(
            format!("Game World  {}×{}", layout.scene_width, layout.scene_height),
            220.0,
            170.0,
            11.0,
            GRAY,
        )
        .opacity(0.30)
        .into(),
    );

    // N.O.V.A. stability panel
    e.push(rect(8.0, 8.0, 192.0, 50.0, ONYX).opacity(0.88).radius(2.0).into());
    e.push(text("N·O·V·A", 12.0, 11.0, 9.0, AMBER).bold().into());
    e.push(text("STABILITY", 12.0, 24.0, 6.0, AMBER).opacity(0.55).into());
    e.push(rect(12.0, 32.0, bar_w, 8.0, BLACK).opacity(0.80).into());
    e.push(rect(12.0, 32.0, bar_w * params.damage, 8.0, AMBER).into());
    e.push(text(params.stability_readout().to_string(), 167.0, 31.0, 8.0, AMBER).into());
    e.push(text("/100", 181.0, 31.0, 7.0, AMBER).opacity(0.38).into());
    e.extend(annotate("hud.gd → StabilityBar", 204.0, 10.0));

    // Phase dust counter
    e.push(rect(8.0, 62.0, 112.0, 17.0, ONYX).opacity(0.88).radius(2.0).into());
    e.push(text("◆", 12.0, 63.0, 9.0, AMBER).into());
    e.push(text(params.dust.to_string(), 24.0, 63.0, 9.0, AMBER).into());
    e.push(text("PHASE DUST", 38.0, 65.0, 6.0, AMBER).opacity(0.50).into());
    e.extend(annotate("hud.gd → dust_count", 124.0, 63.0));

    if params.pilot {
        e.push(rect(8.0, 83.0, 192.0, 36.0, ONYX).opacity(0.88).radius(2.0).into());
        e.push(text("PILOT", 12.0, 86.0, 9.0, BLUE).bold().into());
        e.push(text("HP", 12.0, 98.0, 6.0, BLUE).opacity(0.55).into());
        e.push(rect(12.0, 106.0, bar_w, 8.0, BLACK).opacity(0.80).into());
        e.push(rect(12.0, 106.0, bar_w * params.hp_ratio, 8.0, BLUE).into());
        e.push(text(params.hp_readout().to_string(), 167.0, 105.0, 8.0, BLUE).into());
        e.push(text("/30", 178.0, 105.0, 7.0, BLUE).opacity(0.38).into());
        e.extend(annotate(
            "hud.gd → JasonPanel (visible in Pilot Mode only)",
            204.0,
            83.0,
        ));

        // Neural tether reference
        e.push(
            line(
                120.0,
                330.0,
                520.0,
                330.0,
                Stroke::new(AMBER).opacity(0.28).dash(Dash::new(6, 4)),
            )
            .into(),
        );
        e.push(
            text("← 400px Neural Tether max →", 150.0, 332.0, 7.0, AMBER)
                .opacity(0.38)
                .into(),
        );
    }

    let mode = if params.pilot {
        "◉  PILOT MODE"
    } else {
        "◉  TANK MODE"
    };
    e.push(text(mode, 8.0, 338.0, 9.0, AMBER).into());
    e.extend(annotate("hud.gd → mode_label", 112.0, 337.0));

    if params.stalled {
        e.push(rect(192.0, 98.0, 256.0, 26.0, ONYX).opacity(0.92).radius(2.0).into());
        e.push(text("⚠  N·O·V·A  STALLED", 202.0, 101.0, 11.0, AMBER).bold().into());
        e.extend(annotate("hud.gd → stalled_alert (Stability = 0)", 192.0, 128.0));
    }

    if params.failed {
        e.push(rect(96.0, 160.0, 448.0, 26.0, ONYX).opacity(0.92).radius(2.0).into());
        e.push(
            text("✖  RUN FAILED  —  N·O·V·A DESTROYED", 106.0, 163.0, 10.0, RED)
                .bold()
                .into(),
        );
        e.extend(annotate("hud.gd → run_failed_label", 96.0, 190.0));
    }

    // Glitch overlay, always drawn
    let (fill_op, stroke_op) = if params.glitch_active() {
        (params.glitch, GLITCH_STROKE_OPACITY)
    } else {
        (AMBIENT_OVERLAY_OPACITY, OVERLAY_STROKE_OPACITY)
    };
    e.push(
        rect(0.0, 0.0, w, h, VIOLET)
            .opacity(fill_op)
            .stroke(Stroke::new(VIOLET).opacity(stroke_op).dash(Dash::new(6, 4)))
            .into(),
    );
    if params.glitch_active() {
        // Sits under the pilot panel when it is shown.
        let label_y = if params.pilot { 86.0 } else { 62.0 };
        e.push(
            text(
                format!(
                    "neural_glitch.gdshader  interference_strength={:.2}",
                    params.glitch
                ),
                8.0,
                label_y + 18.0,
                7.0,
                VIOLET,
            )
            .opacity(0.75)
            .into(),
        );
    }

    e.push(
        text(
            title,
            f64::from(layout.scene_width / 2),
            h + 16.0,
            10.0,
            GRAY,
        )
        .bold()
        .anchor(TextAnchor::Middle)
        .into(),
    );

    tracing::debug!(title, offset, primitives = e.len(), "composed scene");

    Scene {
        title: title.to_string(),
        offset,
        primitives: e.iter().map(|p| p.translated(offset)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Paint, Rect};

    fn layout() -> Layout {
        Layout::default()
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .primitives
            .iter()
            .filter_map(|p| p.as_text())
            .map(|t| t.content.as_str())
            .collect()
    }

    fn has_text(scene: &Scene, needle: &str) -> bool {
        texts(scene).iter().any(|t| t.contains(needle))
    }

    fn filled_rects(scene: &Scene, color: crate::palette::Color) -> Vec<&Rect> {
        scene
            .primitives
            .iter()
            .filter_map(|p| p.as_rect())
            .filter(|r| r.fill == Paint::Solid(color))
            .collect()
    }

    #[test]
    fn stability_bar_fill_tracks_damage() {
        for damage in [0.0, 0.43, 0.6, 0.75, 1.0] {
            let params = SceneParams {
                damage,
                ..SceneParams::default()
            };
            let scene = compose("s", &params, &layout(), 0.0);
            let fill = filled_rects(&scene, AMBER)[0];
            let expected = ((152.0 * damage).round_ties_even() as u32).max(1);
            assert_eq!(fill.width, expected, "damage {damage}");
            assert!(has_text(&scene, &(damage * 100.0).round_ties_even().to_string()));
        }
    }

    #[test]
    fn readouts_round_to_nearest() {
        let params = SceneParams {
            damage: 0.6,
            hp_ratio: 0.43,
            ..SceneParams::default()
        };
        assert_eq!(params.stability_readout(), 60);
        assert_eq!(params.hp_readout(), 13);

        let params = SceneParams {
            hp_ratio: 0.73,
            ..SceneParams::default()
        };
        assert_eq!(params.hp_readout(), 22);
    }

    #[test]
    fn half_values_round_to_even() {
        // 0.125 * 100 = 12.5, 0.1875 * 152 = 28.5, 0.25 * 30 = 7.5
        let params = SceneParams {
            damage: 0.125,
            hp_ratio: 0.25,
            ..SceneParams::default()
        };
        assert_eq!(params.stability_readout(), 12);
        assert_eq!(params.hp_readout(), 8);

        let params = SceneParams {
            damage: 0.1875,
            ..SceneParams::default()
        };
        let scene = compose("s", &params, &layout(), 0.0);
        assert_eq!(filled_rects(&scene, AMBER)[0].width, 28);
        assert!(texts(&scene).contains(&"19"));
    }

    #[test]
    fn empty_bar_keeps_one_unit_sliver() {
        let params = SceneParams {
            damage: 0.0,
            ..SceneParams::default()
        };
        let scene = compose("s", &params, &layout(), 0.0);
        assert_eq!(filled_rects(&scene, AMBER)[0].width, 1);
        assert!(scene
            .primitives
            .iter()
            .filter_map(|p| p.as_rect())
            .all(|r| r.width >= 1 && r.height >= 1));
    }

    #[test]
    fn tank_mode_omits_pilot_panel_and_tether() {
        let scene = compose("tank", &SceneParams::default(), &layout(), 0.0);
        assert!(!has_text(&scene, "PILOT"));
        assert!(!has_text(&scene, "Neural Tether"));
        assert!(!has_text(&scene, "JasonPanel"));
        assert!(!scene.primitives.iter().any(|p| matches!(p, Primitive::Line(_))));
        assert!(filled_rects(&scene, BLUE).is_empty());
        assert!(has_text(&scene, "◉  TANK MODE"));
    }

    #[test]
    fn pilot_mode_adds_hp_panel_and_tether() {
        let params = SceneParams {
            pilot: true,
            hp_ratio: 0.73,
            ..SceneParams::default()
        };
        let scene = compose("pilot", &params, &layout(), 0.0);
        assert!(has_text(&scene, "◉  PILOT MODE"));
        assert!(has_text(&scene, "← 400px Neural Tether max →"));
        assert!(texts(&scene).contains(&"22"));
        let hp_fill = filled_rects(&scene, BLUE)[0];
        assert_eq!(hp_fill.width, 111);
        let lines = scene
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line(_)))
            .count();
        assert_eq!(lines, 1);
    }

    #[test]
    fn stalled_and_failed_panels_are_conditional() {
        let calm = compose("calm", &SceneParams::default(), &layout(), 0.0);
        assert!(!has_text(&calm, "STALLED"));
        assert!(!has_text(&calm, "RUN FAILED"));

        let params = SceneParams {
            stalled: true,
            damage: 0.0,
            ..SceneParams::default()
        };
        let stalled = compose("stalled", &params, &layout(), 0.0);
        assert!(has_text(&stalled, "⚠  N·O·V·A  STALLED"));
        assert!(has_text(&stalled, "stalled_alert"));
        assert!(!has_text(&stalled, "RUN FAILED"));

        let params = SceneParams {
            failed: true,
            ..SceneParams::default()
        };
        let failed = compose("failed", &params, &layout(), 0.0);
        let banner = failed
            .primitives
            .iter()
            .filter_map(|p| p.as_text())
            .find(|t| t.content.contains("RUN FAILED"))
            .unwrap();
        assert_eq!(banner.fill, RED);
        assert!(banner.bold);
    }

    fn overlay(scene: &Scene) -> &Rect {
        filled_rects(scene, VIOLET)[0]
    }

    #[test]
    fn no_glitch_uses_ambient_overlay() {
        let scene = compose("calm", &SceneParams::default(), &layout(), 0.0);
        let o = overlay(&scene);
        assert_eq!(o.fill_opacity, AMBIENT_OVERLAY_OPACITY);
        assert_eq!(o.stroke.unwrap().opacity, OVERLAY_STROKE_OPACITY);
        assert_eq!((o.width, o.height), (640, 360));
        assert!(!has_text(&scene, "interference_strength"));
    }

    #[test]
    fn glitch_sets_overlay_opacity_and_readout() {
        let params = SceneParams {
            glitch: 0.28,
            ..SceneParams::default()
        };
        let scene = compose("danger", &params, &layout(), 0.0);
        assert_eq!(overlay(&scene).fill_opacity, 0.28);
        let readout = scene
            .primitives
            .iter()
            .filter_map(|p| p.as_text())
            .find(|t| t.content.contains("interference_strength"))
            .unwrap();
        assert!(readout.content.ends_with("interference_strength=0.28"));
        assert_eq!(readout.y, 80.0);

        let params = SceneParams {
            glitch: 0.5,
            pilot: true,
            ..SceneParams::default()
        };
        let scene = compose("danger", &params, &layout(), 0.0);
        let readout = scene
            .primitives
            .iter()
            .filter_map(|p| p.as_text())
            .find(|t| t.content.contains("interference_strength"))
            .unwrap();
        assert!(readout.content.ends_with("=0.50"));
        assert_eq!(readout.y, 104.0);
    }

    #[test]
    fn offset_applies_to_every_primitive() {
        let params = SceneParams {
            pilot: true,
            stalled: true,
            failed: true,
            glitch: 0.3,
            ..SceneParams::default()
        };
        let local = compose("s", &params, &layout(), 0.0);
        let shifted = compose("s", &params, &layout(), 1376.0);
        assert_eq!(local.primitives.len(), shifted.primitives.len());
        for (a, b) in local.primitives.iter().zip(&shifted.primitives) {
            assert_eq!(a.translated(1376.0), *b);
        }
        for p in &shifted.primitives {
            let (lo, hi) = p.x_span();
            assert!(lo >= 1376.0 && hi <= 1376.0 + 640.0, "{p}");
        }
    }

    #[test]
    fn title_is_centered_below_scene() {
        let scene = compose("01 — Tank Mode", &SceneParams::default(), &layout(), 688.0);
        let title = scene.primitives.last().unwrap().as_text().unwrap();
        assert_eq!(title.content, "01 — Tank Mode");
        assert_eq!(title.x, 688.0 + 320.0);
        assert_eq!(title.baseline(), 360.0 + 16.0 + 10.0);
        assert_eq!(title.anchor, TextAnchor::Middle);
    }
}
