//! HUD colors. Values mirror the constants in `hud.gd` so the mockup and the
//! in-game HUD stay visually identical.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// N.O.V.A. / tank UI.
pub const AMBER: Color = Color::rgb(0xF5, 0x9E, 0x0B);
/// Jason / pilot UI.
pub const BLUE: Color = Color::rgb(0x40, 0xA5, 0xF5);
/// Quantum glitch overlay.
pub const VIOLET: Color = Color::rgb(0x61, 0x19, 0xCC);
/// Panel and scene background.
pub const ONYX: Color = Color::rgb(0x11, 0x11, 0x19);
/// Alerts, run failed.
pub const RED: Color = Color::rgb(0xE5, 0x19, 0x19);
/// World placeholder and annotations.
pub const GRAY: Color = Color::rgb(0x33, 0x33, 0x3F);
pub const BLACK: Color = Color::rgb(0x08, 0x08, 0x10);
