//! Drawing primitives and their SVG encoding.
//!
//! Builders are pure: they only describe an element. Encoding happens through
//! `Display`, so a primitive list can be written straight into a document.

use crate::palette::{Color, GRAY};
use std::fmt;

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Average glyph advance of the 7px annotation font.
const ANNOTATION_CHAR_PX: f64 = 5.2;
const ANNOTATION_PADDING: u32 = 10;
const ANNOTATION_HEIGHT: f64 = 14.0;
const ANNOTATION_FONT_SIZE: f64 = 7.0;

// ---------------------------------------------------------------------------
// Paint / Dash / Stroke
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    None,
    Solid(Color),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Solid(c) => write!(f, "{c}"),
        }
    }
}

/// Dash pattern: `on` units drawn, `off` units skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dash {
    pub on: u32,
    pub off: u32,
}

impl Dash {
    pub const fn new(on: u32, off: u32) -> Self {
        Self { on, off }
    }
}

impl fmt::Display for Dash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.on, self.off)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub opacity: f64,
    pub width: f64,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            width: 1.0,
            dash: None,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }

    fn write_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            self.color, self.opacity, self.width
        )?;
        if let Some(dash) = self.dash {
            write!(f, r#" stroke-dasharray="{dash}""#)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub fill: Paint,
    pub fill_opacity: f64,
    pub radius: Option<f64>,
    pub stroke: Option<Stroke>,
}

/// Round a computed extent to whole units (ties to even), never below 1.
fn extent(v: f64) -> u32 {
    v.round_ties_even().max(1.0) as u32
}

/// Rectangle at `(x, y)`. Width and height are rounded and clamped to >= 1.
pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: impl Into<Paint>) -> Rect {
    Rect {
        x,
        y,
        width: extent(width),
        height: extent(height),
        fill: fill.into(),
        fill_opacity: 1.0,
        radius: None,
        stroke: None,
    }
}

impl Rect {
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = (radius != 0.0).then_some(radius);
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}""#,
            self.x, self.y, self.width, self.height, self.fill, self.fill_opacity
        )?;
        if let Some(r) = self.radius {
            write!(f, r#" rx="{r}" ry="{r}""#)?;
        }
        if let Some(stroke) = &self.stroke {
            stroke.write_attrs(f)?;
        }
        f.write_str("/>")
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A single-line label. `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub fill: Color,
    pub bold: bool,
    pub opacity: f64,
    pub anchor: TextAnchor,
}

pub fn text(content: impl Into<String>, x: f64, y: f64, size: f64, fill: Color) -> Text {
    Text {
        content: content.into(),
        x,
        y,
        size,
        fill,
        bold: false,
        opacity: 1.0,
        anchor: TextAnchor::Start,
    }
}

impl Text {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// SVG places text by baseline; the box top plus the font size.
    pub fn baseline(&self) -> f64 {
        self.y + self.size
    }
}

/// Escape the characters that would otherwise be parsed as markup.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = if self.bold { "700" } else { "400" };
        write!(
            f,
            r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" font-weight="{weight}" fill="{}" fill-opacity="{}" text-anchor="{}">{}</text>"#,
            self.x,
            self.baseline(),
            self.size,
            self.fill,
            self.opacity,
            self.anchor.as_str(),
            escape_text(&self.content)
        )
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Line {
    Line {
        x1,
        y1,
        x2,
        y2,
        stroke,
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            self.x1, self.y1, self.x2, self.y2
        )?;
        self.stroke.write_attrs(f)?;
        f.write_str("/>")
    }
}

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Text(Text),
    Line(Line),
}

impl From<Rect> for Primitive {
    fn from(r: Rect) -> Self {
        Primitive::Rect(r)
    }
}

impl From<Text> for Primitive {
    fn from(t: Text) -> Self {
        Primitive::Text(t)
    }
}

impl From<Line> for Primitive {
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl Primitive {
    /// Copy shifted horizontally by `dx`.
    pub fn translated(&self, dx: f64) -> Primitive {
        match self {
            Primitive::Rect(r) => Primitive::Rect(Rect { x: r.x + dx, ..r.clone() }),
            Primitive::Text(t) => Primitive::Text(Text { x: t.x + dx, ..t.clone() }),
            Primitive::Line(l) => Primitive::Line(Line {
                x1: l.x1 + dx,
                x2: l.x2 + dx,
                ..l.clone()
            }),
        }
    }

    /// Horizontal extent as `(min_x, max_x)`. Text reports its anchor point
    /// only, since glyph widths are not known here.
    pub fn x_span(&self) -> (f64, f64) {
        match self {
            Primitive::Rect(r) => (r.x, r.x + f64::from(r.width)),
            Primitive::Text(t) => (t.x, t.x),
            Primitive::Line(l) => (l.x1.min(l.x2), l.x1.max(l.x2)),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Primitive::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Primitive::Rect(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Rect(r) => write!(f, "{r}"),
            Primitive::Text(t) => write!(f, "{t}"),
            Primitive::Line(l) => write!(f, "{l}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotation callout
// ---------------------------------------------------------------------------

/// Dashed grey callout naming the engine element a visual maps to.
/// Returns the outline followed by its label.
pub fn annotate(content: &str, x: f64, y: f64) -> [Primitive; 2] {
    let chars = content.chars().count() as f64;
    let width = (chars * ANNOTATION_CHAR_PX) as u32 + ANNOTATION_PADDING;
    let frame = rect(x, y, f64::from(width), ANNOTATION_HEIGHT, Paint::None).stroke(
        Stroke::new(GRAY)
            .opacity(0.35)
            .dash(Dash::new(3, 3))
            .width(1.0),
    );
    let label = text(content, x + 4.0, y + 2.0, ANNOTATION_FONT_SIZE, GRAY).opacity(0.65);
    [frame.into(), label.into()]
}
