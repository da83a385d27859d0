use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Paint};

/// Stroke drawn along the outer edge of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Solid axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Rounded rectangle with uniform corner radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub paint: Paint,
    pub border: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub paint: Paint,
    pub border: Option<Border>,
}

/// Remote or bundled image, cover-fitted into `rect`.
///
/// `source` is opaque to the engine (a URL for feed images). Loading and
/// placeholder fallback are the renderer's business.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub source: String,
    pub radius: f32,
}

/// Single run of text, top-left anchored at `origin`, wrapped at `max_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    pub max_width: Option<f32>,
}

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a payload struct above
/// - add a new variant here
/// - add a push helper on `DrawList`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Image(ImageCmd),
    Text(TextCmd),
}
