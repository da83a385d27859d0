//! Paint model shared between UI and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, vertical gradient)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Top-to-bottom blend, used for the caption scrim over card images.
    VerticalGradient { top: Color, bottom: Color },
}

impl Paint {
    /// Returns the same paint with every stop faded by `opacity`.
    #[must_use]
    pub fn with_opacity(&self, opacity: f32) -> Self {
        match self {
            Paint::Solid(c) => Paint::Solid(c.with_opacity(opacity)),
            Paint::VerticalGradient { top, bottom } => Paint::VerticalGradient {
                top: top.with_opacity(opacity),
                bottom: bottom.with_opacity(opacity),
            },
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}
