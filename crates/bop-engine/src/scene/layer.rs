use crate::coords::Vec2;

/// Similarity transform plus opacity applied to a group of draw commands.
///
/// Stored in canonical form `p' = scale · R(rotation) · p + translate`, which
/// composes exactly. Use [`Layer::about`] to build one around a pivot (a
/// card rotates about its own centre).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layer {
    pub scale: f32,
    /// Degrees, positive = clockwise on screen.
    pub rotation_deg: f32,
    pub translate: Vec2,
    /// Multiplies the alpha of every command in the layer.
    pub opacity: f32,
}

impl Layer {
    pub const IDENTITY: Layer = Layer {
        scale: 1.0,
        rotation_deg: 0.0,
        translate: Vec2::zero(),
        opacity: 1.0,
    };

    /// Scale and rotate about `pivot`, then move by `offset`.
    pub fn about(pivot: Vec2, offset: Vec2, rotation_deg: f32, scale: f32, opacity: f32) -> Self {
        let linear = Layer { scale, rotation_deg, translate: Vec2::zero(), opacity };
        let moved_pivot = linear.apply(pivot);
        Layer {
            translate: pivot + offset - moved_pivot,
            ..linear
        }
    }

    /// Opacity-only layer.
    pub fn faded(opacity: f32) -> Self {
        Layer { opacity, ..Self::IDENTITY }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a point from layer space to the parent space.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let rotated = Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
        rotated * self.scale + self.translate
    }

    /// `self` applied after `inner`: the effective layer of a child pushed inside `self`.
    #[must_use]
    pub fn then(&self, inner: &Layer) -> Layer {
        Layer {
            scale: self.scale * inner.scale,
            rotation_deg: self.rotation_deg + inner.rotation_deg,
            translate: self.apply(inner.translate),
            opacity: (self.opacity * inner.opacity).clamp(0.0, 1.0),
        }
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::IDENTITY
    }
}
