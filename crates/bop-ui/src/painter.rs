use bop_engine::coords::{Rect, Vec2};
use bop_engine::paint::{Color, Paint};
use bop_engine::scene::{Border, DrawList, Layer, ZIndex};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with a high-level API and exposes the
/// pointer state so widgets can express pressed visuals directly in paint.
/// Every call gets the next z-index, so later calls draw on top.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    z: i32,
    /// Current pointer position, if the pointer is over the surface.
    pub pointer_pos: Option<Vec2>,
    /// True while the primary button is held down.
    pub pointer_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        pointer_pos: Option<Vec2>,
        pointer_pressed: bool,
    ) -> Self {
        Self { draw_list, z: 0, pointer_pos, pointer_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    /// Returns `true` if the primary button is held and the pointer is over `rect`.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.pointer_pressed && self.pointer_pos.is_some_and(|p| rect.contains(p))
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// Rounded rectangle with optional border.
    ///
    /// Pass `radius = 0.0` for sharp corners. Pass `border = None` for no stroke.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radius, paint.into(), border);
    }

    pub fn fill_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, paint.into(), border);
    }

    /// Image cover-fitted into `rect`.
    pub fn image(&mut self, rect: Rect, source: &str, radius: f32) {
        let z = self.next_z();
        self.draw_list.push_image(z, rect, source, radius);
    }

    /// Text at `origin` (top-left of the first line), wrapped at `max_width`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, size, color, origin, max_width);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Paints `f` inside `layer` (composed with any enclosing layer).
    ///
    /// Identity layers are skipped entirely.
    pub fn with_layer(&mut self, layer: Layer, f: impl FnOnce(&mut Painter<'a>)) {
        if layer.is_identity() {
            f(self);
            return;
        }
        self.draw_list.push_layer(layer);
        f(self);
        self.draw_list.pop_layer();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
