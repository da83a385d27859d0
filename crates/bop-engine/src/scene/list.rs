use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Paint};

use super::cmd::{Border, CircleCmd, ImageCmd, RectCmd, RoundedRectCmd, TextCmd};
use super::{DrawCmd, Layer, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect + layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in the command's own (pre-layer) space. `None` = no clipping.
    pub clip_rect: Option<Rect>,
    /// Effective transform and opacity, already composed with all parents.
    pub layer: Layer,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Clipping and layers
///
/// [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) and
/// [`push_layer`](Self::push_layer) / [`pop_layer`](Self::pop_layer) are
/// independent stacks; both must be balanced within a frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Top is the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
    /// Top is the current effective layer, already composed with all parents.
    layer_stack: Vec<Layer>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and both stacks. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
        self.layer_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip rect and layer.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
            layer: self.current_layer(),
        });

        self.sorted_dirty = true;
    }

    // ── clip ──────────────────────────────────────────────────────────────

    /// Begins a scissor region, intersected with any parent clip rect.
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap produces a zero-area rect so the renderer skips those items.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    // ── layer ─────────────────────────────────────────────────────────────

    /// Begins a layer; commands pushed until [`pop_layer`](Self::pop_layer)
    /// carry `layer` composed with every enclosing layer.
    #[inline]
    pub fn push_layer(&mut self, layer: Layer) {
        let effective = self.current_layer().then(&layer);
        self.layer_stack.push(effective);
    }

    /// # Panics
    /// Panics (debug only) if called without a matching `push_layer`.
    #[inline]
    pub fn pop_layer(&mut self) {
        debug_assert!(!self.layer_stack.is_empty(), "pop_layer called without matching push_layer");
        self.layer_stack.pop();
    }

    #[inline]
    pub fn current_layer(&self) -> Layer {
        self.layer_stack.last().copied().unwrap_or(Layer::IDENTITY)
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, color }));
    }

    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radius: f32,
        paint: Paint,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radius, paint, border }));
    }

    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        paint: Paint,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, paint, border }));
    }

    #[inline]
    pub fn push_image(&mut self, z: ZIndex, rect: Rect, source: impl Into<String>, radius: f32) {
        self.push(z, DrawCmd::Image(ImageCmd { rect, source: source.into(), radius }));
    }

    #[inline]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        self.push(z, DrawCmd::Text(TextCmd { text: text.into(), size, color, origin, max_width }));
    }

    // ── paint order ───────────────────────────────────────────────────────

    /// Iterates items in paint order (back-to-front) without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut dl = DrawList::new();
        dl.push_solid_rect(ZIndex::new(5), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        dl.push_solid_rect(ZIndex::new(1), Rect::new(1.0, 0.0, 1.0, 1.0), Color::WHITE);
        dl.push_solid_rect(ZIndex::new(1), Rect::new(2.0, 0.0, 1.0, 1.0), Color::WHITE);

        let xs: Vec<f32> = dl
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Rect(r) => r.rect.origin.x,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        dl.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        dl.push_solid_rect(ZIndex::default(), Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        dl.pop_clip();
        dl.pop_clip();
        assert_eq!(dl.items()[0].clip_rect, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn layers_compose_and_unwind() {
        let mut dl = DrawList::new();
        dl.push_layer(Layer::faded(0.5));
        dl.push_layer(Layer::faded(0.5));
        dl.push_image(ZIndex::default(), Rect::new(0.0, 0.0, 10.0, 10.0), "a.jpg", 0.0);
        dl.pop_layer();
        dl.push_image(ZIndex::default(), Rect::new(0.0, 0.0, 10.0, 10.0), "b.jpg", 0.0);
        dl.pop_layer();
        dl.push_image(ZIndex::default(), Rect::new(0.0, 0.0, 10.0, 10.0), "c.jpg", 0.0);

        let opacities: Vec<f32> = dl.items().iter().map(|i| i.layer.opacity).collect();
        assert_eq!(opacities, vec![0.25, 0.5, 1.0]);
    }
}
