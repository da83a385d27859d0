//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - carry the clip rect and layer transform each command was recorded under

mod cmd;
mod layer;
mod list;
mod order;

pub use cmd::{Border, CircleCmd, DrawCmd, ImageCmd, RectCmd, RoundedRectCmd, TextCmd};
pub use layer::Layer;
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
