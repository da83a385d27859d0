//! Bop UI — retained widget tree on top of `bop-engine`.
//!
//! The two interesting widgets are [`widgets::swipe_deck::SwipeDeck`] and
//! [`widgets::carousel::LoopingCarousel`]. Their behaviour lives in the pure
//! state machines [`swipe`] and [`looping`]; the widgets only route events
//! into them and paint what they report.
//!
//! # Driving a frame
//!
//! ```rust,ignore
//! use bop_ui::prelude::*;
//!
//! let mut scene = UiScene::new();
//! let mut clock = FrameClock::new();
//! let mut deck = SwipeDeck::new(SwipeConfig::default(), CarouselConfig::default())
//!     .on_resolve_right(|card| println!("liked {}", card.id));
//!
//! // Once per frame:
//! let input = UiInput { events: host_events };
//! let draw_list = scene.frame_ref(&mut deck, viewport, clock.tick(), &input);
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget); override `tick` if the widget owns
//! timers or animations.

pub mod constraints;
pub mod event;
pub mod looping;
pub mod painter;
pub mod scene;
pub mod swipe;
pub mod widget;
pub mod widgets;

/// Everything you need to build and extend UI — import this in your component files.
pub mod prelude {
    pub use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::looping::{CarouselConfig, CarouselState};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::swipe::{Direction, GestureState, SwipeConfig, SwipeMachine, SwipePhase};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        card::CardView,
        carousel::LoopingCarousel,
        dots::DotRow,
        image::ImageView,
        swipe_deck::{DeckCommand, SwipeDeck},
        text::Text,
    };

    // Re-export the engine primitives everyone needs.
    pub use bop_engine::coords::{Rect, Vec2};
    pub use bop_engine::input::{InputEvent, Key};
    pub use bop_engine::paint::{Color, Paint};
    pub use bop_engine::scene::{Border, DrawList, Layer};
    pub use bop_engine::time::{FrameClock, FrameTime};

    pub use bop_feed::{CardRecord, Decision};
}
