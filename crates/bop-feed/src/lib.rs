//! Feed side of the bop swipe deck.
//!
//! - [`record`]: typed card data resolved once from the API shape
//! - [`deck`]: the owner-side cursor over the card list
//! - [`client`] / [`source`]: where pages of cards come from
//! - [`interaction`]: fire-and-forget like/dislike recording

pub mod client;
pub mod config;
pub mod deck;
pub mod error;
pub mod interaction;
pub mod record;
pub mod source;

pub use client::FeedClient;
pub use config::ApiConfig;
pub use deck::{Decision, DeckState};
pub use error::FeedError;
pub use interaction::{
    Interaction, InteractionKind, InteractionSink, InteractionTarget, LogSink, MemorySink,
    Recorder, RecorderStats,
};
pub use record::{ApiItem, CardRecord};
pub use source::{FeedSource, FixtureFeed};
