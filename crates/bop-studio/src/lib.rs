//! Headless studio for the bop swipe deck.
//!
//! Loads a TOML config, pulls cards from the feed API (or a JSON fixture),
//! and replays a gesture script against a [`screen::FeedScreen`] one fixed
//! frame at a time. Decisions go to the API through a background
//! [`bop_feed::Recorder`], or to the log when offline.

pub mod cli;
pub mod config;
pub mod runner;
pub mod screen;
pub mod script;
