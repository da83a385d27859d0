pub mod button;
pub mod card;
pub mod carousel;
pub mod dots;
pub mod image;
pub mod swipe_deck;
pub mod text;
