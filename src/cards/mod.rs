//! Observable cards.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions (games define cards)
//! - `Card`: Runtime card state that notifies `CardListener`s on change
//! - `Orientation`: Quarter-turn rotation of a card
//!
//! ## Neutral Cards
//!
//! Cards can have `owner: None` for shared markets, neutral obstacles, or
//! game-controlled entities.

pub mod card;

pub use card::{Card, CardId, Orientation};
