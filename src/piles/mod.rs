//! Card piles.
//!
//! Piles are **game-configured**: games describe each pile (draw pile,
//! discard, hand, market) with a `PileConfig`, and the pile enforces its
//! capacity and default insertion point.
//!
//! ## Key Types
//!
//! - `CardPile`: ordered, observable container of card ids
//! - `PileConfig`: pile properties (from `core::config`)
//! - `PilePosition`: insertion point (top, bottom, index)

pub mod pile;

pub use pile::CardPile;

// Re-export pile types from core for convenience
pub use crate::core::config::{PileConfig, PilePosition, PileVisibility};
