//! Core table types: entity ids, players, configuration, RNG.
//!
//! These are the building blocks shared by every subject. Games configure
//! piles via `PileConfig` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;

pub use entity::{EntityAllocator, EntityId};
pub use player::PlayerId;
pub use rng::{TableRng, TableRngState};
pub use config::{PileConfig, PilePosition, PileVisibility};
