//! Pile configuration.
//!
//! Games describe each pile on the table (draw pile, discard pile, hand,
//! market row) with a `PileConfig`. The table model never hardcodes piles;
//! it only enforces what the configuration says (capacity, default insertion
//! point) and carries the rest (owner, visibility) for the game's benefit.
//!
//! Configurations are `serde` types, so a game can load its table layout
//! from JSON:
//!
//! ```
//! use card_table::core::{PileConfig, PilePosition, PileVisibility};
//!
//! let json = r#"{
//!     "name": "Discard",
//!     "owner": null,
//!     "visibility": "Public",
//!     "max_cards": null,
//!     "default_position": "Top"
//! }"#;
//! let config: PileConfig = serde_json::from_str(json).unwrap();
//! assert_eq!(config.name, "Discard");
//! assert_eq!(config.visibility, PileVisibility::Public);
//! assert_eq!(config.default_position, PilePosition::Top);
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Position for inserting a card into a pile.
///
/// Index 0 is the bottom of the pile; the last index is the top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// Add to top of pile.
    #[default]
    Top,
    /// Add to bottom of pile.
    Bottom,
    /// Insert at specific index (clamped to the pile length).
    Index(usize),
}

impl PilePosition {
    /// Resolve to a concrete index for a pile currently holding `len` cards.
    #[must_use]
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Self::Top => len,
            Self::Bottom => 0,
            Self::Index(i) => i.min(len),
        }
    }
}

/// Pile visibility rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileVisibility {
    /// All cards visible to all players (discard pile).
    #[default]
    Public,
    /// Cards visible only to the pile owner (hand).
    OwnerOnly,
    /// Cards not visible to anyone (face-down draw pile).
    Hidden,
}

/// Configuration for a single pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileConfig {
    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Pile owner. `None` for shared piles.
    pub owner: Option<PlayerId>,

    /// Visibility rules for cards in this pile.
    pub visibility: PileVisibility,

    /// Maximum cards allowed. `None` for unlimited.
    pub max_cards: Option<usize>,

    /// Where `add` places a card when no position is given.
    pub default_position: PilePosition,
}

impl PileConfig {
    /// Create a new pile configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            visibility: PileVisibility::Public,
            max_cards: None,
            default_position: PilePosition::Top,
        }
    }

    /// Set the pile owner.
    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set visibility to owner-only (like a hand).
    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = PileVisibility::OwnerOnly;
        self
    }

    /// Set visibility to hidden (like a face-down draw pile).
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = PileVisibility::Hidden;
        self
    }

    /// Set maximum card count.
    #[must_use]
    pub fn with_max_cards(mut self, max: usize) -> Self {
        self.max_cards = Some(max);
        self
    }

    /// Set the default insertion point.
    #[must_use]
    pub fn with_default_position(mut self, position: PilePosition) -> Self {
        self.default_position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_config_builder() {
        let config = PileConfig::new("Hand")
            .with_owner(PlayerId::new(1))
            .owner_only()
            .with_max_cards(7)
            .with_default_position(PilePosition::Bottom);

        assert_eq!(config.name, "Hand");
        assert_eq!(config.owner, Some(PlayerId::new(1)));
        assert_eq!(config.visibility, PileVisibility::OwnerOnly);
        assert_eq!(config.max_cards, Some(7));
        assert_eq!(config.default_position, PilePosition::Bottom);
    }

    #[test]
    fn test_hidden_pile() {
        let config = PileConfig::new("Library").hidden();
        assert_eq!(config.visibility, PileVisibility::Hidden);
        assert_eq!(config.owner, None);
    }

    #[test]
    fn test_position_resolve() {
        assert_eq!(PilePosition::Top.resolve(3), 3);
        assert_eq!(PilePosition::Bottom.resolve(3), 0);
        assert_eq!(PilePosition::Index(1).resolve(3), 1);
        assert_eq!(PilePosition::Index(10).resolve(3), 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = PileConfig::new("Market").with_max_cards(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PileConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
