//! Card events.
//!
//! A `Card` fires one `CardEvent` per state change, after the change has been
//! applied. The event is an immutable snapshot: the source card and a
//! description of what changed, with both the old and new values where the
//! change has a "before".

use serde::{Deserialize, Serialize};

use crate::cards::Orientation;
use crate::core::{EntityId, PlayerId};
use crate::error::{TableError, TableResult};

/// Discriminator for card event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEventKind {
    /// See [`CardChange::Flipped`].
    Flipped,
    /// See [`CardChange::Rotated`].
    Rotated,
    /// See [`CardChange::ControllerChanged`].
    ControllerChanged,
    /// See [`CardChange::StateChanged`].
    StateChanged,
}

impl std::fmt::Display for CardEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Flipped => "flipped",
            Self::Rotated => "rotated",
            Self::ControllerChanged => "controller-changed",
            Self::StateChanged => "state-changed",
        };
        f.write_str(name)
    }
}

/// What changed on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardChange {
    /// The card was turned over. `face_down` is the new face.
    Flipped { face_down: bool },

    /// The card's orientation changed.
    Rotated { from: Orientation, to: Orientation },

    /// The card changed controller.
    ControllerChanged {
        from: Option<PlayerId>,
        to: Option<PlayerId>,
    },

    /// An integer state value (damage, counters, tapped) changed.
    StateChanged { key: String, old: i64, new: i64 },
}

impl CardChange {
    /// The kind of this change.
    #[must_use]
    pub fn kind(&self) -> CardEventKind {
        match self {
            Self::Flipped { .. } => CardEventKind::Flipped,
            Self::Rotated { .. } => CardEventKind::Rotated,
            Self::ControllerChanged { .. } => CardEventKind::ControllerChanged,
            Self::StateChanged { .. } => CardEventKind::StateChanged,
        }
    }
}

/// A change notification from a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEvent {
    /// The card that changed.
    pub source: EntityId,

    /// What changed.
    pub change: CardChange,
}

impl CardEvent {
    /// Create an event from a source card and a change.
    #[must_use]
    pub fn new(source: EntityId, change: CardChange) -> Self {
        Self { source, change }
    }

    /// Create a flip event.
    #[must_use]
    pub fn flipped(source: EntityId, face_down: bool) -> Self {
        Self::new(source, CardChange::Flipped { face_down })
    }

    /// Create a rotation event.
    #[must_use]
    pub fn rotated(source: EntityId, from: Orientation, to: Orientation) -> Self {
        Self::new(source, CardChange::Rotated { from, to })
    }

    /// Create a controller change event.
    #[must_use]
    pub fn controller_changed(
        source: EntityId,
        from: Option<PlayerId>,
        to: Option<PlayerId>,
    ) -> Self {
        Self::new(source, CardChange::ControllerChanged { from, to })
    }

    /// Create a state change event.
    #[must_use]
    pub fn state_changed(source: EntityId, key: impl Into<String>, old: i64, new: i64) -> Self {
        Self::new(
            source,
            CardChange::StateChanged {
                key: key.into(),
                old,
                new,
            },
        )
    }

    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> CardEventKind {
        self.change.kind()
    }

    /// Check that the payload describes an actual change.
    pub fn validate(&self) -> TableResult<()> {
        let reason = match &self.change {
            CardChange::Flipped { .. } => None,
            CardChange::Rotated { from, to } if from == to => Some("rotation without change"),
            CardChange::Rotated { .. } => None,
            CardChange::ControllerChanged { from, to } if from == to => {
                Some("controller change without change")
            }
            CardChange::ControllerChanged { .. } => None,
            CardChange::StateChanged { key, .. } if key.is_empty() => Some("empty state key"),
            CardChange::StateChanged { old, new, .. } if old == new => {
                Some("state change without change")
            }
            CardChange::StateChanged { .. } => None,
        };

        match reason {
            Some(reason) => Err(TableError::invalid_event(self.source, reason)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_kind() {
        let event = CardEvent::flipped(EntityId(4), true);
        assert_eq!(event.source, EntityId(4));
        assert_eq!(event.kind(), CardEventKind::Flipped);

        let event = CardEvent::state_changed(EntityId(4), "damage", 0, 3);
        assert_eq!(event.kind(), CardEventKind::StateChanged);
        assert_eq!(
            event.change,
            CardChange::StateChanged {
                key: "damage".into(),
                old: 0,
                new: 3
            }
        );
    }

    #[test]
    fn test_validate_accepts_real_changes() {
        let events = [
            CardEvent::flipped(EntityId(1), false),
            CardEvent::rotated(EntityId(1), Orientation::Upright, Orientation::Clockwise),
            CardEvent::controller_changed(EntityId(1), None, Some(PlayerId::new(0))),
            CardEvent::state_changed(EntityId(1), "tapped", 0, 1),
        ];

        for event in &events {
            assert!(event.validate().is_ok(), "{:?}", event);
        }
    }

    #[test]
    fn test_validate_rejects_no_op_changes() {
        let events = [
            CardEvent::rotated(EntityId(1), Orientation::Inverted, Orientation::Inverted),
            CardEvent::controller_changed(EntityId(1), Some(PlayerId::new(1)), Some(PlayerId::new(1))),
            CardEvent::state_changed(EntityId(1), "damage", 2, 2),
            CardEvent::state_changed(EntityId(1), "", 0, 1),
        ];

        for event in &events {
            let err = event.validate().unwrap_err();
            assert!(err.is_invalid_event(), "{:?}", event);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CardEventKind::ControllerChanged.to_string(), "controller-changed");
    }

    #[test]
    fn test_event_serialization() {
        let event = CardEvent::rotated(EntityId(9), Orientation::Upright, Orientation::Inverted);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: CardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
