//! Container events.
//!
//! Containers (card piles, and anything else that holds an ordered list of
//! components) fire `ContainerEvent`s. These are the generic events that
//! `ContainerListener` understands; pile-specific listeners receive them
//! through the translation in `listeners::pile`.
//!
//! Indices always refer to the container state *after* the change for
//! additions, and to the position the component occupied *before* the change
//! for removals.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::error::{TableError, TableResult};

/// Discriminator for container event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerEventKind {
    /// See [`ContainerChange::Added`].
    Added,
    /// See [`ContainerChange::Removed`].
    Removed,
    /// See [`ContainerChange::Reordered`].
    Reordered,
    /// See [`ContainerChange::Cleared`].
    Cleared,
    /// See [`ContainerChange::Custom`].
    Custom,
}

impl std::fmt::Display for ContainerEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Reordered => "reordered",
            Self::Cleared => "cleared",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// What changed in a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerChange {
    /// A component was inserted at `index`.
    Added { component: EntityId, index: usize },

    /// The component at `index` was taken out.
    Removed { component: EntityId, index: usize },

    /// The components were permuted. `order` is the full new order.
    Reordered { order: Vector<EntityId> },

    /// Every component was removed at once. `removed` is the old order.
    Cleared { removed: Vector<EntityId> },

    /// A game-defined notification. Listeners that do not know the tag
    /// ignore it.
    Custom { tag: String, value: i64 },
}

impl ContainerChange {
    /// The kind of this change.
    #[must_use]
    pub fn kind(&self) -> ContainerEventKind {
        match self {
            Self::Added { .. } => ContainerEventKind::Added,
            Self::Removed { .. } => ContainerEventKind::Removed,
            Self::Reordered { .. } => ContainerEventKind::Reordered,
            Self::Cleared { .. } => ContainerEventKind::Cleared,
            Self::Custom { .. } => ContainerEventKind::Custom,
        }
    }
}

/// A change notification from a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEvent {
    /// The container that changed.
    pub source: EntityId,

    /// What changed.
    pub change: ContainerChange,
}

impl ContainerEvent {
    /// Create an event from a source container and a change.
    #[must_use]
    pub fn new(source: EntityId, change: ContainerChange) -> Self {
        Self { source, change }
    }

    /// Create a component-added event.
    #[must_use]
    pub fn added(source: EntityId, component: EntityId, index: usize) -> Self {
        Self::new(source, ContainerChange::Added { component, index })
    }

    /// Create a component-removed event.
    #[must_use]
    pub fn removed(source: EntityId, component: EntityId, index: usize) -> Self {
        Self::new(source, ContainerChange::Removed { component, index })
    }

    /// Create a reorder event carrying the new order.
    #[must_use]
    pub fn reordered(source: EntityId, order: Vector<EntityId>) -> Self {
        Self::new(source, ContainerChange::Reordered { order })
    }

    /// Create a cleared event carrying the removed components in their old order.
    #[must_use]
    pub fn cleared(source: EntityId, removed: Vector<EntityId>) -> Self {
        Self::new(source, ContainerChange::Cleared { removed })
    }

    /// Create a game-defined event.
    #[must_use]
    pub fn custom(source: EntityId, tag: impl Into<String>, value: i64) -> Self {
        Self::new(
            source,
            ContainerChange::Custom {
                tag: tag.into(),
                value,
            },
        )
    }

    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> ContainerEventKind {
        self.change.kind()
    }

    /// Check that the payload is internally consistent.
    ///
    /// This cannot see the container, so it only catches malformed payloads.
    /// Containers check the event against their own state before firing.
    pub fn validate(&self) -> TableResult<()> {
        let reason = match &self.change {
            ContainerChange::Added { component, .. } | ContainerChange::Removed { component, .. }
                if *component == self.source =>
            {
                Some("container cannot contain itself")
            }
            ContainerChange::Reordered { order } if has_duplicates(order) => {
                Some("reorder lists a component twice")
            }
            ContainerChange::Cleared { removed } if has_duplicates(removed) => {
                Some("clear lists a component twice")
            }
            ContainerChange::Custom { tag, .. } if tag.is_empty() => Some("empty custom tag"),
            _ => None,
        };

        match reason {
            Some(reason) => Err(TableError::invalid_event(self.source, reason)),
            None => Ok(()),
        }
    }
}

fn has_duplicates(ids: &Vector<EntityId>) -> bool {
    let mut seen = FxHashSet::default();
    !ids.iter().all(|id| seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_kind() {
        let event = ContainerEvent::added(EntityId(1), EntityId(10), 0);
        assert_eq!(event.kind(), ContainerEventKind::Added);
        assert_eq!(
            event.change,
            ContainerChange::Added {
                component: EntityId(10),
                index: 0
            }
        );

        let event = ContainerEvent::custom(EntityId(1), "highlight", 2);
        assert_eq!(event.kind(), ContainerEventKind::Custom);
        assert_eq!(event.kind().to_string(), "custom");
    }

    #[test]
    fn test_validate_rejects_duplicate_order() {
        let order: Vector<EntityId> = vec![EntityId(10), EntityId(11), EntityId(10)].into();
        let err = ContainerEvent::reordered(EntityId(1), order).validate().unwrap_err();
        assert_eq!(
            err,
            TableError::invalid_event(EntityId(1), "reorder lists a component twice")
        );
    }

    #[test]
    fn test_validate_rejects_self_containment() {
        let err = ContainerEvent::added(EntityId(1), EntityId(1), 0)
            .validate()
            .unwrap_err();
        assert!(err.is_invalid_event());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let order: Vector<EntityId> = vec![EntityId(11), EntityId(10)].into();
        let events = [
            ContainerEvent::added(EntityId(1), EntityId(10), 0),
            ContainerEvent::removed(EntityId(1), EntityId(10), 3),
            ContainerEvent::reordered(EntityId(1), order.clone()),
            ContainerEvent::cleared(EntityId(1), order),
            ContainerEvent::custom(EntityId(1), "glow", 0),
        ];

        for event in &events {
            assert!(event.validate().is_ok(), "{:?}", event);
        }
    }

    #[test]
    fn test_event_serialization() {
        let order: Vector<EntityId> = vec![EntityId(3), EntityId(2)].into();
        let event = ContainerEvent::reordered(EntityId(1), order);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: ContainerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
