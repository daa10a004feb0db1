//! Card pile listeners and the container-to-pile adapter.
//!
//! `CardPileListener` speaks the vocabulary of a pile of cards. Piles fire
//! generic [`ContainerEvent`]s, so a pile listener is attached through
//! [`PileListenerAdapter`], which implements [`ContainerListener`] by
//! running every event through [`translate`].
//!
//! ## Translation table
//!
//! | container change          | pile calls                                     |
//! |---------------------------|------------------------------------------------|
//! | `Added { component, i }`  | `card_added(pile, component, i)`               |
//! | `Removed { component, i }`| `card_removed(pile, component, i)`             |
//! | `Reordered { order }`     | `pile_reordered(pile, order)`                  |
//! | `Cleared { removed }`     | `card_removed` per card, top card first        |
//! | `Custom { .. }`           | nothing                                        |
//!
//! A cleared pile is reported as a sequence of removals from the top, so the
//! index in each call is valid for the pile as the listener has seen it so
//! far.

use std::rc::Rc;

use im::Vector;
use smallvec::{smallvec, SmallVec};

use crate::core::EntityId;
use crate::events::{ContainerChange, ContainerEvent};

use super::container::ContainerListener;

/// Observer of a card pile.
pub trait CardPileListener {
    /// `card` was placed at `index` (0 = bottom).
    fn card_added(&self, _pile: EntityId, _card: EntityId, _index: usize) {}

    /// `card` was taken from `index`.
    fn card_removed(&self, _pile: EntityId, _card: EntityId, _index: usize) {}

    /// The pile now holds its cards in `order`, bottom first.
    fn pile_reordered(&self, _pile: EntityId, _order: &Vector<EntityId>) {}
}

impl<L: CardPileListener + ?Sized> CardPileListener for Rc<L> {
    fn card_added(&self, pile: EntityId, card: EntityId, index: usize) {
        (**self).card_added(pile, card, index);
    }

    fn card_removed(&self, pile: EntityId, card: EntityId, index: usize) {
        (**self).card_removed(pile, card, index);
    }

    fn pile_reordered(&self, pile: EntityId, order: &Vector<EntityId>) {
        (**self).pile_reordered(pile, order);
    }
}

/// A single pile-domain call, as produced by [`translate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PileEvent {
    /// `card_added(pile, card, index)`.
    CardAdded {
        pile: EntityId,
        card: EntityId,
        index: usize,
    },
    /// `card_removed(pile, card, index)`.
    CardRemoved {
        pile: EntityId,
        card: EntityId,
        index: usize,
    },
    /// `pile_reordered(pile, order)`.
    Reordered {
        pile: EntityId,
        order: Vector<EntityId>,
    },
}

impl PileEvent {
    /// Call the matching method on `listener`.
    pub fn deliver<L: CardPileListener + ?Sized>(&self, listener: &L) {
        match self {
            Self::CardAdded { pile, card, index } => listener.card_added(*pile, *card, *index),
            Self::CardRemoved { pile, card, index } => listener.card_removed(*pile, *card, *index),
            Self::Reordered { pile, order } => listener.pile_reordered(*pile, order),
        }
    }
}

/// Map a generic container event to the pile calls it stands for.
///
/// Returns an empty list for kinds with no pile meaning.
#[must_use]
pub fn translate(event: &ContainerEvent) -> SmallVec<[PileEvent; 1]> {
    let pile = event.source;
    match &event.change {
        ContainerChange::Added { component, index } => smallvec![PileEvent::CardAdded {
            pile,
            card: *component,
            index: *index,
        }],
        ContainerChange::Removed { component, index } => smallvec![PileEvent::CardRemoved {
            pile,
            card: *component,
            index: *index,
        }],
        ContainerChange::Reordered { order } => smallvec![PileEvent::Reordered {
            pile,
            order: order.clone(),
        }],
        ContainerChange::Cleared { removed } => removed
            .iter()
            .enumerate()
            .rev()
            .map(|(index, card)| PileEvent::CardRemoved {
                pile,
                card: *card,
                index,
            })
            .collect(),
        ContainerChange::Custom { .. } => SmallVec::new(),
    }
}

/// Presents a [`CardPileListener`] as a [`ContainerListener`].
///
/// ```
/// use std::rc::Rc;
/// use card_table::core::{EntityId, PileConfig};
/// use card_table::listeners::PileListenerAdapter;
/// use card_table::piles::CardPile;
/// use card_table::testing::MockPileListener;
///
/// let mut pile = CardPile::new(EntityId(1), PileConfig::new("Discard"));
/// let probe = Rc::new(MockPileListener::new());
/// pile.add_listener(Rc::new(PileListenerAdapter::new(probe.clone()))).unwrap();
///
/// pile.add(EntityId(10), None).unwrap();
/// assert_eq!(probe.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PileListenerAdapter<L> {
    inner: L,
}

impl<L: CardPileListener> PileListenerAdapter<L> {
    /// Wrap a pile listener.
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    /// The wrapped listener.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: CardPileListener> ContainerListener for PileListenerAdapter<L> {
    fn container_event(&self, event: &ContainerEvent) {
        for call in translate(event) {
            call.deliver(&self.inner);
        }
    }

    fn component_added(&self, container: EntityId, component: EntityId, index: usize) {
        self.container_event(&ContainerEvent::added(container, component, index));
    }

    fn component_removed(&self, container: EntityId, component: EntityId, index: usize) {
        self.container_event(&ContainerEvent::removed(container, component, index));
    }

    fn components_reordered(&self, container: EntityId, order: &Vector<EntityId>) {
        self.container_event(&ContainerEvent::reordered(container, order.clone()));
    }

    fn container_cleared(&self, container: EntityId, removed: &Vector<EntityId>) {
        self.container_event(&ContainerEvent::cleared(container, removed.clone()));
    }

    fn container_custom(&self, container: EntityId, tag: &str, value: i64) {
        self.container_event(&ContainerEvent::custom(container, tag, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vector<EntityId> {
        raw.iter().copied().map(EntityId).collect()
    }

    #[test]
    fn test_translate_added() {
        let calls = translate(&ContainerEvent::added(EntityId(1), EntityId(10), 2));
        assert_eq!(
            calls.as_slice(),
            &[PileEvent::CardAdded {
                pile: EntityId(1),
                card: EntityId(10),
                index: 2
            }]
        );
    }

    #[test]
    fn test_translate_cleared_removes_from_top() {
        let calls = translate(&ContainerEvent::cleared(EntityId(1), ids(&[10, 11, 12])));
        assert_eq!(
            calls.as_slice(),
            &[
                PileEvent::CardRemoved { pile: EntityId(1), card: EntityId(12), index: 2 },
                PileEvent::CardRemoved { pile: EntityId(1), card: EntityId(11), index: 1 },
                PileEvent::CardRemoved { pile: EntityId(1), card: EntityId(10), index: 0 },
            ]
        );
    }

    #[test]
    fn test_translate_custom_is_empty() {
        assert!(translate(&ContainerEvent::custom(EntityId(1), "glow", 3)).is_empty());
    }

    #[test]
    fn test_translate_reorder_keeps_order() {
        let order = ids(&[12, 10, 11]);
        let calls = translate(&ContainerEvent::reordered(EntityId(4), order.clone()));
        assert_eq!(
            calls.as_slice(),
            &[PileEvent::Reordered { pile: EntityId(4), order }]
        );
    }
}
