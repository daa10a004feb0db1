//! Observable card piles.
//!
//! A `CardPile` is an ordered container of card ids (index 0 = bottom, last
//! index = top) that notifies `ContainerListener`s after every change. It
//! supports:
//! - Insertion at top, bottom or a specific index
//! - Removal by card or by index, and popping from either end
//! - Reordering (single moves and seeded shuffles)
//! - Moving a card into another pile
//!
//! Before firing, the pile checks that the event agrees with its own
//! post-change state; a disagreement is reported as `InvalidEvent` and no
//! listener is called.

use std::rc::Rc;

use im::Vector;

use crate::core::{EntityId, PileConfig, PilePosition, TableRng};
use crate::error::{TableError, TableResult};
use crate::events::{ContainerChange, ContainerEvent};
use crate::listeners::{ContainerListener, ListenerRegistry};
use crate::logging::targets;

/// An ordered pile of cards.
///
/// ## Usage
///
/// ```
/// use card_table::core::{EntityId, PileConfig, PilePosition};
/// use card_table::piles::CardPile;
///
/// let mut library = CardPile::new(EntityId(0), PileConfig::new("Library").hidden());
///
/// library.add(EntityId(10), Some(PilePosition::Top)).unwrap();
/// library.add(EntityId(11), Some(PilePosition::Bottom)).unwrap();
///
/// assert_eq!(library.top(), Some(EntityId(10)));
/// assert_eq!(library.bottom(), Some(EntityId(11)));
/// ```
#[derive(Debug)]
pub struct CardPile {
    id: EntityId,
    config: PileConfig,
    cards: Vector<EntityId>,
    listeners: Rc<ListenerRegistry<dyn ContainerListener>>,
}

impl CardPile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: EntityId, config: PileConfig) -> Self {
        Self {
            id,
            config,
            cards: Vector::new(),
            listeners: Rc::new(ListenerRegistry::new(id)),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &PileConfig {
        &self.config
    }

    // === Queries ===

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: EntityId) -> bool {
        self.cards.contains(&card)
    }

    /// Position of `card`, counted from the bottom.
    #[must_use]
    pub fn index_of(&self, card: EntityId) -> Option<usize> {
        self.cards.index_of(&card)
    }

    /// The top card (last in order).
    #[must_use]
    pub fn top(&self) -> Option<EntityId> {
        self.cards.last().copied()
    }

    /// The bottom card (first in order).
    #[must_use]
    pub fn bottom(&self) -> Option<EntityId> {
        self.cards.front().copied()
    }

    /// Cards bottom to top. Cloning the result is O(1).
    #[must_use]
    pub fn cards(&self) -> &Vector<EntityId> {
        &self.cards
    }

    // === Listeners ===

    /// Register a listener. Fails if this instance is already registered.
    pub fn add_listener(&self, listener: Rc<dyn ContainerListener>) -> TableResult<()> {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Fails if it was never registered.
    pub fn remove_listener<T: ?Sized>(&self, listener: &Rc<T>) -> TableResult<()> {
        self.listeners.remove(listener).map(drop)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Shared handle to this pile's listener registry.
    #[must_use]
    pub fn listeners(&self) -> Rc<ListenerRegistry<dyn ContainerListener>> {
        Rc::clone(&self.listeners)
    }

    // === Mutators ===

    /// Add a card. `None` uses the pile's configured default position.
    ///
    /// Returns the index the card landed at.
    pub fn add(&mut self, card: EntityId, position: Option<PilePosition>) -> TableResult<usize> {
        self.check_can_accept(card)?;

        let index = position
            .unwrap_or(self.config.default_position)
            .resolve(self.cards.len());
        self.cards.insert(index, card);

        self.notify(ContainerChange::Added {
            component: card,
            index,
        })?;
        Ok(index)
    }

    /// Remove a specific card. Returns the index it was at.
    pub fn remove(&mut self, card: EntityId) -> TableResult<usize> {
        let index = self
            .index_of(card)
            .ok_or(TableError::CardNotFound { pile: self.id, card })?;
        self.remove_at(index)?;
        Ok(index)
    }

    /// Remove the card at `index`.
    pub fn remove_at(&mut self, index: usize) -> TableResult<EntityId> {
        self.check_index(index)?;

        let card = self.cards.remove(index);
        self.notify(ContainerChange::Removed {
            component: card,
            index,
        })?;
        Ok(card)
    }

    /// Remove and return the top card. `None` if the pile is empty.
    pub fn pop_top(&mut self) -> TableResult<Option<EntityId>> {
        match self.cards.len() {
            0 => Ok(None),
            len => self.remove_at(len - 1).map(Some),
        }
    }

    /// Remove and return the bottom card. `None` if the pile is empty.
    pub fn pop_bottom(&mut self) -> TableResult<Option<EntityId>> {
        if self.cards.is_empty() {
            return Ok(None);
        }
        self.remove_at(0).map(Some)
    }

    /// Move the card at `from` so that it ends up at `to`.
    pub fn move_within(&mut self, from: usize, to: usize) -> TableResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let card = self.cards.remove(from);
        self.cards.insert(to, card);
        self.notify_reordered()
    }

    /// Shuffle the pile. Returns whether the order changed.
    pub fn shuffle(&mut self, rng: &mut TableRng) -> TableResult<bool> {
        if self.cards.len() < 2 {
            return Ok(false);
        }

        let mut order: Vec<EntityId> = self.cards.iter().copied().collect();
        rng.shuffle(&mut order);
        let order = Vector::from(order);
        if order == self.cards {
            return Ok(false);
        }

        self.cards = order;
        self.notify_reordered()?;
        Ok(true)
    }

    /// Remove every card. Returns the removed cards, bottom first.
    pub fn clear(&mut self) -> TableResult<Vector<EntityId>> {
        if self.cards.is_empty() {
            return Ok(Vector::new());
        }

        let removed = std::mem::take(&mut self.cards);
        self.notify(ContainerChange::Cleared {
            removed: removed.clone(),
        })?;
        Ok(removed)
    }

    /// Move `card` from this pile into `destination`.
    ///
    /// The destination is checked before this pile is touched, so a
    /// rejected move leaves both piles unchanged. Fires `Removed` here, then
    /// `Added` on the destination. Returns the card's new index.
    pub fn move_card(
        &mut self,
        card: EntityId,
        destination: &mut CardPile,
        position: Option<PilePosition>,
    ) -> TableResult<usize> {
        let index = self
            .index_of(card)
            .ok_or(TableError::CardNotFound { pile: self.id, card })?;
        destination.check_can_accept(card)?;

        tracing::debug!(target: targets::PILE, card = %card, from = %self.id, to = %destination.id, "moving card");
        self.remove_at(index)?;
        destination.add(card, position)
    }

    /// Fire a game-defined notification at this pile's listeners.
    pub fn notify_custom(&self, tag: impl Into<String>, value: i64) -> TableResult<()> {
        self.notify(ContainerChange::Custom {
            tag: tag.into(),
            value,
        })
    }

    fn check_can_accept(&self, card: EntityId) -> TableResult<()> {
        if self.contains(card) {
            return Err(TableError::DuplicateCard { pile: self.id, card });
        }
        if let Some(capacity) = self.config.max_cards {
            if self.cards.len() >= capacity {
                return Err(TableError::PileFull {
                    pile: self.id,
                    capacity,
                });
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> TableResult<()> {
        if index >= self.cards.len() {
            return Err(TableError::IndexOutOfBounds {
                pile: self.id,
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }

    fn notify_reordered(&self) -> TableResult<()> {
        self.notify(ContainerChange::Reordered {
            order: self.cards.clone(),
        })
    }

    fn notify(&self, change: ContainerChange) -> TableResult<()> {
        let event = ContainerEvent::new(self.id, change);
        self.check_consistent(&event)?;
        tracing::trace!(target: targets::PILE, pile = %self.id, kind = %event.kind(), len = self.cards.len(), "pile changed");
        self.listeners.fire(&event).map(drop)
    }

    /// Check an event against the pile's current (post-change) state.
    fn check_consistent(&self, event: &ContainerEvent) -> TableResult<()> {
        let consistent = match &event.change {
            ContainerChange::Added { component, index } => self.cards.get(*index) == Some(component),
            ContainerChange::Removed { component, index } => {
                *index <= self.cards.len() && !self.contains(*component)
            }
            ContainerChange::Reordered { order } => *order == self.cards,
            ContainerChange::Cleared { .. } => self.cards.is_empty(),
            ContainerChange::Custom { .. } => true,
        };

        if consistent {
            Ok(())
        } else {
            tracing::warn!(target: targets::PILE, pile = %self.id, kind = %event.kind(), "event disagrees with pile state");
            Err(TableError::invalid_event(
                self.id,
                format!("{} event disagrees with pile state", event.kind()),
            ))
        }
    }
}
