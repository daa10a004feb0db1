//! Observable cards.
//!
//! A `Card` is the runtime state of one card on the table: face, orientation,
//! owner/controller and a bag of integer state values (damage, counters,
//! tapped). Every mutator applies the change first and then notifies the
//! card's listeners with one `CardEvent`. Setting a value to what it already
//! is fires nothing.
//!
//! ## State Values (i64 only)
//!
//! The `state` map uses `FxHashMap<String, i64>`. To store non-integer values:
//! - Booleans: use 0/1 (see `set_flag`)
//! - Entity references: use `EntityId.0` as i64
//! - Enums: use discriminant values
//!
//! A missing key reads as 0, so setting a missing key to 0 is not a change.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::error::{TableError, TableResult};
use crate::events::{CardChange, CardEvent};
use crate::listeners::{CardListener, ListenerRegistry};
use crate::logging::targets;

/// Card definition identifier. Games define what cards exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which way a card is turned, in quarter turns clockwise from upright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The card's normal reading position.
    #[default]
    Upright,
    /// Turned a quarter clockwise (tapped, in many games).
    Clockwise,
    /// Turned upside down.
    Inverted,
    /// Turned a quarter counter-clockwise.
    CounterClockwise,
}

impl Orientation {
    /// The orientation one quarter turn clockwise from this one.
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Self::Upright => Self::Clockwise,
            Self::Clockwise => Self::Inverted,
            Self::Inverted => Self::CounterClockwise,
            Self::CounterClockwise => Self::Upright,
        }
    }

    /// Rotation from upright in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Upright => 0,
            Self::Clockwise => 90,
            Self::Inverted => 180,
            Self::CounterClockwise => 270,
        }
    }
}

/// A card on the table.
///
/// The listener registry is reference counted so that listeners can hold a
/// handle to it (see [`Card::listeners`]) and unregister from inside a
/// callback.
#[derive(Debug)]
pub struct Card {
    entity_id: EntityId,
    card_id: CardId,
    owner: Option<PlayerId>,
    controller: Option<PlayerId>,
    face_down: bool,
    orientation: Orientation,
    state: FxHashMap<String, i64>,
    listeners: Rc<ListenerRegistry<dyn CardListener>>,
}

impl Card {
    /// Create a face-up, upright card owned and controlled by `owner`.
    #[must_use]
    pub fn new(entity_id: EntityId, card_id: CardId, owner: PlayerId) -> Self {
        let mut card = Self::neutral(entity_id, card_id);
        card.owner = Some(owner);
        card.controller = Some(owner);
        card
    }

    /// Create a card with no owner or controller.
    ///
    /// Use for shared market cards, obstacles, or game-controlled entities.
    #[must_use]
    pub fn neutral(entity_id: EntityId, card_id: CardId) -> Self {
        Self {
            entity_id,
            card_id,
            owner: None,
            controller: None,
            face_down: false,
            orientation: Orientation::Upright,
            state: FxHashMap::default(),
            listeners: Rc::new(ListenerRegistry::new(entity_id)),
        }
    }

    /// Start the card face down (builder pattern). Fires nothing.
    #[must_use]
    pub fn face_down(mut self) -> Self {
        self.face_down = true;
        self
    }

    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    #[must_use]
    pub fn controller(&self) -> Option<PlayerId> {
        self.controller
    }

    /// Check if this is a neutral (ownerless) card.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face_down
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Get a state value with a default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    /// Check if a state flag is set (non-zero).
    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.get_state(key, 0) != 0
    }

    // === Listeners ===

    /// Register a listener. Fails if this instance is already registered.
    pub fn add_listener(&self, listener: Rc<dyn CardListener>) -> TableResult<()> {
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

    /// Shared handle to this card's listener registry.
    #[must_use]
    pub fn listeners(&self) -> Rc<ListenerRegistry<dyn CardListener>> {
        Rc::clone(&self.listeners)
    }

    // === Mutators ===

    /// Turn the card over.
    pub fn flip(&mut self) -> TableResult<()> {
        self.set_face_down(!self.face_down).map(drop)
    }

    /// Set which face is up. Returns whether anything changed.
    pub fn set_face_down(&mut self, face_down: bool) -> TableResult<bool> {
        if self.face_down == face_down {
            return Ok(false);
        }

        self.face_down = face_down;
        self.notify(CardChange::Flipped { face_down })
    }

    /// Turn the card to `to`. Returns whether anything changed.
    pub fn rotate_to(&mut self, to: Orientation) -> TableResult<bool> {
        let from = self.orientation;
        if from == to {
            return Ok(false);
        }

        self.orientation = to;
        self.notify(CardChange::Rotated { from, to })
    }

    /// Turn the card a quarter clockwise.
    pub fn rotate_clockwise(&mut self) -> TableResult<()> {
        self.rotate_to(self.orientation.rotated_clockwise()).map(drop)
    }

    /// Hand the card to another controller. Returns whether anything changed.
    pub fn set_controller(&mut self, controller: Option<PlayerId>) -> TableResult<bool> {
        let from = self.controller;
        if from == controller {
            return Ok(false);
        }

        self.controller = controller;
        self.notify(CardChange::ControllerChanged {
            from,
            to: controller,
        })
    }

    /// Set a state value. Returns whether anything changed.
    pub fn set_state(&mut self, key: impl Into<String>, value: i64) -> TableResult<bool> {
        let key = key.into();
        let old = self.get_state(&key, 0);
        if old == value {
            return Ok(false);
        }

        self.state.insert(key.clone(), value);
        self.notify(CardChange::StateChanged {
            key,
            old,
            new: value,
        })
    }

    /// Modify a state value by delta. Returns whether anything changed.
    ///
    /// Fails with `StateOverflow`, leaving the value untouched, if the result
    /// does not fit in an `i64`.
    pub fn modify_state(&mut self, key: &str, delta: i64) -> TableResult<bool> {
        let value = self
            .get_state(key, 0)
            .checked_add(delta)
            .ok_or_else(|| TableError::StateOverflow {
                card: self.entity_id,
                key: key.to_owned(),
            })?;
        self.set_state(key, value)
    }

    /// Set a boolean flag (1 for true, 0 for false).
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) -> TableResult<bool> {
        self.set_state(key, i64::from(value))
    }

    /// Reset every non-zero state value to 0, one event per key in key order.
    ///
    /// Returns the number of keys cleared.
    pub fn clear_state(&mut self) -> TableResult<usize> {
        let mut keys: Vec<String> = self
            .state
            .iter()
            .filter(|(_, &v)| v != 0)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort_unstable();

        for key in &keys {
            self.set_state(key.as_str(), 0)?;
        }
        self.state.clear();

        Ok(keys.len())
    }

    fn notify(&self, change: CardChange) -> TableResult<bool> {
        let event = CardEvent::new(self.entity_id, change);
        tracing::trace!(target: targets::CARD, card = %self.entity_id, kind = %event.kind(), "card changed");
        self.listeners.fire(&event)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> Card {
        Card::new(EntityId(10), CardId::new(1), PlayerId::new(0))
    }

    #[test]
    fn test_card_new() {
        let card = test_card();

        assert_eq!(card.entity_id(), EntityId(10));
        assert_eq!(card.card_id(), CardId::new(1));
        assert_eq!(card.owner(), Some(PlayerId::new(0)));
        assert_eq!(card.controller(), Some(PlayerId::new(0)));
        assert!(!card.is_neutral());
        assert!(!card.is_face_down());
        assert_eq!(card.orientation(), Orientation::Upright);
    }

    #[test]
    fn test_card_neutral() {
        let card = Card::neutral(EntityId(10), CardId::new(1)).face_down();

        assert!(card.is_neutral());
        assert!(card.controller().is_none());
        assert!(card.is_face_down());
    }

    #[test]
    fn test_orientation_cycle() {
        let mut o = Orientation::Upright;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(o.degrees());
            o = o.rotated_clockwise();
        }

        assert_eq!(o, Orientation::Upright);
        assert_eq!(seen, vec![0, 90, 180, 270]);
    }

    #[test]
    fn test_state_without_listeners() {
        let mut card = test_card();

        assert_eq!(card.set_state("damage", 3), Ok(true));
        assert_eq!(card.modify_state("damage", 2), Ok(true));
        assert_eq!(card.get_state("damage", 0), 5);

        assert_eq!(card.modify_state("damage", 0), Ok(false));
        assert_eq!(card.set_state("counters", 0), Ok(false));
    }

    #[test]
    fn test_modify_state_overflow() {
        let mut card = test_card();
        card.set_state("counters", i64::MAX).unwrap();

        assert_eq!(
            card.modify_state("counters", 1),
            Err(TableError::StateOverflow { card: EntityId(10), key: "counters".into() })
        );
        assert_eq!(card.get_state("counters", 0), i64::MAX);

        card.set_state("counters", i64::MIN).unwrap();
        assert!(card.modify_state("counters", -1).is_err());
        assert_eq!(card.modify_state("counters", 1), Ok(true));
    }

    #[test]
    fn test_flags() {
        let mut card = test_card();

        assert!(!card.has_flag("tapped"));
        card.set_flag("tapped", true).unwrap();
        assert!(card.has_flag("tapped"));
        card.set_flag("tapped", false).unwrap();
        assert!(!card.has_flag("tapped"));
    }

    #[test]
    fn test_clear_state_counts_non_zero_keys() {
        let mut card = test_card();
        card.set_state("damage", 3).unwrap();
        card.set_state("counters", 2).unwrap();
        card.set_flag("tapped", false).unwrap();

        assert_eq!(card.clear_state(), Ok(2));
        assert_eq!(card.get_state("damage", 0), 0);
        assert_eq!(card.get_state("counters", 0), 0);
    }

    #[test]
    fn test_controller_change_keeps_owner() {
        let mut card = test_card();

        assert_eq!(card.set_controller(Some(PlayerId::new(1))), Ok(true));
        assert_eq!(card.controller(), Some(PlayerId::new(1)));
        assert_eq!(card.owner(), Some(PlayerId::new(0)));
        assert_eq!(card.set_controller(Some(PlayerId::new(1))), Ok(false));
    }

    #[test]
    fn test_rotate() {
        let mut card = test_card();

        card.rotate_clockwise().unwrap();
        assert_eq!(card.orientation(), Orientation::Clockwise);
        assert_eq!(card.rotate_to(Orientation::Clockwise), Ok(false));
    }

    #[test]
    fn test_listener_handle_is_shared() {
        let card = test_card();
        let handle = card.listeners();

        assert_eq!(handle.owner(), EntityId(10));
        assert_eq!(card.listener_count(), 0);
    }
}
