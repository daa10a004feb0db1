//! Card listener capability set.

use std::rc::Rc;

use crate::cards::Orientation;
use crate::core::{EntityId, PlayerId};
use crate::error::TableResult;
use crate::events::{CardChange, CardEvent};

use super::registry::Dispatch;

/// Observer of card changes.
///
/// One method per event kind, each a no-op by default so implementors only
/// override what they care about. Dispatch enters through [`card_event`],
/// which routes to the per-kind method.
///
/// [`card_event`]: CardListener::card_event
pub trait CardListener {
    /// Entry point for dispatch. Routes to the method matching the kind.
    fn card_event(&self, event: &CardEvent) {
        let card = event.source;
        match &event.change {
            CardChange::Flipped { face_down } => self.card_flipped(card, *face_down),
            CardChange::Rotated { from, to } => self.card_rotated(card, *from, *to),
            CardChange::ControllerChanged { from, to } => {
                self.card_controller_changed(card, *from, *to);
            }
            CardChange::StateChanged { key, old, new } => {
                self.card_state_changed(card, key, *old, *new);
            }
        }
    }

    /// The card was turned over.
    fn card_flipped(&self, _card: EntityId, _face_down: bool) {}

    /// The card's orientation changed.
    fn card_rotated(&self, _card: EntityId, _from: Orientation, _to: Orientation) {}

    /// The card changed controller.
    fn card_controller_changed(
        &self,
        _card: EntityId,
        _from: Option<PlayerId>,
        _to: Option<PlayerId>,
    ) {
    }

    /// An integer state value on the card changed.
    fn card_state_changed(&self, _card: EntityId, _key: &str, _old: i64, _new: i64) {}
}

impl<L: CardListener + ?Sized> CardListener for Rc<L> {
    fn card_event(&self, event: &CardEvent) {
        (**self).card_event(event);
    }

    fn card_flipped(&self, card: EntityId, face_down: bool) {
        (**self).card_flipped(card, face_down);
    }

    fn card_rotated(&self, card: EntityId, from: Orientation, to: Orientation) {
        (**self).card_rotated(card, from, to);
    }

    fn card_controller_changed(&self, card: EntityId, from: Option<PlayerId>, to: Option<PlayerId>) {
        (**self).card_controller_changed(card, from, to);
    }

    fn card_state_changed(&self, card: EntityId, key: &str, old: i64, new: i64) {
        (**self).card_state_changed(card, key, old, new);
    }
}

impl Dispatch for CardEvent {
    type Listener = dyn CardListener;

    fn source(&self) -> EntityId {
        self.source
    }

    fn validate(&self) -> TableResult<()> {
        CardEvent::validate(self)
    }

    fn deliver(&self, listener: &Self::Listener) {
        listener.card_event(self);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Log(RefCell<Vec<String>>);

    impl CardListener for Log {
        fn card_flipped(&self, card: EntityId, face_down: bool) {
            self.0.borrow_mut().push(format!("flip {} {}", card, face_down));
        }

        fn card_state_changed(&self, card: EntityId, key: &str, old: i64, new: i64) {
            self.0.borrow_mut().push(format!("state {} {} {}->{}", card, key, old, new));
        }
    }

    #[test]
    fn test_routes_to_matching_method() {
        let log = Log::default();

        log.card_event(&CardEvent::flipped(EntityId(3), true));
        log.card_event(&CardEvent::state_changed(EntityId(3), "damage", 1, 4));

        assert_eq!(
            *log.0.borrow(),
            vec!["flip Entity(3) true", "state Entity(3) damage 1->4"]
        );
    }

    #[test]
    fn test_unhandled_kinds_are_ignored() {
        let log = Log::default();

        log.card_event(&CardEvent::rotated(EntityId(3), Orientation::Upright, Orientation::Clockwise));
        log.card_event(&CardEvent::controller_changed(EntityId(3), None, Some(PlayerId::new(1))));

        assert!(log.0.borrow().is_empty());
    }

    #[test]
    fn test_rc_forwards() {
        let log = Rc::new(Log::default());
        let handle: Rc<Log> = log.clone();

        CardListener::card_event(&handle, &CardEvent::flipped(EntityId(1), false));

        assert_eq!(log.0.borrow().len(), 1);
    }

    #[test]
    fn test_rc_forwards_per_kind_methods() {
        let log = Rc::new(Log::default());
        let handle: Rc<dyn CardListener> = log.clone();

        handle.card_flipped(EntityId(2), true);
        handle.card_state_changed(EntityId(2), "damage", 0, 3);

        assert_eq!(
            *log.0.borrow(),
            vec!["flip Entity(2) true", "state Entity(2) damage 0->3"]
        );
    }
}
