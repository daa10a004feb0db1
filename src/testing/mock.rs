//! Recording listeners.
//!
//! Each mock records every call it receives, in order, as a plain value that
//! tests can compare with `assert_eq!`. Mocks built with a shared
//! [`CallJournal`] also append their label to it, which makes the relative
//! order of calls across several listeners observable.

use std::cell::RefCell;
use std::rc::Rc;

use im::Vector;

use crate::cards::Orientation;
use crate::core::{EntityId, PlayerId};
use crate::listeners::{CardListener, CardPileListener, ContainerListener, PileEvent};

/// Shared log of listener labels, in the order the listeners were called.
#[derive(Clone, Debug, Default)]
pub struct CallJournal(Rc<RefCell<Vec<String>>>);

impl CallJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: &str) {
        self.0.borrow_mut().push(label.to_owned());
    }

    /// All labels recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug)]
struct Recorder<C> {
    label: String,
    calls: RefCell<Vec<C>>,
    journal: Option<CallJournal>,
}

impl<C: Clone> Recorder<C> {
    fn named(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            calls: RefCell::new(Vec::new()),
            journal: None,
        }
    }

    fn record(&self, call: C) {
        self.calls.borrow_mut().push(call);
        if let Some(journal) = &self.journal {
            journal.record(&self.label);
        }
    }

    fn calls(&self) -> Vec<C> {
        self.calls.borrow().clone()
    }
}

macro_rules! mock_accessors {
    ($mock:ident, $call:ty) => {
        impl $mock {
            /// Create an unlabeled mock.
            #[must_use]
            pub fn new() -> Self {
                Self::named("")
            }

            /// Create a mock whose journal entries read `label`.
            #[must_use]
            pub fn named(label: impl Into<String>) -> Self {
                Self {
                    recorder: Recorder::named(label),
                }
            }

            /// Also record into `journal` (builder pattern).
            #[must_use]
            pub fn with_journal(mut self, journal: CallJournal) -> Self {
                self.recorder.journal = Some(journal);
                self
            }

            #[must_use]
            pub fn label(&self) -> &str {
                &self.recorder.label
            }

            /// Every call received so far, in order.
            #[must_use]
            pub fn calls(&self) -> Vec<$call> {
                self.recorder.calls()
            }

            #[must_use]
            pub fn call_count(&self) -> usize {
                self.recorder.calls.borrow().len()
            }

            /// Forget recorded calls.
            pub fn reset(&self) {
                self.recorder.calls.borrow_mut().clear();
            }
        }

        impl Default for $mock {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// A call received by a [`MockCardListener`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardCall {
    Flipped {
        card: EntityId,
        face_down: bool,
    },
    Rotated {
        card: EntityId,
        from: Orientation,
        to: Orientation,
    },
    ControllerChanged {
        card: EntityId,
        from: Option<PlayerId>,
        to: Option<PlayerId>,
    },
    StateChanged {
        card: EntityId,
        key: String,
        old: i64,
        new: i64,
    },
}

/// Card listener that records every call.
#[derive(Debug)]
pub struct MockCardListener {
    recorder: Recorder<CardCall>,
}

mock_accessors!(MockCardListener, CardCall);

impl CardListener for MockCardListener {
    fn card_flipped(&self, card: EntityId, face_down: bool) {
        self.recorder.record(CardCall::Flipped { card, face_down });
    }

    fn card_rotated(&self, card: EntityId, from: Orientation, to: Orientation) {
        self.recorder.record(CardCall::Rotated { card, from, to });
    }

    fn card_controller_changed(&self, card: EntityId, from: Option<PlayerId>, to: Option<PlayerId>) {
        self.recorder.record(CardCall::ControllerChanged { card, from, to });
    }

    fn card_state_changed(&self, card: EntityId, key: &str, old: i64, new: i64) {
        self.recorder.record(CardCall::StateChanged {
            card,
            key: key.to_owned(),
            old,
            new,
        });
    }
}

/// A call received by a [`MockContainerListener`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerCall {
    Added {
        container: EntityId,
        component: EntityId,
        index: usize,
    },
    Removed {
        container: EntityId,
        component: EntityId,
        index: usize,
    },
    Reordered {
        container: EntityId,
        order: Vector<EntityId>,
    },
    Cleared {
        container: EntityId,
        removed: Vector<EntityId>,
    },
    Custom {
        container: EntityId,
        tag: String,
        value: i64,
    },
}

/// Container listener that records every call.
#[derive(Debug)]
pub struct MockContainerListener {
    recorder: Recorder<ContainerCall>,
}

mock_accessors!(MockContainerListener, ContainerCall);

impl ContainerListener for MockContainerListener {
    fn component_added(&self, container: EntityId, component: EntityId, index: usize) {
        self.recorder.record(ContainerCall::Added {
            container,
            component,
            index,
        });
    }

    fn component_removed(&self, container: EntityId, component: EntityId, index: usize) {
        self.recorder.record(ContainerCall::Removed {
            container,
            component,
            index,
        });
    }

    fn components_reordered(&self, container: EntityId, order: &Vector<EntityId>) {
        self.recorder.record(ContainerCall::Reordered {
            container,
            order: order.clone(),
        });
    }

    fn container_cleared(&self, container: EntityId, removed: &Vector<EntityId>) {
        self.recorder.record(ContainerCall::Cleared {
            container,
            removed: removed.clone(),
        });
    }

    fn container_custom(&self, container: EntityId, tag: &str, value: i64) {
        self.recorder.record(ContainerCall::Custom {
            container,
            tag: tag.to_owned(),
            value,
        });
    }
}

/// Card pile listener that records every call as a [`PileEvent`].
#[derive(Debug)]
pub struct MockPileListener {
    recorder: Recorder<PileEvent>,
}

mock_accessors!(MockPileListener, PileEvent);

impl CardPileListener for MockPileListener {
    fn card_added(&self, pile: EntityId, card: EntityId, index: usize) {
        self.recorder.record(PileEvent::CardAdded { pile, card, index });
    }

    fn card_removed(&self, pile: EntityId, card: EntityId, index: usize) {
        self.recorder.record(PileEvent::CardRemoved { pile, card, index });
    }

    fn pile_reordered(&self, pile: EntityId, order: &Vector<EntityId>) {
        self.recorder.record(PileEvent::Reordered {
            pile,
            order: order.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CardEvent;

    #[test]
    fn test_journal_orders_across_mocks() {
        let journal = CallJournal::new();
        let first = MockCardListener::named("first").with_journal(journal.clone());
        let second = MockCardListener::named("second").with_journal(journal.clone());

        second.card_event(&CardEvent::flipped(EntityId(1), true));
        first.card_event(&CardEvent::flipped(EntityId(1), false));

        assert_eq!(journal.entries(), vec!["second", "first"]);
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.label(), "second");
    }

    #[test]
    fn test_reset() {
        let mock = MockPileListener::new();
        mock.card_added(EntityId(1), EntityId(10), 0);
        assert_eq!(mock.call_count(), 1);

        mock.reset();
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_container_mock_records_payload() {
        let mock = MockContainerListener::new();
        mock.container_custom(EntityId(1), "glow", 2);

        assert_eq!(
            mock.calls(),
            vec![ContainerCall::Custom {
                container: EntityId(1),
                tag: "glow".into(),
                value: 2
            }]
        );
    }
}
