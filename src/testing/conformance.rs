//! Table-driven listener conformance checks.
//!
//! A conformance check takes a factory that builds a fresh listener under
//! test together with a probe that observes what the listener did. For each
//! case in the table it registers the listener with a new registry, fires
//! one well-formed event through normal dispatch, and compares the probe's
//! record with the expected calls.
//!
//! ```
//! use std::rc::Rc;
//! use card_table::listeners::{ContainerListener, PileListenerAdapter};
//! use card_table::testing::{check_container_adapter, MockPileListener};
//!
//! let checked = check_container_adapter(|| {
//!     let probe = Rc::new(MockPileListener::new());
//!     let adapter: Rc<dyn ContainerListener> = Rc::new(PileListenerAdapter::new(probe.clone()));
//!     (adapter, probe)
//! })
//! .unwrap();
//! assert!(checked > 0);
//! ```

use std::fmt::Debug;
use std::rc::Rc;

use im::Vector;

use crate::cards::Orientation;
use crate::core::{EntityId, PlayerId};
use crate::events::{CardEvent, ContainerEvent};
use crate::listeners::{CardListener, ContainerListener, Dispatch, ListenerRegistry, PileEvent};

use super::mock::{CardCall, MockCardListener, MockPileListener};

/// Subject id used by the built-in case tables.
pub const CONFORMANCE_SUBJECT: EntityId = EntityId(1);

/// One row of a conformance table.
#[derive(Clone, Debug)]
pub struct ConformanceCase<E, C> {
    pub name: &'static str,
    pub event: E,
    pub expected: Vec<C>,
}

/// A listener that did not behave as its case expected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("case `{case}`: expected {expected}, observed {observed}")]
pub struct ConformanceFailure {
    pub case: &'static str,
    pub expected: String,
    pub observed: String,
}

/// Cases every card-pile adapter must satisfy: one per container kind.
#[must_use]
pub fn container_adapter_cases() -> Vec<ConformanceCase<ContainerEvent, PileEvent>> {
    let pile = CONFORMANCE_SUBJECT;
    let order: Vector<EntityId> = [EntityId(12), EntityId(10), EntityId(11)].into_iter().collect();
    let removed: Vector<EntityId> = [EntityId(10), EntityId(11)].into_iter().collect();

    vec![
        ConformanceCase {
            name: "added at bottom",
            event: ContainerEvent::added(pile, EntityId(10), 0),
            expected: vec![PileEvent::CardAdded { pile, card: EntityId(10), index: 0 }],
        },
        ConformanceCase {
            name: "added on top",
            event: ContainerEvent::added(pile, EntityId(11), 3),
            expected: vec![PileEvent::CardAdded { pile, card: EntityId(11), index: 3 }],
        },
        ConformanceCase {
            name: "removed",
            event: ContainerEvent::removed(pile, EntityId(10), 2),
            expected: vec![PileEvent::CardRemoved { pile, card: EntityId(10), index: 2 }],
        },
        ConformanceCase {
            name: "reordered",
            event: ContainerEvent::reordered(pile, order.clone()),
            expected: vec![PileEvent::Reordered { pile, order }],
        },
        ConformanceCase {
            name: "cleared",
            event: ContainerEvent::cleared(pile, removed),
            expected: vec![
                PileEvent::CardRemoved { pile, card: EntityId(11), index: 1 },
                PileEvent::CardRemoved { pile, card: EntityId(10), index: 0 },
            ],
        },
        ConformanceCase {
            name: "cleared while empty",
            event: ContainerEvent::cleared(pile, Vector::new()),
            expected: vec![],
        },
        ConformanceCase {
            name: "custom kind ignored",
            event: ContainerEvent::custom(pile, "highlight", 1),
            expected: vec![],
        },
    ]
}

/// Cases every recording card listener must satisfy: one per card kind.
#[must_use]
pub fn card_listener_cases() -> Vec<ConformanceCase<CardEvent, CardCall>> {
    let card = CONFORMANCE_SUBJECT;

    vec![
        ConformanceCase {
            name: "flipped face down",
            event: CardEvent::flipped(card, true),
            expected: vec![CardCall::Flipped { card, face_down: true }],
        },
        ConformanceCase {
            name: "flipped face up",
            event: CardEvent::flipped(card, false),
            expected: vec![CardCall::Flipped { card, face_down: false }],
        },
        ConformanceCase {
            name: "rotated",
            event: CardEvent::rotated(card, Orientation::Upright, Orientation::Clockwise),
            expected: vec![CardCall::Rotated {
                card,
                from: Orientation::Upright,
                to: Orientation::Clockwise,
            }],
        },
        ConformanceCase {
            name: "controller released",
            event: CardEvent::controller_changed(card, Some(PlayerId::new(0)), None),
            expected: vec![CardCall::ControllerChanged {
                card,
                from: Some(PlayerId::new(0)),
                to: None,
            }],
        },
        ConformanceCase {
            name: "state changed",
            event: CardEvent::state_changed(card, "damage", 2, -1),
            expected: vec![CardCall::StateChanged {
                card,
                key: "damage".into(),
                old: 2,
                new: -1,
            }],
        },
    ]
}

/// Check a container listener that reports in card-pile terms.
///
/// Returns the number of cases checked.
pub fn check_container_adapter<F>(factory: F) -> Result<usize, ConformanceFailure>
where
    F: Fn() -> (Rc<dyn ContainerListener>, Rc<MockPileListener>),
{
    run_cases(container_adapter_cases(), factory, |probe: &MockPileListener| {
        probe.calls()
    })
}

/// Check a card listener against a recording probe.
///
/// Returns the number of cases checked.
pub fn check_card_listener<F>(factory: F) -> Result<usize, ConformanceFailure>
where
    F: Fn() -> (Rc<dyn CardListener>, Rc<MockCardListener>),
{
    run_cases(card_listener_cases(), factory, |probe: &MockCardListener| {
        probe.calls()
    })
}

/// Run an arbitrary case table.
pub fn run_cases<E, C, L, P, F, O>(
    cases: Vec<ConformanceCase<E, C>>,
    factory: F,
    observe: O,
) -> Result<usize, ConformanceFailure>
where
    E: Dispatch<Listener = L>,
    L: ?Sized,
    C: PartialEq + Debug,
    F: Fn() -> (Rc<L>, Rc<P>),
    O: Fn(&P) -> Vec<C>,
{
    let total = cases.len();

    for case in cases {
        let (listener, probe) = factory();
        let registry = ListenerRegistry::new(case.event.source());

        let delivered = registry
            .add(listener)
            .and_then(|()| registry.fire(&case.event));
        if let Err(err) = delivered {
            return Err(ConformanceFailure {
                case: case.name,
                expected: "delivery".into(),
                observed: err.to_string(),
            });
        }

        let observed = observe(probe.as_ref());
        if observed != case.expected {
            return Err(ConformanceFailure {
                case: case.name,
                expected: format!("{:?}", case.expected),
                observed: format!("{:?}", observed),
            });
        }
    }

    Ok(total)
}
