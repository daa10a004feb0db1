//! # card-table
//!
//! Observable cards and card piles for tabletop card games.
//!
//! Table entities notify registered listeners of every state change through
//! a small, strict dispatch contract. Rendering, input, persistence and game
//! rules live elsewhere and see the table only through the listener traits.
//!
//! ## Design Principles
//!
//! 1. **Synchronous, ordered delivery**: listeners are called on the
//!    mutating thread, after the change is applied, in registration order.
//!
//! 2. **Snapshot dispatch**: the listener list is copied before a pass, so a
//!    callback may add or remove listeners (itself included) without
//!    disturbing the pass in progress.
//!
//! 3. **Fail-stop on malformed events**: an event that disagrees with its
//!    subject is rejected with `InvalidEvent` before anyone sees it.
//!
//! 4. **Typed adapters**: listeners written for a specific domain (card
//!    piles) attach to generic containers through an explicit, exhaustive
//!    translation.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use card_table::core::{EntityAllocator, PileConfig};
//! use card_table::listeners::PileListenerAdapter;
//! use card_table::piles::CardPile;
//! use card_table::testing::MockPileListener;
//! use card_table::PileEvent;
//!
//! let mut ids = EntityAllocator::new();
//! let mut discard = CardPile::new(ids.alloc().unwrap(), PileConfig::new("Discard"));
//! let card = ids.alloc().unwrap();
//!
//! let watcher = Rc::new(PileListenerAdapter::new(MockPileListener::new()));
//! discard.add_listener(watcher.clone()).unwrap();
//!
//! discard.add(card, None).unwrap();
//! assert_eq!(
//!     watcher.inner().calls(),
//!     vec![PileEvent::CardAdded { pile: discard.id(), card, index: 0 }]
//! );
//! ```
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, pile configuration, RNG
//! - `events`: Card and container change events
//! - `listeners`: Listener traits, registry, pile adapter
//! - `cards`: Observable cards
//! - `piles`: Observable card piles
//! - `testing`: Recording mocks and conformance checks
//! - `logging`: Tracing targets

pub mod core;
pub mod error;
pub mod logging;
pub mod events;
pub mod listeners;
pub mod cards;
pub mod piles;
pub mod testing;

// Re-export commonly used types
pub use crate::core::{
    EntityAllocator, EntityId, PlayerId,
    PileConfig, PilePosition, PileVisibility,
    TableRng, TableRngState,
};

pub use crate::error::{TableError, TableResult};

pub use crate::events::{
    CardChange, CardEvent, CardEventKind,
    ContainerChange, ContainerEvent, ContainerEventKind,
};

pub use crate::listeners::{
    CardListener, CardPileListener, ContainerListener,
    Dispatch, ListenerRegistry, PileEvent, PileListenerAdapter,
};

pub use crate::cards::{Card, CardId, Orientation};

pub use crate::piles::CardPile;
