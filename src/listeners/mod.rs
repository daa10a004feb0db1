//! Listener capability sets and dispatch.
//!
//! Subjects notify observers through typed listener traits, one method per
//! event kind:
//!
//! - [`CardListener`]: flips, rotations, controller and state changes
//! - [`ContainerListener`]: generic add/remove/reorder of any container
//! - [`CardPileListener`]: the same changes in card-pile terms, attached to a
//!   pile through [`PileListenerAdapter`]
//!
//! Each subject owns a [`ListenerRegistry`] that keeps listeners in
//! registration order and delivers events synchronously.
//!
//! ## Contract
//!
//! - Registering the same instance twice fails with `DuplicateRegistration`;
//!   removing an instance that is not registered fails with `NotRegistered`.
//! - Every listener registered when a pass begins receives the event exactly
//!   once, in registration order.
//! - A malformed event fails with `InvalidEvent` before anyone is notified.
//! - Adapters translate every event kind they understand, ignore the rest,
//!   and keep the source and payload intact.

mod card;
mod container;
mod pile;
mod registry;

pub use card::CardListener;
pub use container::ContainerListener;
pub use pile::{translate, CardPileListener, PileEvent, PileListenerAdapter};
pub use registry::{Dispatch, ListenerRegistry, ListenerSnapshot};
