//! Change events fired by table subjects.
//!
//! Events are immutable snapshots created after the subject's state reflects
//! the change and dropped once every listener has seen them.
//!
//! - [`CardEvent`]: flips, rotations, controller and state changes of a card
//! - [`ContainerEvent`]: additions, removals, reorders of an ordered container

mod card_event;
mod container_event;

pub use card_event::{CardChange, CardEvent, CardEventKind};
pub use container_event::{ContainerChange, ContainerEvent, ContainerEventKind};
