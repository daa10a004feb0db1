//! Ordered listener registry.
//!
//! Every subject owns one `ListenerRegistry`. It keeps listeners in
//! registration order, rejects duplicate registrations by instance identity,
//! and delivers events synchronously.
//!
//! ## Dispatch discipline
//!
//! `fire` validates the event first and delivers nothing if it is malformed.
//! It then snapshots the listener list and walks the snapshot. Callbacks may
//! register or remove listeners (including themselves) through a shared
//! handle to the registry; those changes apply from the next event on and
//! never disturb the pass in progress.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use card_table::core::EntityId;
//! use card_table::events::CardEvent;
//! use card_table::listeners::{CardListener, ListenerRegistry};
//!
//! #[derive(Default)]
//! struct FlipCounter(Cell<u32>);
//!
//! impl CardListener for FlipCounter {
//!     fn card_flipped(&self, _card: EntityId, _face_down: bool) {
//!         self.0.set(self.0.get() + 1);
//!     }
//! }
//!
//! let registry: ListenerRegistry<dyn CardListener> = ListenerRegistry::new(EntityId(7));
//! let counter = Rc::new(FlipCounter::default());
//! registry.add(counter.clone()).unwrap();
//!
//! let notified = registry.fire(&CardEvent::flipped(EntityId(7), true)).unwrap();
//! assert_eq!(notified, 1);
//! assert_eq!(counter.0.get(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::EntityId;
use crate::error::{TableError, TableResult};
use crate::logging::targets;

/// An event that knows how to reach a particular listener capability set.
///
/// Implemented once per event family, with an exhaustive match from event
/// kind to listener method inside `deliver`.
pub trait Dispatch {
    /// The listener trait object this event is delivered to.
    type Listener: ?Sized;

    /// The subject the event claims to come from.
    fn source(&self) -> EntityId;

    /// Reject malformed payloads before any listener is called.
    fn validate(&self) -> TableResult<()>;

    /// Call the method of `listener` matching this event's kind.
    fn deliver(&self, listener: &Self::Listener);
}

/// Snapshot of the registered listeners taken at the start of a pass.
pub type ListenerSnapshot<L> = SmallVec<[Rc<L>; 4]>;

/// Ordered set of listeners owned by one subject.
pub struct ListenerRegistry<L: ?Sized> {
    owner: EntityId,
    listeners: RefCell<Vec<Rc<L>>>,
}

impl<L: ?Sized> ListenerRegistry<L> {
    /// Create an empty registry for the subject `owner`.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// The subject this registry belongs to.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Append a listener.
    ///
    /// Fails with `DuplicateRegistration` if this exact instance is already
    /// registered.
    pub fn add(&self, listener: Rc<L>) -> TableResult<()> {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| same_instance(l, &listener)) {
            tracing::debug!(target: targets::DISPATCH, subject = %self.owner, "duplicate listener rejected");
            return Err(TableError::DuplicateRegistration { subject: self.owner });
        }

        listeners.push(listener);
        tracing::debug!(target: targets::DISPATCH, subject = %self.owner, count = listeners.len(), "listener registered");
        Ok(())
    }

    /// Remove a listener, keeping the others in order.
    ///
    /// `listener` may be any `Rc` pointing at the registered instance,
    /// whatever its static type. Fails with `NotRegistered` if the instance
    /// is not registered.
    pub fn remove<T: ?Sized>(&self, listener: &Rc<T>) -> TableResult<Rc<L>> {
        let mut listeners = self.listeners.borrow_mut();
        let position = listeners
            .iter()
            .position(|l| same_instance(l, listener))
            .ok_or(TableError::NotRegistered { subject: self.owner })?;

        let removed = listeners.remove(position);
        tracing::debug!(target: targets::DISPATCH, subject = %self.owner, count = listeners.len(), "listener removed");
        Ok(removed)
    }

    /// Check whether a listener instance is registered.
    #[must_use]
    pub fn contains<T: ?Sized>(&self, listener: &Rc<T>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| same_instance(l, listener))
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Check if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    /// Copy of the current listener list, in notification order.
    #[must_use]
    pub fn snapshot(&self) -> ListenerSnapshot<L> {
        self.listeners.borrow().iter().cloned().collect()
    }

    /// Deliver `event` to every listener registered when the call begins.
    ///
    /// Returns the number of listeners notified. Fails with `InvalidEvent`,
    /// before notifying anyone, if the event names another subject as its
    /// source or its payload is malformed.
    #[tracing::instrument(skip_all, target = "card_table::dispatch", level = "trace", fields(subject = %self.owner))]
    pub fn fire<E>(&self, event: &E) -> TableResult<usize>
    where
        E: Dispatch<Listener = L>,
    {
        if event.source() != self.owner {
            tracing::warn!(target: targets::DISPATCH, subject = %self.owner, source = %event.source(), "event from foreign source rejected");
            return Err(TableError::invalid_event(
                self.owner,
                format!("event source {} does not match subject", event.source()),
            ));
        }

        if let Err(err) = event.validate() {
            tracing::warn!(target: targets::DISPATCH, subject = %self.owner, error = %err, "malformed event rejected");
            return Err(err);
        }

        // The borrow is released before any callback runs.
        let snapshot = self.snapshot();
        tracing::trace!(target: targets::DISPATCH, listener_count = snapshot.len(), "dispatching event");

        for listener in &snapshot {
            event.deliver(listener);
        }

        Ok(snapshot.len())
    }
}

impl<L: ?Sized> std::fmt::Debug for ListenerRegistry<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("owner", &self.owner)
            .field("listeners", &self.len())
            .finish()
    }
}

/// Instance identity, ignoring trait object metadata.
fn same_instance<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
