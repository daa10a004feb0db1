//! Generic container listener capability set.

use std::rc::Rc;

use im::Vector;

use crate::core::EntityId;
use crate::error::TableResult;
use crate::events::{ContainerChange, ContainerEvent};

use super::registry::Dispatch;

/// Observer of any ordered container.
///
/// Dispatch enters through [`container_event`], whose default routes to the
/// per-kind methods. Adapters that re-express container events in another
/// vocabulary override `container_event` instead.
///
/// [`container_event`]: ContainerListener::container_event
pub trait ContainerListener {
    /// Entry point for dispatch. Routes to the method matching the kind.
    fn container_event(&self, event: &ContainerEvent) {
        let container = event.source;
        match &event.change {
            ContainerChange::Added { component, index } => {
                self.component_added(container, *component, *index);
            }
            ContainerChange::Removed { component, index } => {
                self.component_removed(container, *component, *index);
            }
            ContainerChange::Reordered { order } => self.components_reordered(container, order),
            ContainerChange::Cleared { removed } => self.container_cleared(container, removed),
            ContainerChange::Custom { tag, value } => self.container_custom(container, tag, *value),
        }
    }

    /// `component` was inserted at `index`.
    fn component_added(&self, _container: EntityId, _component: EntityId, _index: usize) {}

    /// `component` was taken out of `index`.
    fn component_removed(&self, _container: EntityId, _component: EntityId, _index: usize) {}

    /// The components were permuted into `order`.
    fn components_reordered(&self, _container: EntityId, _order: &Vector<EntityId>) {}

    /// Every component was removed; `removed` is the old order.
    fn container_cleared(&self, _container: EntityId, _removed: &Vector<EntityId>) {}

    /// A game-defined notification.
    fn container_custom(&self, _container: EntityId, _tag: &str, _value: i64) {}
}

impl<L: ContainerListener + ?Sized> ContainerListener for Rc<L> {
    fn container_event(&self, event: &ContainerEvent) {
        (**self).container_event(event);
    }

    fn component_added(&self, container: EntityId, component: EntityId, index: usize) {
        (**self).component_added(container, component, index);
    }

    fn component_removed(&self, container: EntityId, component: EntityId, index: usize) {
        (**self).component_removed(container, component, index);
    }

    fn components_reordered(&self, container: EntityId, order: &Vector<EntityId>) {
        (**self).components_reordered(container, order);
    }

    fn container_cleared(&self, container: EntityId, removed: &Vector<EntityId>) {
        (**self).container_cleared(container, removed);
    }

    fn container_custom(&self, container: EntityId, tag: &str, value: i64) {
        (**self).container_custom(container, tag, value);
    }
}

impl Dispatch for ContainerEvent {
    type Listener = dyn ContainerListener;

    fn source(&self) -> EntityId {
        self.source
    }

    fn validate(&self) -> TableResult<()> {
        ContainerEvent::validate(self)
    }

    fn deliver(&self, listener: &Self::Listener) {
        listener.container_event(self);
    }
}
