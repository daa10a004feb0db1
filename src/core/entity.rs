//! Entity identification.
//!
//! Every table object that can be observed (a card, a pile) has a unique
//! `EntityId`. Events carry the id of their source entity, and listener
//! registries use it to reject events that claim to come from somewhere else.
//!
//! ## Usage
//!
//! ```
//! use card_table::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::new();
//! let pile = ids.alloc().unwrap();
//! let card = ids.alloc().unwrap();
//!
//! assert_eq!(pile, EntityId(0));
//! assert_eq!(card, EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};

/// Unique identifier for any table entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Sequential allocator for entity ids.
///
/// Construction and lifecycle of subjects belong to the game engine; this is
/// only a convenience so that a table hands out ids that never collide.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next id.
    ///
    /// `u32::MAX` is never handed out; once the ids below it are used up,
    /// this fails with `EntityIdsExhausted`.
    pub fn alloc(&mut self) -> TableResult<EntityId> {
        let next = self
            .next
            .checked_add(1)
            .ok_or(TableError::EntityIdsExhausted)?;
        let id = EntityId(self.next);
        self.next = next;
        Ok(id)
    }
}
