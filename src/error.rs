//! Error types for table operations and listener dispatch.

use crate::core::EntityId;

/// Result type alias for table operations.
pub type TableResult<T> = std::result::Result<T, TableError>;

/// Errors raised by subjects and listener registries.
///
/// Registration errors and pile errors are recoverable and rejected at the
/// call site. `InvalidEvent` aborts the notification pass it was raised in
/// and is returned to the caller of the mutating operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The listener instance is already registered with this subject.
    #[error("listener already registered with {subject}")]
    DuplicateRegistration { subject: EntityId },

    /// The listener instance was never registered with this subject.
    #[error("listener not registered with {subject}")]
    NotRegistered { subject: EntityId },

    /// A malformed event reached dispatch.
    #[error("invalid event for {subject}: {reason}")]
    InvalidEvent { subject: EntityId, reason: String },

    /// The card is already in the pile.
    #[error("{card} is already in pile {pile}")]
    DuplicateCard { pile: EntityId, card: EntityId },

    /// The card is not in the pile.
    #[error("{card} is not in pile {pile}")]
    CardNotFound { pile: EntityId, card: EntityId },

    /// The pile is at its configured capacity.
    #[error("pile {pile} is full ({capacity} cards)")]
    PileFull { pile: EntityId, capacity: usize },

    /// An index outside the pile was given.
    #[error("index {index} out of bounds for pile {pile} of length {len}")]
    IndexOutOfBounds {
        pile: EntityId,
        index: usize,
        len: usize,
    },

    /// A state change would leave the `i64` range.
    #[error("state `{key}` on {card} would overflow")]
    StateOverflow { card: EntityId, key: String },

    /// The allocator has handed out every id.
    #[error("entity ids exhausted")]
    EntityIdsExhausted,
}

impl TableError {
    /// Create an invalid event error.
    pub fn invalid_event(subject: EntityId, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            subject,
            reason: reason.into(),
        }
    }

    /// Whether this error came from a malformed event.
    #[must_use]
    pub fn is_invalid_event(&self) -> bool {
        matches!(self, Self::InvalidEvent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TableError::DuplicateRegistration { subject: EntityId(3) };
        assert_eq!(err.to_string(), "listener already registered with Entity(3)");

        let err = TableError::invalid_event(EntityId(1), "source mismatch");
        assert_eq!(err.to_string(), "invalid event for Entity(1): source mismatch");
        assert!(err.is_invalid_event());

        let err = TableError::IndexOutOfBounds { pile: EntityId(2), index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 5 out of bounds for pile Entity(2) of length 3"
        );
        assert!(!err.is_invalid_event());

        let err = TableError::StateOverflow { card: EntityId(4), key: "counters".into() };
        assert_eq!(err.to_string(), "state `counters` on Entity(4) would overflow");
    }
}
