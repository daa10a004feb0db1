//! Test support for listener implementations.
//!
//! - Recording mocks for each listener capability set
//! - Table-driven conformance checks parameterized by a listener factory
//!
//! Game crates use these to verify their own listeners and adapters against
//! the same tables this crate uses for its built-in ones.

mod conformance;
mod mock;

pub use conformance::{
    card_listener_cases, check_card_listener, check_container_adapter, container_adapter_cases,
    run_cases, ConformanceCase, ConformanceFailure, CONFORMANCE_SUBJECT,
};
pub use mock::{
    CallJournal, CardCall, ContainerCall, MockCardListener, MockContainerListener,
    MockPileListener,
};
