//! Tracing targets.
//!
//! The crate logs through `tracing` and never installs a subscriber. Use
//! these targets in filter directives to select a subsystem, for example
//! `RUST_LOG=card_table::dispatch=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Listener registration and event delivery.
    pub const DISPATCH: &str = "card_table::dispatch";
    /// Card mutations.
    pub const CARD: &str = "card_table::card";
    /// Pile mutations.
    pub const PILE: &str = "card_table::pile";
}
