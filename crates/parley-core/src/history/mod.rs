//! Turn history persistence abstraction.
//!
//! Defines the `HistoryStore` trait that the infrastructure layer implements
//! for appending and querying chat turns.

pub mod store;

pub use store::HistoryStore;
