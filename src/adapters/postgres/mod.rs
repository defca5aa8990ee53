//! PostgreSQL adapters for the entity store port.

mod poll_store;

pub use poll_store::PostgresPollStore;
