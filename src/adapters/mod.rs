//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST endpoints
//! - `memory` - in-memory store for tests and local runs
//! - `postgres` - PostgreSQL store

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::MemoryPollStore;
pub use postgres::PostgresPollStore;
