//! Storage for the denormalized answers read model.
//!
//! This crate owns the query-side data of the CQRS split:
//! - [`DenormalizedAnswer`] — the read-optimized record
//! - [`AnswerStore`] — trait over storage backends
//! - [`InMemoryAnswerStore`] — in-memory implementation for tests and
//!   default wiring
//! - [`PostgresAnswerStore`] — durable PostgreSQL implementation
//!
//! The store is append-only from this system's perspective: records are
//! inserted by the projector and read by the query API, never updated or
//! deleted.

pub mod answer;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use answer::DenormalizedAnswer;
pub use error::{Result, StoreError};
pub use memory::InMemoryAnswerStore;
pub use postgres::PostgresAnswerStore;
pub use store::AnswerStore;
