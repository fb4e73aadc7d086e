//! HTTP route handlers.

pub mod answers;
pub mod health;
pub mod metrics;
