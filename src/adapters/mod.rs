//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL repositories
//! - `memory` - In-memory repositories for tests and local runs
//! - `scheduler` - Background expiry poller
//! - `http` - Axum routes and the subscription guard

pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use scheduler::{ExpiryPoller, ExpiryPollerConfig, PollReport};
