//! Scheduled background services.

mod expiry_poller;

pub use expiry_poller::{ExpiryPoller, ExpiryPollerConfig, PollReport};
