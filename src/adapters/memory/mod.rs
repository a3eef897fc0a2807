//! In-memory adapters for tests and local runs without a database.
//!
//! Same semantics as the Postgres adapters: conditional cancellation and a
//! unique notification key per reseller, kind and day.

mod notifications;
mod payments;
mod resellers;

pub use notifications::InMemoryNotificationRepository;
pub use payments::InMemoryPaymentRepository;
pub use resellers::InMemoryResellerReader;
