//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ResellerReader` - Reseller subscription snapshots (read only)
//! - `PaymentRepository` - Overdue payment lookup and cancellation
//! - `NotificationRepository` - Day-scoped notification storage

mod notification_repository;
mod payment_repository;
mod reseller_reader;

pub use notification_repository::{NotificationRepository, SaveResult};
pub use payment_repository::PaymentRepository;
pub use reseller_reader::ResellerReader;
