//! Billing domain module.
//!
//! Payments a reseller makes for a plan and the rules for expiring stale ones.

mod payment;
mod status;

pub use payment::{append_note, Payment};
pub use status::PaymentStatus;
