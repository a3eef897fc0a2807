//! Subscription domain module.
//!
//! Derives a reseller's access from the stored snapshot and decides how
//! guarded navigation reacts to it.
//!
//! # Module Structure
//!
//! - `account_status` - Stored account status values
//! - `reseller` - Snapshot of the fields access depends on
//! - `evaluator` - Ordered access rules
//! - `health` - Display classification (active, expiring soon, ...)
//! - `milestone` - 7/3/1-day reminder milestones
//! - `guard` - Redirect policy for protected views

mod account_status;
mod errors;
mod evaluator;
mod guard;
mod health;
mod milestone;
mod reseller;

pub use account_status::AccountStatus;
pub use errors::SubscriptionError;
pub use evaluator::{evaluate_access, AccessDecision, BlockReason};
pub use guard::{AccessGuard, GuardOutcome};
pub use health::SubscriptionHealth;
pub use milestone::ReminderMilestone;
pub use reseller::ResellerSnapshot;
