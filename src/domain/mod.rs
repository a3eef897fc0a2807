//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, calendar, errors)
//! - `subscription` - Access evaluation, health and the access guard policy
//! - `billing` - Payments and their expiry rules
//! - `notification` - Reseller notifications

pub mod billing;
pub mod foundation;
pub mod notification;
pub mod subscription;
