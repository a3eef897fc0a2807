//! HTTP middleware for axum.
//!
//! - `subscription_guard` - Blocks protected routes for resellers without access

pub mod subscription_guard;

pub use subscription_guard::subscription_guard;
