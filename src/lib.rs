//! Reseller Billing - Subscription lifecycle service for a reseller panel
//!
//! Decides whether a reseller may use the panel, expires overdue payments,
//! and reminds resellers before their subscription runs out.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
