//! Creem Billing - Payment webhook reconciliation for subscription profiles
//!
//! This crate receives Creem.io payment webhooks, verifies their HMAC
//! signatures, and overwrites the matching user's subscription plan and
//! status in Supabase.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
