//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `subscription` - Webhook verification, event normalization, and the
//!   subscription profile overwrite

pub mod foundation;
pub mod subscription;
