//! In-memory adapters for testing and local development.
//!
//! # Security Note
//!
//! These adapters are for **testing only**. They use `.expect()` on lock
//! operations which will panic if locks are poisoned.

mod audit_sink;
mod identity_directory;
mod profile_repository;

pub use audit_sink::InMemoryAuditSink;
pub use identity_directory::InMemoryIdentityDirectory;
pub use profile_repository::InMemoryProfileRepository;
