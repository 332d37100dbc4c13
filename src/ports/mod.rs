//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityDirectory` - Email to user lookup (Supabase auth)
//! - `ProfileRepository` - Subscription profile writes (Supabase PostgREST)
//! - `WebhookAuditSink` - One decision record per webhook delivery

mod identity_directory;
mod profile_repository;
mod webhook_audit;

pub use identity_directory::{IdentityDirectory, IdentityUser};
pub use profile_repository::ProfileRepository;
pub use webhook_audit::WebhookAuditSink;
