//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `audit` - Structured-log webhook audit trail
//! - `http` - Axum endpoints
//! - `memory` - In-memory ports for tests and local development
//! - `supabase` - Supabase auth admin and PostgREST clients

pub mod audit;
pub mod http;
pub mod memory;
pub mod supabase;

pub use audit::TracingAuditSink;
pub use memory::{InMemoryAuditSink, InMemoryIdentityDirectory, InMemoryProfileRepository};
pub use supabase::{
    SupabaseClient, SupabaseConfig, SupabaseIdentityDirectory, SupabaseProfileRepository,
};
