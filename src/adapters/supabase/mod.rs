//! Supabase adapters.
//!
//! - `SupabaseIdentityDirectory` - auth admin API user lookup
//! - `SupabaseProfileRepository` - PostgREST upsert into the profiles table
//!
//! Both authenticate with the service-role key, which bypasses row level
//! security. It must never leave the server.

mod client;
mod identity_directory;
mod profile_repository;

pub use client::{SupabaseClient, SupabaseConfig};
pub use identity_directory::SupabaseIdentityDirectory;
pub use profile_repository::SupabaseProfileRepository;
