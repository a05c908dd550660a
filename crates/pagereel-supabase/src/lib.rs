//! Supabase PostgREST client.
//!
//! This crate provides:
//! - A typed REST client with equality filters, upserts, and deletes
//! - Auth user lookup against the Supabase auth endpoint
//! - Repositories for the liked-asset library, option catalogs, and the
//!   works listing
//! - API-key authentication and request observability

pub mod auth;
pub mod client;
pub mod error;
pub mod metrics;
pub mod repos;

pub use auth::AuthUser;
pub use client::{EqFilter, SupabaseClient, SupabaseConfig};
pub use error::{SupabaseError, SupabaseResult};
pub use repos::{LibraryRepository, OptionsRepository, TaskRepository};
