//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM-backed Postgres stores (plus in-memory fallbacks), JWT token
//! issuance/verification and Argon2 password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
