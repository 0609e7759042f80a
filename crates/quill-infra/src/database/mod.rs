//! Persistence layer - SeaORM entities, Postgres stores and in-memory fallbacks.

mod connections;
pub mod entity;
mod memory;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};
