//! SQLite storage implementation for Monezi.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `monezi-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - A single writer actor that serializes every write
//! - Live queries that re-emit full snapshots after each committed write
//! - Repository implementations for transactions, goals, profiles and settings
//!
//! ```text
//!        core (domain, services, feeds)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod live;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;
pub mod settings;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};
pub use live::{ChangeEvent, ChangeFeed, Collection};

pub use goals::GoalRepository;
pub use settings::SettingsRepository;
pub use transactions::TransactionRepository;
pub use users::UserProfileRepository;

// Re-export core error types for convenience
pub use monezi_core::errors::{DatabaseError, Error, Result};
