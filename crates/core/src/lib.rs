//! Monezi Core - Domain entities, aggregation, services, and traits.
//!
//! This crate contains the business logic of the Monezi personal finance app.
//! It is backend-agnostic: the document store, identity provider, settings
//! store and notification scheduler are reached through traits, implemented
//! by the `storage-sqlite` crate or by a platform adapter.

pub mod constants;
pub mod errors;
pub mod events;
pub mod feeds;
pub mod goals;
pub mod money;
pub mod reminders;
pub mod settings;
pub mod subscriptions;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
