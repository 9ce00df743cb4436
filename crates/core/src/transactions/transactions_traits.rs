//! Transaction repository and service traits.
//!
//! These traits define the contract for transaction operations without any
//! backend-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::transactions_filter::TransactionFilter;
use super::transactions_model::{NewTransaction, Transaction, TransactionInput, TransactionUpdate};
use super::transactions_summary::TransactionSummary;
use crate::errors::Result;
use crate::subscriptions::Subscription;
use crate::users::Session;

/// Trait defining the contract for the transaction document collection.
///
/// Every operation is scoped to one user's collection. Reads and live
/// snapshots are ordered by transaction date, most recent first.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Creates a transaction. The backend assigns the ID and, when the input
    /// carries no date, the timestamp.
    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Replaces an existing transaction.
    async fn update(
        &self,
        user_id: &str,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Deletes a transaction by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;

    /// One-shot read of the whole collection.
    fn list(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Live query over the collection; every emission is the full filtered set.
    fn subscribe(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Subscription<Transaction>>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Validates the form and records a new transaction.
    async fn add_transaction(
        &self,
        session: &Session,
        input: TransactionInput,
    ) -> Result<Transaction>;

    /// Validates the form and replaces transaction `transaction_id`.
    async fn edit_transaction(
        &self,
        session: &Session,
        transaction_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, session: &Session, transaction_id: &str) -> Result<()>;

    fn list_transactions(&self, session: &Session) -> Result<Vec<Transaction>>;

    /// Balance over the full, unfiltered collection.
    fn total_balance(&self, session: &Session) -> Result<Decimal>;

    /// Summary of the filtered collection.
    fn summarize(&self, session: &Session, filter: &TransactionFilter)
        -> Result<TransactionSummary>;

    fn subscribe_transactions(
        &self,
        session: &Session,
        filter: TransactionFilter,
    ) -> Result<Subscription<Transaction>>;
}
