use async_trait::async_trait;
use log::{debug, error, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::transactions_filter::TransactionFilter;
use super::transactions_model::{Transaction, TransactionInput};
use super::transactions_summary::TransactionSummary;
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::subscriptions::Subscription;
use crate::users::Session;

/// Service for recording and aggregating a user's transactions.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn emit_changed(&self, session: &Session, transaction_id: &str) {
        self.event_sink.emit(DomainEvent::transactions_changed(
            session.user_id(),
            vec![transaction_id.to_string()],
        ));
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn add_transaction(
        &self,
        session: &Session,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let new_transaction = input.validate_new()?;
        let transaction = self
            .repository
            .create(session.user_id(), new_transaction)
            .await
            .map_err(|e| {
                error!("Failed to add transaction: {}", e);
                Error::remote_write("add the transaction", e)
            })?;
        debug!(
            "Added {} transaction {}",
            transaction.transaction_type, transaction.id
        );
        self.emit_changed(session, &transaction.id);
        Ok(transaction)
    }

    async fn edit_transaction(
        &self,
        session: &Session,
        transaction_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let update = input.validate_update(transaction_id)?;
        let transaction = self
            .repository
            .update(session.user_id(), update)
            .await
            .map_err(|e| {
                error!("Failed to update transaction {}: {}", transaction_id, e);
                Error::remote_write("update the transaction", e)
            })?;
        self.emit_changed(session, &transaction.id);
        Ok(transaction)
    }

    async fn delete_transaction(&self, session: &Session, transaction_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete(session.user_id(), transaction_id)
            .await
            .map_err(|e| {
                error!("Failed to delete transaction {}: {}", transaction_id, e);
                Error::remote_write("delete the transaction", e)
            })?;
        if deleted == 0 {
            warn!("Transaction {} was already gone", transaction_id);
            return Ok(());
        }
        self.emit_changed(session, transaction_id);
        Ok(())
    }

    fn list_transactions(&self, session: &Session) -> Result<Vec<Transaction>> {
        self.repository.list(session.user_id())
    }

    fn total_balance(&self, session: &Session) -> Result<Decimal> {
        let transactions = self.repository.list(session.user_id())?;
        Ok(TransactionSummary::from_transactions(&transactions).balance)
    }

    fn summarize(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> Result<TransactionSummary> {
        let transactions = self.repository.list(session.user_id())?;
        Ok(TransactionSummary::from_transactions(
            transactions.iter().filter(|t| filter.matches(t)),
        ))
    }

    fn subscribe_transactions(
        &self,
        session: &Session,
        filter: TransactionFilter,
    ) -> Result<Subscription<Transaction>> {
        self.repository.subscribe(session.user_id(), filter)
    }
}
