//! Transactions module - domain models, filtering, aggregation, services, and traits.

mod transactions_filter;
mod transactions_model;
mod transactions_service;
mod transactions_summary;
mod transactions_traits;


pub use transactions_filter::TransactionFilter;
pub use transactions_model::{
    NewTransaction, Transaction, TransactionInput, TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_summary::{CategorySlice, TransactionSummary};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
