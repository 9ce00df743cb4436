//! Database models for transactions.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use monezi_core::transactions::{Transaction, TransactionType, TransactionUpdate};

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for transactions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: String,
    pub transaction_type: String,
    pub category: Option<String>,
    pub date: String,
    pub updated_at: Option<String>,
}

impl TransactionDB {
    /// Builds the full row for a replace of an existing record.
    pub fn from_update(user_id: &str, update: TransactionUpdate, updated_at: &str) -> Self {
        Self {
            id: update.id,
            user_id: user_id.to_string(),
            description: update.description,
            amount: format_decimal(update.amount),
            transaction_type: update.transaction_type.as_str().to_string(),
            category: update.category,
            date: format_timestamp(&update.date),
            updated_at: Some(updated_at.to_string()),
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        // Unknown types load as expenses so a bad row never inflates the balance.
        let transaction_type = TransactionType::from_str(&db.transaction_type).unwrap_or_else(|e| {
            log::error!("Transaction {}: {}. Treating as expense.", db.id, e);
            TransactionType::Expense
        });
        Self {
            amount: parse_decimal(&db.amount, "amount"),
            date: parse_timestamp(&db.date, "date"),
            updated_at: db
                .updated_at
                .as_deref()
                .map(|value| parse_timestamp(value, "updated_at")),
            id: db.id,
            user_id: db.user_id,
            description: db.description,
            transaction_type,
            category: db.category,
        }
    }
}
