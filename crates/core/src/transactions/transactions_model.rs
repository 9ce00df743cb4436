//! Transaction domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_CATEGORY;
use crate::errors::ValidationError;
use crate::money::{normalize_amount, validate_amount};
use crate::Result;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Applies the direction to a positive amount.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a recorded transaction.
///
/// Owned by exactly one user. Records are replaced as a whole on edit and are
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// The category used for grouping; missing or blank categories fall back
    /// to [`DEFAULT_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Amount with its sign applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        self.transaction_type.signed(self.amount)
    }

    /// Returns the amount when it passes normalization, `None` otherwise.
    pub fn valid_amount(&self) -> Option<Decimal> {
        validate_amount(self.amount, "Amount").ok()
    }
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Option<String>,
    /// `None` lets the backend stamp the record with its own clock.
    pub date: Option<DateTime<Utc>>,
}

/// Full replacement of an existing transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
}

/// Raw values from the add/edit transaction forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

impl TransactionInput {
    pub fn income(description: &str, amount: &str, category: &str) -> Self {
        Self::with_type(TransactionType::Income, description, amount, category)
    }

    pub fn expense(description: &str, amount: &str, category: &str) -> Self {
        Self::with_type(TransactionType::Expense, description, amount, category)
    }

    fn with_type(
        transaction_type: TransactionType,
        description: &str,
        amount: &str,
        category: &str,
    ) -> Self {
        Self {
            description: description.to_string(),
            amount: amount.to_string(),
            transaction_type: Some(transaction_type),
            category: category.to_string(),
            date: None,
        }
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the form for creating a transaction.
    pub fn validate_new(&self) -> Result<NewTransaction> {
        let (description, amount, transaction_type, category) = self.validate_common()?;
        Ok(NewTransaction {
            description,
            amount,
            transaction_type,
            category: Some(category),
            date: self.date,
        })
    }

    /// Validates the form for editing transaction `id`. The date is required.
    pub fn validate_update(&self, id: &str) -> Result<TransactionUpdate> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingField("Transaction ID".to_string()).into());
        }
        let (description, amount, transaction_type, category) = self.validate_common()?;
        let date = self
            .date
            .ok_or_else(|| ValidationError::MissingField("Date".to_string()))?;
        Ok(TransactionUpdate {
            id: id.to_string(),
            description,
            amount,
            transaction_type,
            category: Some(category),
            date,
        })
    }

    fn validate_common(&self) -> Result<(String, Decimal, TransactionType, String)> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("Description".to_string()).into());
        }
        let amount = normalize_amount(&self.amount, "Amount")?;
        let transaction_type = self
            .transaction_type
            .ok_or_else(|| ValidationError::MissingField("Type".to_string()))?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingField("Category".to_string()).into());
        }
        Ok((
            description.to_string(),
            amount,
            transaction_type,
            category.to_string(),
        ))
    }
}
