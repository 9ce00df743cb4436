use serde::{Deserialize, Serialize};

use super::transactions_model::{Transaction, TransactionType};
use crate::constants::ALL_CATEGORIES;

/// Narrows a transaction sequence by type and/or category.
///
/// A transaction passes when the type is unset or matches, and the category is
/// unset (or the "all" sentinel) or matches exactly. Category matching is
/// case-sensitive and compares against the effective category, so a missing
/// category matches the fallback label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionFilter {
    /// A filter that lets everything through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn category_constraint(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }

    /// True when neither type nor category narrows the sequence.
    pub fn is_unfiltered(&self) -> bool {
        self.transaction_type.is_none() && self.category_constraint().is_none()
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let type_matches = self
            .transaction_type
            .map_or(true, |wanted| transaction.transaction_type == wanted);
        let category_matches = self
            .category_constraint()
            .map_or(true, |wanted| transaction.category_or_default() == wanted);
        type_matches && category_matches
    }

    /// Returns the matching transactions, preserving input order.
    pub fn apply<'a, I>(&self, transactions: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
