//! Folding a transaction sequence into balance and per-category totals.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::transactions_model::{Transaction, TransactionType};

/// Result of reducing a transaction sequence.
///
/// The reduction is commutative: the totals do not depend on input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Income minus expenses.
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Expense totals keyed by category. Income is never included.
    pub category_summary: BTreeMap<String, Decimal>,
    /// Every category seen, income or expense.
    pub categories: BTreeSet<String>,
    /// Number of transactions that were counted.
    pub transaction_count: usize,
}

/// One slice of the expenses-by-category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: String,
    pub total: Decimal,
}

impl TransactionSummary {
    /// Reduces `transactions` into a summary.
    ///
    /// Transactions whose amount fails normalization, or would overflow a
    /// running total, are skipped entirely and affect neither the balance nor
    /// the category totals.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut summary, transaction| {
                summary.add(transaction);
                summary
            })
    }

    fn add(&mut self, transaction: &Transaction) {
        let Some(amount) = transaction.valid_amount() else {
            warn!(
                "Skipping transaction {} with invalid amount {}",
                transaction.id, transaction.amount
            );
            return;
        };

        let category = transaction.category_or_default();
        if self.apply(transaction.transaction_type, category, amount).is_none() {
            warn!(
                "Skipping transaction {} whose amount {} overflows the running totals",
                transaction.id, amount
            );
            return;
        }
        self.categories.insert(category.to_string());
        self.transaction_count += 1;
    }

    /// Applies `amount` to the totals. Nothing changes when any sum overflows.
    fn apply(
        &mut self,
        transaction_type: TransactionType,
        category: &str,
        amount: Decimal,
    ) -> Option<()> {
        match transaction_type {
            TransactionType::Income => {
                let balance = self.balance.checked_add(amount)?;
                let total_income = self.total_income.checked_add(amount)?;
                self.balance = balance;
                self.total_income = total_income;
            }
            TransactionType::Expense => {
                let balance = self.balance.checked_sub(amount)?;
                let total_expense = self.total_expense.checked_add(amount)?;
                let category_total = self
                    .category_summary
                    .get(category)
                    .copied()
                    .unwrap_or(Decimal::ZERO)
                    .checked_add(amount)?;
                self.balance = balance;
                self.total_expense = total_expense;
                self.category_summary
                    .insert(category.to_string(), category_total);
            }
        }
        Some(())
    }

    /// Chart slices ordered by total (largest first), then by name.
    pub fn chart_slices(&self) -> Vec<CategorySlice> {
        let mut slices: Vec<CategorySlice> = self
            .category_summary
            .iter()
            .map(|(category, total)| CategorySlice {
                category: category.clone(),
                total: *total,
            })
            .collect();
        slices.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        slices
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
