use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use monezi_core::subscriptions::Subscription;
use monezi_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionUpdate,
};
use monezi_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::live::{spawn_live_query, ChangeFeed, Collection};
use crate::schema::transactions;
use crate::utils::{format_decimal, format_timestamp};

/// Repository for one database's transaction collections.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    changes: ChangeFeed,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, changes: ChangeFeed) -> Self {
        Self {
            pool,
            writer,
            changes,
        }
    }

    fn load_for_user(pool: &DbPool, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::date.desc(), transactions::id.asc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let row = TransactionDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: new_transaction.description,
            amount: format_decimal(new_transaction.amount),
            transaction_type: new_transaction.transaction_type.as_str().to_string(),
            category: new_transaction.category,
            date: format_timestamp(&new_transaction.date.unwrap_or_else(Utc::now)),
            updated_at: None,
        };

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let result_db = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Transactions, user_id);
        Ok(created)
    }

    async fn update(
        &self,
        user_id: &str,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction> {
        let row = TransactionDB::from_update(
            user_id,
            transaction_update,
            &format_timestamp(&Utc::now()),
        );
        let owner = user_id.to_string();

        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let target = transactions::table
                    .filter(transactions::id.eq(&row.id))
                    .filter(transactions::user_id.eq(&owner));
                diesel::update(target)
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                // Errors with NotFound when the record is missing or owned by someone else.
                let result_db = transactions::table
                    .filter(transactions::id.eq(&row.id))
                    .filter(transactions::user_id.eq(&owner))
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Transactions, user_id);
        Ok(updated)
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        let transaction_id = transaction_id.to_string();

        let deleted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await?;

        if deleted > 0 {
            self.changes.notify(Collection::Transactions, user_id);
        }
        Ok(deleted)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Self::load_for_user(&self.pool, user_id)
    }

    fn subscribe(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Subscription<Transaction>> {
        let pool = Arc::clone(&self.pool);
        let owner = user_id.to_string();
        spawn_live_query(
            &self.changes,
            Collection::Transactions,
            user_id,
            format!("transactions/{}", user_id),
            move || {
                let all = Self::load_for_user(&pool, &owner)?;
                Ok(filter.apply(&all))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::{Duration, TimeZone};
    use monezi_core::errors::{DatabaseError, Error};
    use monezi_core::subscriptions::SnapshotEvent;
    use monezi_core::transactions::TransactionType;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (TransactionRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let repo = TransactionRepository::new(Arc::clone(&pool), writer, ChangeFeed::default());
        (repo, temp_dir)
    }

    fn new_tx(
        description: &str,
        transaction_type: TransactionType,
        amount: rust_decimal::Decimal,
        category: &str,
        days_ago: i64,
    ) -> NewTransaction {
        let base = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        NewTransaction {
            description: description.to_string(),
            amount,
            transaction_type,
            category: Some(category.to_string()),
            date: Some(base - Duration::days(days_ago)),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_exact_amount() {
        let (repo, _dir) = create_test_repository().await;

        let created = repo
            .create(
                "u1",
                new_tx("Salário", TransactionType::Income, dec!(4321.09), "Salário", 0),
            )
            .await
            .expect("create");

        assert!(!created.id.is_empty());
        assert_eq!(created.user_id, "u1");
        assert_eq!(created.amount, dec!(4321.09));
        assert_eq!(repo.list("u1").expect("list"), vec![created]);
    }

    #[tokio::test]
    async fn test_create_without_date_uses_now() {
        let (repo, _dir) = create_test_repository().await;
        let before = Utc::now() - Duration::seconds(1);

        let mut input = new_tx("Café", TransactionType::Expense, dec!(7.5), "Lazer", 0);
        input.date = None;
        let created = repo.create("u1", input).await.expect("create");

        assert!(created.date >= before);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped_to_user() {
        let (repo, _dir) = create_test_repository().await;
        repo.create("u1", new_tx("old", TransactionType::Expense, dec!(1), "Lazer", 5))
            .await
            .expect("create");
        repo.create("u1", new_tx("new", TransactionType::Expense, dec!(2), "Lazer", 1))
            .await
            .expect("create");
        repo.create("u2", new_tx("other", TransactionType::Income, dec!(3), "Outros", 0))
            .await
            .expect("create");

        let listed = repo.list("u1").expect("list");
        let descriptions: Vec<_> = listed.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo
            .create("u1", new_tx("Mercado", TransactionType::Expense, dec!(80), "Alimentação", 2))
            .await
            .expect("create");

        let updated = repo
            .update(
                "u1",
                TransactionUpdate {
                    id: created.id.clone(),
                    description: "Feira".to_string(),
                    amount: dec!(95.40),
                    transaction_type: TransactionType::Expense,
                    category: Some("Alimentação".to_string()),
                    date: created.date,
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Feira");
        assert_eq!(updated.amount, dec!(95.4));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_of_other_users_record_is_not_found() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo
            .create("u1", new_tx("Mercado", TransactionType::Expense, dec!(80), "Alimentação", 2))
            .await
            .expect("create");

        let result = repo
            .update(
                "u2",
                TransactionUpdate {
                    id: created.id.clone(),
                    description: "hijack".to_string(),
                    amount: dec!(1),
                    transaction_type: TransactionType::Income,
                    category: None,
                    date: created.date,
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Database(DatabaseError::NotFound(_)))));
        assert_eq!(repo.list("u1").expect("list")[0].description, "Mercado");
    }

    #[tokio::test]
    async fn test_delete_returns_affected_rows() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo
            .create("u1", new_tx("Cinema", TransactionType::Expense, dec!(30), "Lazer", 0))
            .await
            .expect("create");

        assert_eq!(repo.delete("u2", &created.id).await.expect("delete"), 0);
        assert_eq!(repo.delete("u1", &created.id).await.expect("delete"), 1);
        assert_eq!(repo.delete("u1", &created.id).await.expect("delete"), 0);
        assert!(repo.list("u1").expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_emits_filtered_snapshots_after_writes() {
        let (repo, _dir) = create_test_repository().await;
        repo.create("u1", new_tx("Salário", TransactionType::Income, dec!(1000), "Salário", 3))
            .await
            .expect("create");

        let filter = TransactionFilter::all().with_type(TransactionType::Expense);
        let mut subscription = repo.subscribe("u1", filter).expect("subscribe");
        assert_eq!(subscription.next().await, Some(SnapshotEvent::Snapshot(vec![])));

        let expense = repo
            .create("u1", new_tx("Mercado", TransactionType::Expense, dec!(200), "Alimentação", 1))
            .await
            .expect("create");

        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![expense]))
        );
    }

    #[tokio::test]
    async fn test_subscribe_ignores_other_users_writes() {
        let (repo, _dir) = create_test_repository().await;
        let subscription = repo
            .subscribe("u1", TransactionFilter::all())
            .expect("subscribe");

        repo.create("u2", new_tx("other", TransactionType::Income, dec!(5), "Outros", 0))
            .await
            .expect("create");
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(subscription.latest(), Some(SnapshotEvent::Snapshot(vec![])));
    }
}
