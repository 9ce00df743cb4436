use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use monezi_core::goals::{Goal, GoalRecord, GoalRepositoryTrait, NewGoal};
use monezi_core::subscriptions::Subscription;
use monezi_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::live::{spawn_live_query, ChangeFeed, Collection};
use crate::schema::goals;
use crate::utils::format_timestamp;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    changes: ChangeFeed,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, changes: ChangeFeed) -> Self {
        GoalRepository {
            pool,
            writer,
            changes,
        }
    }

    fn load_goals_impl(pool: &DbPool, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(pool)?;
        let goals_db = goals::table
            .filter(goals::user_id.eq(user_id))
            .order((goals::created_at.desc(), goals::id.asc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn create(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal::restore(GoalRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            created_at: Utc::now(),
            updated_at: None,
        });
        let new_goal_db = GoalDB::from(&goal);

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let result_db = diesel::insert_into(goals::table)
                    .values(&new_goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Goals, user_id);
        Ok(created)
    }

    async fn update(&self, user_id: &str, goal: Goal) -> Result<Goal> {
        let mut goal_db = GoalDB::from(&goal);
        goal_db.user_id = user_id.to_string();
        goal_db.updated_at = Some(format_timestamp(&Utc::now()));

        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let owned = goals::table
                    .filter(goals::id.eq(&goal_db.id))
                    .filter(goals::user_id.eq(&goal_db.user_id));
                diesel::update(owned)
                    .set(&goal_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = goals::table
                    .filter(goals::id.eq(&goal_db.id))
                    .filter(goals::user_id.eq(&goal_db.user_id))
                    .select(GoalDB::as_select())
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Goals, user_id);
        Ok(updated)
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        let goal_id_to_delete = goal_id.to_string();

        let deleted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id_to_delete))
                        .filter(goals::user_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await?;

        if deleted > 0 {
            self.changes.notify(Collection::Goals, user_id);
        }
        Ok(deleted)
    }

    fn get(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goal_db = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(goal_db.map(Goal::from))
    }

    fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        Self::load_goals_impl(&self.pool, user_id)
    }

    fn subscribe(&self, user_id: &str) -> Result<Subscription<Goal>> {
        let pool = Arc::clone(&self.pool);
        let owner = user_id.to_string();
        spawn_live_query(
            &self.changes,
            Collection::Goals,
            user_id,
            format!("goals/{}", user_id),
            move || Self::load_goals_impl(&pool, &owner),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use monezi_core::errors::{DatabaseError, Error};
    use monezi_core::subscriptions::SnapshotEvent;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (GoalRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let repo = GoalRepository::new(Arc::clone(&pool), writer, ChangeFeed::default());
        (repo, temp_dir)
    }

    fn new_goal(name: &str, current: rust_decimal::Decimal, target: rust_decimal::Decimal) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            description: Some("Guardar todo mês".to_string()),
            target_amount: target,
            current_amount: current,
            target_date: NaiveDate::from_ymd_opt(2030, 12, 31),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo
            .create("u1", new_goal("Reserva", dec!(250), dec!(1000)))
            .await
            .expect("create");

        assert!(!created.is_achieved());
        let fetched = repo.get("u1", &created.id).expect("get");
        assert_eq!(fetched, Some(created.clone()));
        assert_eq!(repo.get("u2", &created.id).expect("get"), None);
    }

    #[tokio::test]
    async fn test_update_recomputes_achieved() {
        let (repo, _dir) = create_test_repository().await;
        let mut goal = repo
            .create("u1", new_goal("Notebook", dec!(0), dec!(3000)))
            .await
            .expect("create");

        goal.set_current_amount(dec!(3000));
        let updated = repo.update("u1", goal).await.expect("update");

        assert!(updated.is_achieved());
        assert_eq!(updated.current_amount(), dec!(3000));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_goal_is_not_found() {
        let (repo, _dir) = create_test_repository().await;
        let goal = repo
            .create("u1", new_goal("Notebook", dec!(0), dec!(3000)))
            .await
            .expect("create");

        let result = repo.update("u2", goal).await;
        assert!(matches!(result, Err(Error::Database(DatabaseError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_list_newest_first_and_delete() {
        let (repo, _dir) = create_test_repository().await;
        let first = repo
            .create("u1", new_goal("Primeira", dec!(0), dec!(100)))
            .await
            .expect("create");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo
            .create("u1", new_goal("Segunda", dec!(0), dec!(100)))
            .await
            .expect("create");

        let names: Vec<_> = repo
            .list("u1")
            .expect("list")
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Segunda", "Primeira"]);

        assert_eq!(repo.delete("u1", &first.id).await.expect("delete"), 1);
        assert_eq!(repo.delete("u1", &first.id).await.expect("delete"), 0);
        assert_eq!(repo.list("u1").expect("list"), vec![second]);
    }

    #[tokio::test]
    async fn test_subscribe_sees_new_goals() {
        let (repo, _dir) = create_test_repository().await;
        let mut subscription = repo.subscribe("u1").expect("subscribe");
        assert_eq!(subscription.next().await, Some(SnapshotEvent::Snapshot(vec![])));

        let created = repo
            .create("u1", new_goal("Carro", dec!(10), dec!(20000)))
            .await
            .expect("create");

        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![created]))
        );
    }
}
