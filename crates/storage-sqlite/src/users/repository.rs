use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use monezi_core::subscriptions::Subscription;
use monezi_core::users::{ProfileInput, UserProfile, UserProfileRepositoryTrait};
use monezi_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::live::{spawn_live_query, ChangeFeed, Collection};
use crate::schema::users;

/// Profile documents keyed by the identity provider's user ID.
pub struct UserProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    changes: ChangeFeed,
}

impl UserProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, changes: ChangeFeed) -> Self {
        Self {
            pool,
            writer,
            changes,
        }
    }

    fn load_profile(pool: &DbPool, user_id: &str) -> Result<Option<UserProfile>> {
        let mut conn = get_connection(pool)?;
        let row = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(UserProfile::from))
    }
}

#[async_trait]
impl UserProfileRepositoryTrait for UserProfileRepository {
    async fn create(&self, profile: UserProfile) -> Result<UserProfile> {
        let user_id = profile.id.clone();
        let row = UserDB::from(profile);

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                let result_db = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(UserProfile::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Users, &user_id);
        Ok(created)
    }

    async fn update(&self, user_id: &str, update: ProfileInput) -> Result<UserProfile> {
        let target_id = user_id.to_string();

        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                diesel::update(users::table.find(&target_id))
                    .set((
                        users::name.eq(update.name),
                        users::email.eq(update.email),
                        users::photo_url.eq(update.photo_url),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = users::table
                    .find(&target_id)
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(UserProfile::from(result_db))
            })
            .await?;

        self.changes.notify(Collection::Users, user_id);
        Ok(updated)
    }

    fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Self::load_profile(&self.pool, user_id)
    }

    fn subscribe(&self, user_id: &str) -> Result<Subscription<UserProfile>> {
        let pool = Arc::clone(&self.pool);
        let owner = user_id.to_string();
        spawn_live_query(
            &self.changes,
            Collection::Users,
            user_id,
            format!("users/{}", user_id),
            move || Ok(Self::load_profile(&pool, &owner)?.into_iter().collect()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::{TimeZone, Utc};
    use monezi_core::errors::{DatabaseError, Error};
    use monezi_core::subscriptions::SnapshotEvent;
    use tempfile::tempdir;

    async fn create_test_repository() -> (UserProfileRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let repo = UserProfileRepository::new(Arc::clone(&pool), writer, ChangeFeed::default());
        (repo, temp_dir)
    }

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            photo_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo.create(profile("u1")).await.expect("create");

        assert_eq!(created, profile("u1"));
        assert_eq!(repo.get("u1").expect("get"), Some(profile("u1")));
        assert_eq!(repo.get("u2").expect("get"), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_rejected() {
        let (repo, _dir) = create_test_repository().await;
        repo.create(profile("u1")).await.expect("create");

        let result = repo.create(profile("u1")).await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::UniqueViolation(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_not_found() {
        let (repo, _dir) = create_test_repository().await;
        let result = repo
            .update(
                "ghost",
                ProfileInput {
                    name: "Ghost".to_string(),
                    email: "ghost@example.com".to_string(),
                    photo_url: None,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Database(DatabaseError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_subscribe_follows_updates() {
        let (repo, _dir) = create_test_repository().await;
        repo.create(profile("u1")).await.expect("create");
        let mut subscription = repo.subscribe("u1").expect("subscribe");
        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![profile("u1")]))
        );

        let updated = repo
            .update(
                "u1",
                ProfileInput {
                    name: "Ana S.".to_string(),
                    email: "ana.s@example.com".to_string(),
                    photo_url: Some("https://example.com/ana.png".to_string()),
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.name, "Ana S.");
        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![updated]))
        );
    }
}
