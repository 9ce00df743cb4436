//! Database model for user profiles.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use monezi_core::users::UserProfile;

use crate::utils::{format_timestamp, parse_timestamp};

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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub created_at: String,
}

impl From<UserProfile> for UserDB {
    fn from(profile: UserProfile) -> Self {
        Self {
            created_at: format_timestamp(&profile.created_at),
            id: profile.id,
            name: profile.name,
            email: profile.email,
            photo_url: profile.photo_url,
        }
    }
}

impl From<UserDB> for UserProfile {
    fn from(db: UserDB) -> Self {
        Self {
            created_at: parse_timestamp(&db.created_at, "created_at"),
            id: db.id,
            name: db.name,
            email: db.email,
            photo_url: db.photo_url,
        }
    }
}
