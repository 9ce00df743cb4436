//! Database models for goals.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use monezi_core::goals::{Goal, GoalRecord};

use crate::utils::{
    format_date, format_decimal, format_timestamp, parse_date, parse_decimal, parse_timestamp,
};

/// Database model for goals
///
/// `is_achieved` is written for queries and reporting only; loading always
/// recomputes it from the amounts.
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: Option<String>,
    pub is_achieved: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<&Goal> for GoalDB {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            user_id: goal.user_id.clone(),
            name: goal.name.clone(),
            description: goal.description.clone(),
            target_amount: format_decimal(goal.target_amount()),
            current_amount: format_decimal(goal.current_amount()),
            target_date: goal.target_date.as_ref().map(format_date),
            is_achieved: goal.is_achieved(),
            created_at: format_timestamp(&goal.created_at),
            updated_at: goal.updated_at.as_ref().map(format_timestamp),
        }
    }
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Goal::restore(GoalRecord {
            target_amount: parse_decimal(&db.target_amount, "target_amount"),
            current_amount: parse_decimal(&db.current_amount, "current_amount"),
            target_date: db
                .target_date
                .as_deref()
                .and_then(|value| parse_date(value, "target_date")),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: db
                .updated_at
                .as_deref()
                .map(|value| parse_timestamp(value, "updated_at")),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
        })
    }
}
