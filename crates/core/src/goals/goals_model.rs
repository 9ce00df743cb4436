//! Goals domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::goals_progress::GoalProgress;
use crate::errors::ValidationError;
use crate::money::{normalize_amount, normalize_non_negative_amount};
use crate::Result;

/// Domain model representing a savings goal.
///
/// `is_achieved` is derived from the two amounts and recomputed on every
/// construction or amount change; it can't be set on its own. Deserialization
/// goes through [`GoalRecord`] so a stored flag is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "GoalRecord")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    target_amount: Decimal,
    current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    is_achieved: bool,
}

/// Goal fields as persisted by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal::restore(record)
    }
}

impl Goal {
    /// Builds a goal from stored fields, recomputing the achieved flag.
    pub fn restore(record: GoalRecord) -> Self {
        let mut goal = Goal {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            description: record.description,
            target_amount: record.target_amount,
            current_amount: record.current_amount,
            target_date: record.target_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_achieved: false,
        };
        goal.recompute();
        goal
    }

    pub fn target_amount(&self) -> Decimal {
        self.target_amount
    }

    pub fn current_amount(&self) -> Decimal {
        self.current_amount
    }

    pub fn is_achieved(&self) -> bool {
        self.is_achieved
    }

    pub fn progress(&self) -> GoalProgress {
        GoalProgress::calculate(self.current_amount, self.target_amount)
    }

    /// Replaces both amounts and recomputes the achieved flag.
    pub fn set_amounts(&mut self, current_amount: Decimal, target_amount: Decimal) {
        self.current_amount = current_amount;
        self.target_amount = target_amount;
        self.recompute();
    }

    /// Replaces the saved amount, e.g. when the user records a deposit.
    pub fn set_current_amount(&mut self, current_amount: Decimal) {
        self.set_amounts(current_amount, self.target_amount);
    }

    /// Applies a full edit. Identity and creation time are kept.
    pub fn apply(&mut self, update: GoalUpdate) {
        self.name = update.name;
        self.description = update.description;
        self.target_date = update.target_date;
        self.set_amounts(update.current_amount, update.target_amount);
    }

    pub fn to_record(&self) -> GoalRecord {
        GoalRecord {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            target_date: self.target_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn recompute(&mut self) {
        self.is_achieved = self.progress().is_achieved;
    }
}

/// Input model for creating a new goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

/// Full edit of an existing goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

impl GoalUpdate {
    /// The target date is only checked against `today` when it differs from
    /// `previous_target_date`, so a goal whose date has passed can still be
    /// edited.
    pub fn check_target_date(
        &self,
        previous_target_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<()> {
        if self.target_date == previous_target_date {
            return Ok(());
        }
        check_target_date(self.target_date, today)
    }
}

/// Raw values from the add/update goal forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub description: String,
    pub target_date: Option<NaiveDate>,
}

type ValidatedGoal = (String, Option<String>, Decimal, Decimal);

impl GoalInput {
    pub fn new(name: &str, target_amount: &str) -> Self {
        Self {
            name: name.to_string(),
            target_amount: target_amount.to_string(),
            ..Default::default()
        }
    }

    pub fn with_current_amount(mut self, current_amount: &str) -> Self {
        self.current_amount = current_amount.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Validates the form for creating a goal. The target date may not be
    /// earlier than `today`.
    pub fn validate_new(&self, today: NaiveDate) -> Result<NewGoal> {
        let (name, description, target_amount, current_amount) = self.validate_common()?;
        check_target_date(self.target_date, today)?;
        Ok(NewGoal {
            name,
            description,
            target_amount,
            current_amount,
            target_date: self.target_date,
        })
    }

    /// Validates the form for editing goal `id`.
    ///
    /// Needs no stored state, so it runs before the goal is read. The target
    /// date rule is applied afterwards with [`GoalUpdate::check_target_date`].
    pub fn validate_update(&self, id: &str) -> Result<GoalUpdate> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingField("Goal ID".to_string()).into());
        }
        let (name, description, target_amount, current_amount) = self.validate_common()?;
        Ok(GoalUpdate {
            id: id.to_string(),
            name,
            description,
            target_amount,
            current_amount,
            target_date: self.target_date,
        })
    }

    fn validate_common(&self) -> Result<ValidatedGoal> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("Name".to_string()).into());
        }
        let target_amount = normalize_amount(&self.target_amount, "Target amount")?;
        let current_amount = normalize_non_negative_amount(&self.current_amount, "Current amount")?;
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok((name.to_string(), description, target_amount, current_amount))
    }
}

fn check_target_date(target_date: Option<NaiveDate>, today: NaiveDate) -> Result<()> {
    match target_date {
        Some(date) if date < today => Err(ValidationError::InvalidInput(
            "Target date cannot be in the past".to_string(),
        )
        .into()),
        _ => Ok(()),
    }
}
