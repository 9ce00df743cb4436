//! Domain event types.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after the backend confirmed a write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Transactions were created, updated, or deleted.
    TransactionsChanged {
        user_id: String,
        transaction_ids: Vec<String>,
    },

    /// Goals were created, updated, or deleted.
    GoalsChanged {
        user_id: String,
        goal_ids: Vec<String>,
    },

    /// A user profile was created or updated.
    ProfileChanged { user_id: String },

    /// Daily reminder preferences were saved.
    ReminderSettingsChanged { is_enabled: bool, time: NaiveTime },
}

impl DomainEvent {
    /// Creates a TransactionsChanged event.
    pub fn transactions_changed(user_id: &str, transaction_ids: Vec<String>) -> Self {
        Self::TransactionsChanged {
            user_id: user_id.to_string(),
            transaction_ids,
        }
    }

    /// Creates a GoalsChanged event.
    pub fn goals_changed(user_id: &str, goal_ids: Vec<String>) -> Self {
        Self::GoalsChanged {
            user_id: user_id.to_string(),
            goal_ids,
        }
    }

    /// Creates a ProfileChanged event.
    pub fn profile_changed(user_id: &str) -> Self {
        Self::ProfileChanged {
            user_id: user_id.to_string(),
        }
    }

    /// Creates a ReminderSettingsChanged event.
    pub fn reminder_settings_changed(is_enabled: bool, time: NaiveTime) -> Self {
        Self::ReminderSettingsChanged { is_enabled, time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::transactions_changed("user-1", vec!["tx-1".to_string()]);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("transactions_changed"));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        match deserialized {
            DomainEvent::TransactionsChanged {
                user_id,
                transaction_ids,
            } => {
                assert_eq!(user_id, "user-1");
                assert_eq!(transaction_ids, vec!["tx-1"]);
            }
            _ => panic!("Expected TransactionsChanged"),
        }
    }

    #[test]
    fn test_reminder_event_serialization() {
        let time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        let event = DomainEvent::reminder_settings_changed(true, time);

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
