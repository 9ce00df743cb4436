//! Daily reminder models.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{DAILY_REMINDER_NOTIFICATION_ID, DEFAULT_REMINDER_TIME};

/// Persisted daily reminder preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub is_enabled: bool,
    pub time: NaiveTime,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        let (hour, minute) = DEFAULT_REMINDER_TIME;
        Self {
            is_enabled: false,
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl ReminderSettings {
    pub fn new(is_enabled: bool, time: NaiveTime) -> Self {
        Self { is_enabled, time }
    }

    /// The same preferences with the reminder switched off.
    pub fn disabled(self) -> Self {
        Self {
            is_enabled: false,
            ..self
        }
    }
}

/// What `save_and_schedule` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReminderOutcome {
    Scheduled { hour: u32, minute: u32 },
    Disabled,
}

impl ReminderOutcome {
    /// Confirmation text shown after saving.
    pub fn message(&self) -> String {
        match self {
            ReminderOutcome::Scheduled { hour, minute } => {
                format!("You will be reminded every day at {:02}:{:02}.", hour, minute)
            }
            ReminderOutcome::Disabled => "You will no longer receive daily reminders.".to_string(),
        }
    }
}

/// Local notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// Fires every day at the given local time.
    Daily { hour: u32, minute: u32 },
    /// Fires once after a delay.
    AfterSeconds { seconds: u64 },
}

/// A local notification to hand to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Stable identifier; `None` lets the scheduler pick one.
    pub identifier: Option<String>,
    pub title: String,
    pub body: String,
    pub sound: bool,
    pub trigger: NotificationTrigger,
}

impl NotificationRequest {
    /// The repeating daily reminder to record the day's transactions.
    pub fn daily_reminder(time: NaiveTime) -> Self {
        Self {
            identifier: Some(DAILY_REMINDER_NOTIFICATION_ID.to_string()),
            title: "MONEZI - Daily reminder".to_string(),
            body: "Don't forget to record today's income and expenses!".to_string(),
            sound: true,
            trigger: NotificationTrigger::Daily {
                hour: time.hour(),
                minute: time.minute(),
            },
        }
    }

    /// One-off notification used to check that delivery works.
    pub fn test_notification(delay_seconds: u64) -> Self {
        Self {
            identifier: None,
            title: "Test notification".to_string(),
            body: "Notifications are working.".to_string(),
            sound: true,
            trigger: NotificationTrigger::AfterSeconds {
                seconds: delay_seconds,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ReminderSettings::default();
        assert!(!settings.is_enabled);
        assert_eq!(settings.time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    }

    #[test]
    fn test_settings_json_shape() {
        let settings = ReminderSettings::new(true, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"isEnabled":true,"time":"08:30:00"}"#);
        assert_eq!(
            serde_json::from_str::<ReminderSettings>(&json).unwrap(),
            settings
        );
    }

    #[test]
    fn test_daily_reminder_trigger() {
        let request = NotificationRequest::daily_reminder(NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(
            request.identifier.as_deref(),
            Some(DAILY_REMINDER_NOTIFICATION_ID)
        );
        assert_eq!(
            request.trigger,
            NotificationTrigger::Daily { hour: 7, minute: 5 }
        );
    }

    #[test]
    fn test_outcome_message_pads_time() {
        assert_eq!(
            ReminderOutcome::Scheduled { hour: 7, minute: 5 }.message(),
            "You will be reminded every day at 07:05."
        );
    }
}
