use async_trait::async_trait;
use chrono::NaiveTime;

use super::reminders_model::{
    NotificationRequest, PermissionStatus, ReminderOutcome, ReminderSettings,
};
use crate::errors::Result;

/// Local notification scheduling provided by the platform.
#[async_trait]
pub trait NotificationSchedulerTrait: Send + Sync {
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// Prompts the user for permission and returns the resulting status.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Schedules a notification and returns its identifier. Scheduling with an
    /// identifier that already exists replaces the earlier notification.
    async fn schedule(&self, request: NotificationRequest) -> Result<String>;

    /// Cancels a scheduled notification. Unknown identifiers are ignored.
    async fn cancel(&self, identifier: &str) -> Result<()>;
}

#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    /// Stored preferences, or the defaults when missing or unreadable.
    fn load_settings(&self) -> Result<ReminderSettings>;

    async fn save_and_schedule(&self, enabled: bool, time: NaiveTime) -> Result<ReminderOutcome>;

    async fn set_enabled(&self, enabled: bool) -> Result<ReminderOutcome>;

    /// Changes the reminder time, rescheduling only when the reminder is on.
    async fn set_time(&self, time: NaiveTime) -> Result<ReminderOutcome>;

    async fn send_test_notification(&self) -> Result<String>;
}
