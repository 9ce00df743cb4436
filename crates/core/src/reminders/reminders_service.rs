use async_trait::async_trait;
use chrono::{NaiveTime, Timelike};
use log::{debug, info, warn};
use std::sync::Arc;

use super::reminders_model::{NotificationRequest, ReminderOutcome, ReminderSettings};
use super::reminders_traits::{NotificationSchedulerTrait, ReminderServiceTrait};
use crate::constants::{
    DAILY_REMINDER_NOTIFICATION_ID, REMINDER_PERMISSION_NOTICE_KEY, REMINDER_SETTINGS_KEY,
};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::settings::{SettingsRepositoryTrait, SettingsService, SettingsServiceTrait};

const TEST_NOTIFICATION_DELAY_SECONDS: u64 = 3;

/// Persists the daily reminder preferences and keeps the scheduled
/// notification in sync with them.
pub struct ReminderService {
    settings: SettingsService,
    scheduler: Arc<dyn NotificationSchedulerTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ReminderService {
    pub fn new(
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
        scheduler: Arc<dyn NotificationSchedulerTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            settings: SettingsService::new(settings_repository),
            scheduler,
            event_sink,
        }
    }

    async fn store(&self, settings: ReminderSettings) -> Result<()> {
        self.settings.set_json(REMINDER_SETTINGS_KEY, &settings).await
    }

    async fn has_permission(&self) -> Result<bool> {
        if self.scheduler.permission_status().await?.is_granted() {
            return Ok(true);
        }
        Ok(self.scheduler.request_permission().await?.is_granted())
    }

    /// Handles a refused permission: the reminder is stored as disabled and
    /// the explanation is surfaced only the first time.
    async fn permission_refused(&self, settings: ReminderSettings) -> Result<ReminderOutcome> {
        let disabled = settings.disabled();
        self.store(disabled).await?;
        self.event_sink.emit(DomainEvent::reminder_settings_changed(
            disabled.is_enabled,
            disabled.time,
        ));

        if self.settings.is_flag_set(REMINDER_PERMISSION_NOTICE_KEY)? {
            debug!("Notification permission still denied; reminder stays disabled");
            return Ok(ReminderOutcome::Disabled);
        }
        self.settings
            .set_flag(REMINDER_PERMISSION_NOTICE_KEY, true)
            .await?;
        warn!("Notification permission denied; daily reminder disabled");
        Err(Error::PermissionDenied(
            "notification permission was not granted".to_string(),
        ))
    }
}

#[async_trait]
impl ReminderServiceTrait for ReminderService {
    fn load_settings(&self) -> Result<ReminderSettings> {
        Ok(self
            .settings
            .get_json::<ReminderSettings>(REMINDER_SETTINGS_KEY)?
            .unwrap_or_default())
    }

    async fn save_and_schedule(&self, enabled: bool, time: NaiveTime) -> Result<ReminderOutcome> {
        let settings = ReminderSettings::new(enabled, time);
        self.store(settings).await?;
        self.scheduler.cancel(DAILY_REMINDER_NOTIFICATION_ID).await?;

        if !enabled {
            info!("Daily reminder cancelled");
            self.event_sink
                .emit(DomainEvent::reminder_settings_changed(false, time));
            return Ok(ReminderOutcome::Disabled);
        }

        if !self.has_permission().await? {
            return self.permission_refused(settings).await;
        }

        self.scheduler
            .schedule(NotificationRequest::daily_reminder(time))
            .await?;
        info!(
            "Daily reminder scheduled for {:02}:{:02}",
            time.hour(),
            time.minute()
        );
        self.event_sink
            .emit(DomainEvent::reminder_settings_changed(true, time));
        Ok(ReminderOutcome::Scheduled {
            hour: time.hour(),
            minute: time.minute(),
        })
    }

    async fn set_enabled(&self, enabled: bool) -> Result<ReminderOutcome> {
        let current = self.load_settings()?;
        self.save_and_schedule(enabled, current.time).await
    }

    async fn set_time(&self, time: NaiveTime) -> Result<ReminderOutcome> {
        let current = self.load_settings()?;
        if current.is_enabled {
            return self.save_and_schedule(true, time).await;
        }
        self.store(ReminderSettings::new(false, time)).await?;
        Ok(ReminderOutcome::Disabled)
    }

    async fn send_test_notification(&self) -> Result<String> {
        if !self.has_permission().await? {
            return Err(Error::PermissionDenied(
                "notification permission was not granted".to_string(),
            ));
        }
        self.scheduler
            .schedule(NotificationRequest::test_notification(
                TEST_NOTIFICATION_DELAY_SECONDS,
            ))
            .await
    }
}
