#[cfg(test)]
mod tests {
    use crate::constants::{DAILY_REMINDER_NOTIFICATION_ID, REMINDER_SETTINGS_KEY};
    use crate::errors::{DatabaseError, Error, Result};
    use crate::events::MockDomainEventSink;
    use crate::reminders::{
        NotificationRequest, NotificationSchedulerTrait, NotificationTrigger, PermissionStatus,
        ReminderOutcome, ReminderService, ReminderServiceTrait, ReminderSettings,
    };
    use crate::settings::SettingsRepositoryTrait;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock SettingsRepository ---
    #[derive(Clone, Default)]
    struct MockSettingsRepository {
        values: Arc<Mutex<HashMap<String, String>>>,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_setting(&self, setting_key: &str) -> Result<String> {
            self.values
                .lock()
                .unwrap()
                .get(setting_key)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(setting_key.to_string())))
        }

        async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(setting_key.to_string(), setting_value.to_string());
            Ok(())
        }
    }

    // --- Mock NotificationScheduler ---
    #[derive(Clone)]
    struct MockScheduler {
        status: Arc<Mutex<PermissionStatus>>,
        grant_on_request: bool,
        scheduled: Arc<Mutex<Vec<NotificationRequest>>>,
        cancelled: Arc<Mutex<Vec<String>>>,
    }

    impl MockScheduler {
        fn new(status: PermissionStatus, grant_on_request: bool) -> Self {
            Self {
                status: Arc::new(Mutex::new(status)),
                grant_on_request,
                scheduled: Arc::new(Mutex::new(Vec::new())),
                cancelled: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl NotificationSchedulerTrait for MockScheduler {
        async fn permission_status(&self) -> Result<PermissionStatus> {
            Ok(*self.status.lock().unwrap())
        }

        async fn request_permission(&self) -> Result<PermissionStatus> {
            let mut status = self.status.lock().unwrap();
            *status = if self.grant_on_request {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
            Ok(*status)
        }

        async fn schedule(&self, request: NotificationRequest) -> Result<String> {
            let id = request
                .identifier
                .clone()
                .unwrap_or_else(|| "generated-id".to_string());
            let mut scheduled = self.scheduled.lock().unwrap();
            scheduled.retain(|r| r.identifier.as_deref() != Some(id.as_str()));
            scheduled.push(request);
            Ok(id)
        }

        async fn cancel(&self, identifier: &str) -> Result<()> {
            self.cancelled.lock().unwrap().push(identifier.to_string());
            self.scheduled
                .lock()
                .unwrap()
                .retain(|r| r.identifier.as_deref() != Some(identifier));
            Ok(())
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn setup(
        scheduler: MockScheduler,
    ) -> (ReminderService, MockSettingsRepository, MockDomainEventSink) {
        let repo = MockSettingsRepository::default();
        let sink = MockDomainEventSink::new();
        let service = ReminderService::new(
            Arc::new(repo.clone()),
            Arc::new(scheduler),
            Arc::new(sink.clone()),
        );
        (service, repo, sink)
    }

    #[tokio::test]
    async fn test_defaults_when_nothing_stored() {
        let (service, repo, _sink) = setup(MockScheduler::new(PermissionStatus::Granted, true));
        assert_eq!(service.load_settings().unwrap(), ReminderSettings::default());

        repo.values
            .lock()
            .unwrap()
            .insert(REMINDER_SETTINGS_KEY.to_string(), "not json".to_string());
        assert_eq!(service.load_settings().unwrap(), ReminderSettings::default());
    }

    #[tokio::test]
    async fn test_enable_schedules_daily_notification() {
        let scheduler = MockScheduler::new(PermissionStatus::Granted, true);
        let (service, _repo, sink) = setup(scheduler.clone());

        let outcome = service.save_and_schedule(true, at(21, 15)).await.unwrap();

        assert_eq!(outcome, ReminderOutcome::Scheduled { hour: 21, minute: 15 });
        assert_eq!(
            service.load_settings().unwrap(),
            ReminderSettings::new(true, at(21, 15))
        );
        let scheduled = scheduler.scheduled.lock().unwrap().clone();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(
            scheduled[0].trigger,
            NotificationTrigger::Daily {
                hour: 21,
                minute: 15
            }
        );
        assert_eq!(
            scheduler.cancelled.lock().unwrap().clone(),
            vec![DAILY_REMINDER_NOTIFICATION_ID.to_string()]
        );
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_previous_reminder() {
        let scheduler = MockScheduler::new(PermissionStatus::Granted, true);
        let (service, _repo, _sink) = setup(scheduler.clone());

        service.save_and_schedule(true, at(19, 0)).await.unwrap();
        service.set_time(at(7, 30)).await.unwrap();

        let scheduled = scheduler.scheduled.lock().unwrap().clone();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(
            scheduled[0].trigger,
            NotificationTrigger::Daily {
                hour: 7,
                minute: 30
            }
        );
    }

    #[tokio::test]
    async fn test_disable_cancels_reminder() {
        let scheduler = MockScheduler::new(PermissionStatus::Granted, true);
        let (service, _repo, _sink) = setup(scheduler.clone());
        service.save_and_schedule(true, at(19, 0)).await.unwrap();

        let outcome = service.set_enabled(false).await.unwrap();

        assert_eq!(outcome, ReminderOutcome::Disabled);
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
        assert!(!service.load_settings().unwrap().is_enabled);
    }

    #[tokio::test]
    async fn test_set_time_while_disabled_only_persists() {
        let scheduler = MockScheduler::new(PermissionStatus::Granted, true);
        let (service, _repo, _sink) = setup(scheduler.clone());

        let outcome = service.set_time(at(6, 45)).await.unwrap();

        assert_eq!(outcome, ReminderOutcome::Disabled);
        assert_eq!(service.load_settings().unwrap().time, at(6, 45));
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
        assert!(scheduler.cancelled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undetermined_permission_is_requested() {
        let scheduler = MockScheduler::new(PermissionStatus::Undetermined, true);
        let (service, _repo, _sink) = setup(scheduler.clone());

        let outcome = service.set_enabled(true).await.unwrap();

        assert_eq!(outcome, ReminderOutcome::Scheduled { hour: 19, minute: 0 });
        assert_eq!(*scheduler.status.lock().unwrap(), PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn test_denied_permission_alerts_once_then_silently_disables() {
        let scheduler = MockScheduler::new(PermissionStatus::Denied, false);
        let (service, _repo, _sink) = setup(scheduler.clone());

        let first = service.save_and_schedule(true, at(20, 0)).await;
        assert!(matches!(first, Err(Error::PermissionDenied(_))));
        assert_eq!(
            service.load_settings().unwrap(),
            ReminderSettings::new(false, at(20, 0))
        );

        let second = service.save_and_schedule(true, at(20, 0)).await.unwrap();
        assert_eq!(second, ReminderOutcome::Disabled);
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_test_notification() {
        let scheduler = MockScheduler::new(PermissionStatus::Granted, true);
        let (service, _repo, _sink) = setup(scheduler.clone());
        assert_eq!(service.send_test_notification().await.unwrap(), "generated-id");
        assert_eq!(
            scheduler.scheduled.lock().unwrap()[0].trigger,
            NotificationTrigger::AfterSeconds { seconds: 3 }
        );

        let denied = MockScheduler::new(PermissionStatus::Denied, false);
        let (service, _repo, _sink) = setup(denied);
        assert!(matches!(
            service.send_test_notification().await,
            Err(Error::PermissionDenied(_))
        ));
    }
}
