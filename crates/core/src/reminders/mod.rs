//! Daily reminder preferences and notification scheduling.

mod reminders_model;
mod reminders_service;
mod reminders_traits;

#[cfg(test)]
mod reminders_service_tests;

pub use reminders_model::{
    NotificationRequest, NotificationTrigger, PermissionStatus, ReminderOutcome, ReminderSettings,
};
pub use reminders_service::ReminderService;
pub use reminders_traits::{NotificationSchedulerTrait, ReminderServiceTrait};
