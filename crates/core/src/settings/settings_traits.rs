//! Repository trait for the local key-value settings store.

use async_trait::async_trait;

use crate::errors::Result;

/// String-keyed settings persisted on the device.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key.
    ///
    /// A missing key is reported as `DatabaseError::NotFound`.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Insert or replace a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
