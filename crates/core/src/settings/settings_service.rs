use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Get a single setting value by key. Returns None if not found.
    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;

    /// Set a single setting value by key.
    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()>;

    /// Reads a boolean flag; missing or unparsable values are `false`.
    fn is_flag_set(&self, key: &str) -> Result<bool>;

    async fn set_flag(&self, key: &str, value: bool) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        self.settings_repository.update_setting(key, value).await
    }

    fn is_flag_set(&self, key: &str) -> Result<bool> {
        Ok(self
            .get_setting_value(key)?
            .map(|value| value.parse().unwrap_or(false))
            .unwrap_or(false))
    }

    async fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.set_setting_value(key, &value.to_string()).await
    }
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }

    /// Reads a JSON-encoded value. Missing keys and values that no longer
    /// decode both yield `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_setting_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable setting '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_setting_value(key, &raw).await
    }
}
