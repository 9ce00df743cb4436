use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info};
use std::sync::Arc;

use super::users_model::{
    validate_email, LoginInput, ProfileInput, RegistrationInput, Session, UserProfile,
};
use super::users_traits::{IdentityProviderTrait, UserProfileRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::subscriptions::Subscription;

/// Service for sign-up, sign-in and profile management.
pub struct UserService {
    identity: Arc<dyn IdentityProviderTrait>,
    profiles: Arc<dyn UserProfileRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl UserService {
    pub fn new(
        identity: Arc<dyn IdentityProviderTrait>,
        profiles: Arc<dyn UserProfileRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            identity,
            profiles,
            event_sink,
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn current_session(&self) -> Result<Session> {
        self.identity
            .current_identity()
            .map(Session::new)
            .ok_or(Error::NotAuthenticated)
    }

    async fn register(&self, input: RegistrationInput) -> Result<Session> {
        let (name, email) = input.validate()?;

        let user_id = self.identity.register(&email, &input.password).await?;
        info!("Registered identity {}", user_id);

        let profile = UserProfile {
            id: user_id.clone(),
            name,
            email,
            photo_url: None,
            created_at: Utc::now(),
        };
        self.profiles.create(profile).await.map_err(|e| {
            error!("Failed to create profile for {}: {}", user_id, e);
            Error::remote_write("create your profile", e)
        })?;

        self.event_sink.emit(DomainEvent::profile_changed(&user_id));
        Ok(Session::new(user_id))
    }

    async fn log_in(&self, input: LoginInput) -> Result<Session> {
        let email = input.validate()?;
        let user_id = self.identity.sign_in(&email, &input.password).await?;
        debug!("Signed in as {}", user_id);
        Ok(Session::new(user_id))
    }

    async fn log_out(&self) -> Result<()> {
        self.identity.sign_out().await
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let email = validate_email(email)?;
        self.identity.send_password_reset(&email).await
    }

    fn get_profile(&self, session: &Session) -> Result<Option<UserProfile>> {
        self.profiles.get(session.user_id())
    }

    async fn update_profile(&self, session: &Session, input: ProfileInput) -> Result<UserProfile> {
        let update = input.validate()?;
        let profile = self
            .profiles
            .update(session.user_id(), update)
            .await
            .map_err(|e| {
                error!("Failed to update profile {}: {}", session.user_id(), e);
                Error::remote_write("update your profile", e)
            })?;
        self.event_sink
            .emit(DomainEvent::profile_changed(session.user_id()));
        Ok(profile)
    }

    fn subscribe_profile(&self, session: &Session) -> Result<Subscription<UserProfile>> {
        self.profiles.subscribe(session.user_id())
    }
}
