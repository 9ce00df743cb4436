//! Identity provider, profile repository and user service traits.

use async_trait::async_trait;

use super::users_model::{LoginInput, ProfileInput, RegistrationInput, Session, UserProfile};
use crate::errors::Result;
use crate::subscriptions::Subscription;

/// Contract of the external identity/credential provider.
///
/// Rejections are reported as [`crate::errors::AuthError`].
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// The user ID of the currently signed-in identity, if any.
    fn current_identity(&self) -> Option<String>;

    /// Signs in and returns the user ID.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String>;

    /// Creates a new identity, signs it in and returns its user ID.
    async fn register(&self, email: &str, password: &str) -> Result<String>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

/// Trait defining the contract for the user profile documents.
#[async_trait]
pub trait UserProfileRepositoryTrait: Send + Sync {
    /// Writes the profile document keyed by `profile.id`.
    async fn create(&self, profile: UserProfile) -> Result<UserProfile>;

    async fn update(&self, user_id: &str, update: ProfileInput) -> Result<UserProfile>;

    fn get(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Live query on the profile document. Emissions hold zero or one profile.
    fn subscribe(&self, user_id: &str) -> Result<Subscription<UserProfile>>;
}

/// Trait defining the contract for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Resolves the session of the currently signed-in identity.
    fn current_session(&self) -> Result<Session>;

    async fn register(&self, input: RegistrationInput) -> Result<Session>;

    async fn log_in(&self, input: LoginInput) -> Result<Session>;

    async fn log_out(&self) -> Result<()>;

    async fn request_password_reset(&self, email: &str) -> Result<()>;

    fn get_profile(&self, session: &Session) -> Result<Option<UserProfile>>;

    async fn update_profile(&self, session: &Session, input: ProfileInput) -> Result<UserProfile>;

    fn subscribe_profile(&self, session: &Session) -> Result<Subscription<UserProfile>>;
}
