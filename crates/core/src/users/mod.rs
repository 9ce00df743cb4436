//! Users module - session, profile, and authentication flows over the
//! identity provider.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    validate_email, LoginInput, ProfileInput, RegistrationInput, Session, UserProfile,
};
pub use users_service::UserService;
pub use users_traits::{IdentityProviderTrait, UserProfileRepositoryTrait, UserServiceTrait};
