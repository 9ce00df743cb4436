//! User and session domain models.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::ValidationError;
use crate::Result;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// The authenticated identity that every scoped operation runs under.
///
/// Passed explicitly into services instead of being read from a global.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Profile document stored for each registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Checks the basic `local@domain.tld` shape of an email address.
pub fn validate_email(email: &str) -> std::result::Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("Email".to_string()));
    }
    let valid = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email));
    if !valid {
        return Err(ValidationError::InvalidInput(
            "Email address is invalid".to_string(),
        ));
    }
    Ok(email.to_string())
}

fn validate_password(password: &str) -> std::result::Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField("Password".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidInput(format!(
            "Password must have at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> std::result::Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("Name".to_string()));
    }
    Ok(name.to_string())
}

/// Sign-up form values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationInput {
    /// Returns the trimmed name and email after validating all fields.
    pub fn validate(&self) -> Result<(String, String)> {
        let name = validate_name(&self.name)?;
        let email = validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok((name, email))
    }
}

/// Sign-in form values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Returns the trimmed email after validating both fields.
    pub fn validate(&self) -> Result<String> {
        let email = validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(email)
    }
}

/// Edit-profile form values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<ProfileInput> {
        Ok(ProfileInput {
            name: validate_name(&self.name)?,
            email: validate_email(&self.email)?,
            photo_url: self
                .photo_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        })
    }
}
