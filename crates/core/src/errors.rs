//! Core error types for the Monezi application.
//!
//! This module defines backend-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//! None of these errors is fatal to the process: each one is scoped to the
//! action or screen that triggered it.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad user input, caught before any remote call.
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backend rejected or could not be reached for a write.
    /// The operation is abandoned and local state is left untouched.
    #[error("Failed to {operation}: {message}")]
    RemoteWrite { operation: String, message: String },

    /// A live subscription failed. The stream is treated as empty until
    /// the owning screen subscribes again.
    #[error("Live subscription failed: {0}")]
    Subscription(String),

    /// Local notification permission was denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No authenticated user")]
    NotAuthenticated,

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Builds a `RemoteWrite` error for the named operation.
    pub fn remote_write(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Error::RemoteWrite {
            operation: operation.into(),
            message: cause.to_string(),
        }
    }

    /// Text shown to the user in a dismissible alert.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::RemoteWrite { operation, .. } => {
                format!("Could not {}. Please try again.", operation)
            }
            Error::Subscription(_) => "Could not load your data.".to_string(),
            Error::PermissionDenied(_) => "Reminders cannot be scheduled without notification \
                 permission. You can enable it in your device settings."
                .to_string(),
            Error::NotAuthenticated => "No user signed in. Please sign in again.".to_string(),
            Error::Auth(e) => e.user_message().to_string(),
            Error::Database(_) | Error::Settings(_) | Error::Unexpected(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Returns true for errors raised before anything was sent to the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Backend-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Rejections reported by the identity provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("email address is already in use")]
    EmailAlreadyInUse,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("password is too weak")]
    WeakPassword,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no user found for this email address")]
    UserNotFound,

    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyInUse => "This email address is already registered.",
            AuthError::InvalidEmail => "The email address is invalid.",
            AuthError::WeakPassword => "The password is too weak.",
            AuthError::InvalidCredentials => "Incorrect email or password.",
            AuthError::UserNotFound => "No user was found with this email address.",
            AuthError::Provider(_) => "Could not reach the authentication service.",
        }
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("{field} must be a number")]
    NotANumber { field: String },

    #[error("{field} must be greater than zero")]
    NotPositive { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("{field} exceeds the maximum allowed amount")]
    TooLarge { field: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(String),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_write_user_message_names_operation() {
        let err = Error::remote_write("save the expense", "backend unavailable");
        assert_eq!(err.user_message(), "Could not save the expense. Please try again.");
        assert_eq!(
            err.to_string(),
            "Failed to save the expense: backend unavailable"
        );
    }

    #[test]
    fn test_validation_errors_are_shown_verbatim() {
        let err = Error::from(ValidationError::NotPositive {
            field: "Amount".to_string(),
        });
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Amount must be greater than zero");
    }

    #[test]
    fn test_auth_error_converts_into_root_error() {
        let err: Error = AuthError::EmailAlreadyInUse.into();
        assert_eq!(
            err.user_message(),
            "This email address is already registered."
        );
        assert!(!err.is_validation());
    }
}
