//! Authentication and registration error types.

use thiserror::Error;

/// Login and registration failure variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("the privacy policy and service agreement must be accepted")]
    AgreementNotAccepted,

    #[error("the two passwords do not match")]
    PasswordMismatch,

    #[error("invalid username: {reason}")]
    InvalidUsername { reason: String },

    #[error("username {username} is already registered")]
    UsernameTaken { username: String },

    #[error("unknown username or wrong password")]
    InvalidCredentials,
}

impl AuthError {
    /// Creates a missing-field error.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid-username error.
    #[must_use]
    pub fn invalid_username(reason: impl Into<String>) -> Self {
        Self::InvalidUsername {
            reason: reason.into(),
        }
    }

    /// Creates a username-taken error.
    #[must_use]
    pub fn taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    /// Returns true if the user can fix this by editing the form.
    #[must_use]
    pub const fn is_form_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::AgreementNotAccepted
                | Self::PasswordMismatch
                | Self::InvalidUsername { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AuthError::missing("password").to_string(), "password is required");
        assert_eq!(
            AuthError::taken("demo").to_string(),
            "username demo is already registered"
        );
    }

    #[test]
    fn test_form_error_classification() {
        assert!(AuthError::PasswordMismatch.is_form_error());
        assert!(AuthError::AgreementNotAccepted.is_form_error());
        assert!(!AuthError::InvalidCredentials.is_form_error());
        assert!(!AuthError::taken("x").is_form_error());
    }
}
