//! Authentication DTOs.

/// Login form data.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Login handle (username or phone number).
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Whether the privacy policy checkbox is ticked.
    pub agreement_accepted: bool,
}

impl LoginRequest {
    /// Creates new login request with the agreement unchecked.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            agreement_accepted: false,
        }
    }

    /// Marks the agreement as accepted.
    #[must_use]
    pub const fn with_agreement(mut self) -> Self {
        self.agreement_accepted = true;
        self
    }
}

/// Registration form data.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Display nickname.
    pub nickname: String,
    /// Login handle (username or phone number).
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Password confirmation, must match `password`.
    pub confirm_password: String,
    /// Whether the privacy policy checkbox is ticked.
    pub agreement_accepted: bool,
}

impl RegisterRequest {
    /// Creates new registration request with the agreement unchecked.
    #[must_use]
    pub const fn new(
        nickname: String,
        username: String,
        password: String,
        confirm_password: String,
    ) -> Self {
        Self {
            nickname,
            username,
            password,
            confirm_password,
            agreement_accepted: false,
        }
    }

    /// Marks the agreement as accepted.
    #[must_use]
    pub const fn with_agreement(mut self) -> Self {
        self.agreement_accepted = true;
        self
    }
}
