//! Registration use case implementation.

use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::application::dto::RegisterRequest;
use crate::domain::entities::Account;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, NewAccount};

// Handle: letter followed by 2..=31 word characters, or a mainland
// phone number (11 digits starting with 1).
fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_]{2,31}|1[0-9]{10})$").expect("valid regex literal")
    })
}

/// Handles the registration workflow: form validation, then the account
/// store.
#[derive(Clone)]
pub struct RegisterUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl RegisterUseCase {
    /// Creates new registration use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Executes registration with provided request.
    ///
    /// # Errors
    /// Returns error if the form is incomplete or inconsistent, or the
    /// username is already registered.
    pub async fn execute(&self, request: RegisterRequest) -> Result<Account, AuthError> {
        debug!(username = %request.username, "Attempting registration");

        if !request.agreement_accepted {
            return Err(AuthError::AgreementNotAccepted);
        }

        let nickname = request.nickname.trim();
        let username = request.username.trim();
        if nickname.is_empty() {
            return Err(AuthError::missing("nickname"));
        }
        if username.is_empty() {
            return Err(AuthError::missing("username"));
        }
        if request.password.is_empty() {
            return Err(AuthError::missing("password"));
        }
        if request.confirm_password.is_empty() {
            return Err(AuthError::missing("password confirmation"));
        }
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !username_pattern().is_match(username) {
            return Err(AuthError::invalid_username(
                "expected a handle or a phone number",
            ));
        }

        let account = self
            .auth_port
            .register(NewAccount {
                nickname: nickname.to_string(),
                username: username.to_string(),
                password: request.password,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration rejected");
                e
            })?;

        info!(username = %account.username(), "Account registered");

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAuthPort;

    fn request() -> RegisterRequest {
        RegisterRequest::new(
            "小明".to_string(),
            "xiaoming".to_string(),
            "hunter2!".to_string(),
            "hunter2!".to_string(),
        )
        .with_agreement()
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));

        let account = use_case.execute(request()).await.unwrap();

        assert_eq!(account.username(), "xiaoming");
        assert_eq!(account.nickname(), "小明");
    }

    #[tokio::test]
    async fn test_password_mismatch() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));
        let mut request = request();
        request.confirm_password = "other".to_string();

        assert_eq!(
            use_case.execute(request).await,
            Err(AuthError::PasswordMismatch)
        );
    }

    #[tokio::test]
    async fn test_agreement_required() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));
        let mut request = request();
        request.agreement_accepted = false;

        assert_eq!(
            use_case.execute(request).await,
            Err(AuthError::AgreementNotAccepted)
        );
    }

    #[tokio::test]
    async fn test_username_shapes() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));

        let mut phone = request();
        phone.username = "13800138000".to_string();
        assert!(use_case.execute(phone).await.is_ok());

        let mut short = request();
        short.username = "ab".to_string();
        assert!(matches!(
            use_case.execute(short).await,
            Err(AuthError::InvalidUsername { .. })
        ));

        let mut digits = request();
        digits.username = "23800138000".to_string();
        assert!(matches!(
            use_case.execute(digits).await,
            Err(AuthError::InvalidUsername { .. })
        ));
    }

    #[tokio::test]
    async fn test_username_taken() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(false)));

        assert!(matches!(
            use_case.execute(request()).await,
            Err(AuthError::UsernameTaken { .. })
        ));
    }
}
