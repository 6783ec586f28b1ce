//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginRequest;
use crate::domain::entities::Account;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Handles the login workflow: form validation, then the account store.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the form is incomplete or the credentials are
    /// rejected by the account store.
    pub async fn execute(&self, request: LoginRequest) -> Result<Account, AuthError> {
        debug!(username = %request.username, "Attempting login");

        if !request.agreement_accepted {
            return Err(AuthError::AgreementNotAccepted);
        }
        if request.username.trim().is_empty() {
            return Err(AuthError::missing("username"));
        }
        if request.password.is_empty() {
            return Err(AuthError::missing("password"));
        }

        let account = self
            .auth_port
            .login(request.username.trim(), &request.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login rejected");
                e
            })?;

        info!(
            username = %account.username(),
            nickname = %account.nickname(),
            "Successfully logged in"
        );

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAuthPort;

    fn request() -> LoginRequest {
        LoginRequest::new("demo".to_string(), "demo123".to_string()).with_agreement()
    }

    #[tokio::test]
    async fn test_successful_login() {
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(true)));

        let account = use_case.execute(request()).await.unwrap();

        assert_eq!(account.username(), "demo");
        assert_eq!(account.nickname(), "Me");
    }

    #[tokio::test]
    async fn test_agreement_required() {
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(true)));
        let request = LoginRequest::new("demo".to_string(), "demo123".to_string());

        let result = use_case.execute(request).await;

        assert_eq!(result, Err(AuthError::AgreementNotAccepted));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(true)));

        let blank_user =
            LoginRequest::new("   ".to_string(), "demo123".to_string()).with_agreement();
        assert_eq!(
            use_case.execute(blank_user).await,
            Err(AuthError::missing("username"))
        );

        let blank_password = LoginRequest::new("demo".to_string(), String::new()).with_agreement();
        assert_eq!(
            use_case.execute(blank_password).await,
            Err(AuthError::missing("password"))
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(false)));

        let result = use_case.execute(request()).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }
}
