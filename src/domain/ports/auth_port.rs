//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::domain::errors::AuthError;

/// A registration request, validated by the use-case layer before it
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Display nickname.
    pub nickname: String,
    /// Login handle (username or phone number).
    pub username: String,
    /// Plain-text password. Local mock only, nothing leaves the process.
    pub password: String,
}

/// Port for account login and registration.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Checks credentials and returns the matching account.
    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Registers a new account and returns it.
    async fn register(&self, registration: NewAccount) -> Result<Account, AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: AtomicBool,
        account: Account,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: AtomicBool::new(should_succeed),
                account: Account::new("Me", "demo"),
            }
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(&self, _username: &str, _password: &str) -> Result<Account, AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(self.account.clone())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn register(&self, registration: NewAccount) -> Result<Account, AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Account::new(registration.nickname, registration.username))
            } else {
                Err(AuthError::taken(registration.username))
            }
        }
    }
}
