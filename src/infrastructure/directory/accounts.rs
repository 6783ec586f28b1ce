//! In-memory account store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Account;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, NewAccount};

use super::seed;

struct StoredAccount {
    nickname: String,
    password: String,
}

/// Account store backed by a process-local map, pre-seeded with the demo
/// account. Registrations live until the process exits.
pub struct InMemoryAccounts {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl InMemoryAccounts {
    /// Creates the store with the demo account seeded.
    #[must_use]
    pub fn new() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            seed::DEMO_USERNAME.to_string(),
            StoredAccount {
                nickname: seed::DEMO_NICKNAME.to_string(),
                password: seed::DEMO_PASSWORD.to_string(),
            },
        );
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

impl Default for InMemoryAccounts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthPort for InMemoryAccounts {
    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let accounts = self.accounts.read().await;
        let stored = accounts.get(username).ok_or(AuthError::InvalidCredentials)?;
        if stored.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Account::new(stored.nickname.clone(), username))
    }

    async fn register(&self, registration: NewAccount) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&registration.username) {
            return Err(AuthError::taken(registration.username));
        }

        debug!(username = %registration.username, "Registering account");
        let account = Account::new(registration.nickname.clone(), registration.username.clone());
        accounts.insert(
            registration.username,
            StoredAccount {
                nickname: registration.nickname,
                password: registration.password,
            },
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_account_login() {
        let store = InMemoryAccounts::new();

        let account = store.login("demo", "demo123").await.unwrap();
        assert_eq!(account.nickname(), "Me");

        assert_eq!(
            store.login("demo", "wrong").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            store.login("nobody", "demo123").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = InMemoryAccounts::new();

        store
            .register(NewAccount {
                nickname: "小明".to_string(),
                username: "xiaoming".to_string(),
                password: "hunter2!".to_string(),
            })
            .await
            .unwrap();

        let account = store.login("xiaoming", "hunter2!").await.unwrap();
        assert_eq!(account.nickname(), "小明");
    }

    #[tokio::test]
    async fn test_register_duplicate_rejected() {
        let store = InMemoryAccounts::new();

        let result = store
            .register(NewAccount {
                nickname: "Someone".to_string(),
                username: "demo".to_string(),
                password: "pw".to_string(),
            })
            .await;

        assert_eq!(result, Err(AuthError::taken("demo")));
    }
}
