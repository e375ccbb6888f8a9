// src/credentials.rs

use crate::constants::{SESSION_TOKEN, TOKEN_KEY, USER_KEY};
use crate::errors::{ParrotError, ParrotResult};
use crate::storage::KeyValueStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The single stored account. Stored as plain JSON; this is a mock login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub email: String,
    pub password: String,
}

pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrites whatever account was registered before.
    pub fn register(&self, email: &str, password: &str) -> ParrotResult<()> {
        let record = StoredCredential {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.store.set(USER_KEY, &serde_json::to_string(&record)?)?;
        info!("Registered account {}", email);
        Ok(())
    }

    pub fn login(&self, email: &str, password: &str) -> ParrotResult<StoredCredential> {
        match self.current_user()? {
            Some(user) if user.email == email && user.password == password => {
                self.store.set(TOKEN_KEY, SESSION_TOKEN)?;
                info!("Logged in as {}", email);
                Ok(user)
            }
            _ => {
                warn!("Rejected login for {}", email);
                Err(ParrotError::InvalidCredentials)
            }
        }
    }

    pub fn logout(&self) -> ParrotResult<()> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> ParrotResult<bool> {
        Ok(self.store.get(TOKEN_KEY)?.is_some())
    }

    /// The registered account, if any. An unparsable record counts as none.
    pub fn current_user(&self) -> ParrotResult<Option<StoredCredential>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unparsable user record: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn credentials() -> (Arc<MemoryStore>, CredentialStore) {
        let store = Arc::new(MemoryStore::new());
        let creds = CredentialStore::new(store.clone());
        (store, creds)
    }

    #[test]
    fn test_register_then_login() {
        let (store, creds) = credentials();
        creds.register("a@x.com", "pw1").unwrap();
        assert!(!creds.is_authenticated().unwrap());

        let user = creds.login("a@x.com", "pw1").unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(creds.is_authenticated().unwrap());
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some(SESSION_TOKEN));
    }

    #[test]
    fn test_login_with_wrong_password_fails() {
        let (_, creds) = credentials();
        creds.register("a@x.com", "pw1").unwrap();

        assert!(matches!(
            creds.login("a@x.com", "pw2"),
            Err(ParrotError::InvalidCredentials)
        ));
        assert!(!creds.is_authenticated().unwrap());
    }

    #[test]
    fn test_second_registration_replaces_first() {
        let (_, creds) = credentials();
        creds.register("a@x.com", "pw1").unwrap();
        creds.register("b@x.com", "pw2").unwrap();

        assert!(creds.login("a@x.com", "pw1").is_err());
        assert!(creds.login("b@x.com", "pw2").is_ok());
    }

    #[test]
    fn test_login_without_account_or_with_garbage_fails() {
        let (store, creds) = credentials();
        assert!(creds.login("a@x.com", "pw").is_err());

        store.set(USER_KEY, "{broken").unwrap();
        assert_eq!(creds.current_user().unwrap(), None);
        assert!(creds.login("a@x.com", "pw").is_err());
    }

    #[test]
    fn test_logout_clears_token() {
        let (_, creds) = credentials();
        creds.register("a@x.com", "pw").unwrap();
        creds.login("a@x.com", "pw").unwrap();
        creds.logout().unwrap();
        assert!(!creds.is_authenticated().unwrap());
        assert!(creds.current_user().unwrap().is_some());
    }
}
