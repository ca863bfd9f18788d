//! Identity provider boundary and its in-memory backend

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::ProviderError;
use common::model::account::AuthUser;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Minimum password length accepted by the provider
pub const MIN_PASSWORD_LEN: usize = 6;

/// Identity provider trait
///
/// The provider owns session state. A successful `create_user` or `sign_in`
/// makes that user the current user, `sign_out` clears it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account. `Ok(None)` means the provider claimed success but
    /// returned no identity.
    async fn create_user(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError>;

    /// Authenticate and start a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, ProviderError>;

    /// End the local session
    fn sign_out(&self) -> Result<(), ProviderError>;

    /// Ask the provider to send a password reset email
    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    /// Identity of the signed-in user, if any
    fn current_user(&self) -> Option<AuthUser>;

    /// Delete an account (used to compensate a failed registration)
    async fn delete_user(&self, uid: &str) -> Result<(), ProviderError>;
}

/// Credential record held by the in-memory provider
#[derive(Clone)]
pub struct Credential {
    pub user: AuthUser,
    password: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    fn matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// In-memory identity provider
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    /// Credentials by normalized email
    pub credentials: DashMap<String, Credential>,
    /// Last password reset request per normalized email
    pub password_resets: DashMap<String, DateTime<Utc>>,
    session: RwLock<Option<AuthUser>>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl InMemoryIdentityProvider {
    /// Create a new in-memory identity provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an account exists for the given uid
    pub fn has_user(&self, uid: &str) -> bool {
        self.credentials.iter().any(|entry| entry.value().user.uid == uid)
    }

    /// Creation time of the account registered under `email`
    pub fn created_at(&self, email: &str) -> Option<DateTime<Utc>> {
        self.credentials.get(&normalize_email(email)).map(|c| c.created_at)
    }

    /// Time of the last password reset requested for `email`
    pub fn last_password_reset(&self, email: &str) -> Option<DateTime<Utc>> {
        self.password_resets.get(&normalize_email(email)).map(|t| *t)
    }

    fn set_session(&self, user: Option<AuthUser>) {
        let mut session = self.session.write().unwrap_or_else(|e| e.into_inner());
        *session = user;
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError> {
        let key = normalize_email(email);
        if !key.contains('@') {
            return Err(ProviderError::new("invalid-email", "The email address is badly formatted"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::new(
                "weak-password",
                format!("Password should be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        let user = AuthUser {
            uid: Uuid::new_v4().simple().to_string(),
            email: key.clone(),
        };

        match self.credentials.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(ProviderError::new(
                    "email-already-in-use",
                    "The email address is already in use by another account",
                ));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Credential {
                    user: user.clone(),
                    password: password.to_string(),
                    created_at: Utc::now(),
                });
            }
        }

        debug!("Created identity {}", user.uid);
        self.set_session(Some(user.clone()));
        Ok(Some(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, ProviderError> {
        let credential = self
            .credentials
            .get(&normalize_email(email))
            .map(|c| c.clone())
            .ok_or_else(|| ProviderError::new("user-not-found", "There is no user record for this email"))?;

        if !credential.matches(password) {
            return Err(ProviderError::new("wrong-password", "The password is invalid"));
        }

        self.set_session(Some(credential.user.clone()));
        Ok(credential.user)
    }

    fn sign_out(&self) -> Result<(), ProviderError> {
        self.set_session(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let key = normalize_email(email);
        if !self.credentials.contains_key(&key) {
            return Err(ProviderError::new("user-not-found", "There is no user record for this email"));
        }

        self.password_resets.insert(key, Utc::now());
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn delete_user(&self, uid: &str) -> Result<(), ProviderError> {
        let email = self
            .credentials
            .iter()
            .find(|entry| entry.value().user.uid == uid)
            .map(|entry| entry.key().clone())
            .ok_or_else(|| ProviderError::new("user-not-found", format!("No user with uid {}", uid)))?;

        self.credentials.remove(&email);
        if self.current_user().map(|u| u.uid == uid).unwrap_or(false) {
            self.set_session(None);
        }
        Ok(())
    }
}
