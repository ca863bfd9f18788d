//! Account service implementation

use std::sync::Arc;

use common::error::{Error, ErrorExt, Result};
use common::model::account::{LoginUserRequest, ProfileDocument, RegisterUserRequest, UserProfile};
use tracing::{debug, error, info, warn};

use crate::config::AccountServiceConfig;
use crate::provider::{IdentityProvider, InMemoryIdentityProvider};
use crate::repository::{DocumentStore, InMemoryDocumentStore};

/// Account service forwarding user account operations to the identity
/// provider and the document store
pub struct AccountService {
    /// Identity provider client
    identity: Arc<dyn IdentityProvider>,
    /// Document store client
    store: Arc<dyn DocumentStore>,
    config: AccountServiceConfig,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountService {
    /// Create a new account service over in-memory backends
    pub fn new() -> Self {
        Self::with_backends(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryDocumentStore::new()),
        )
    }

    /// Create a new account service over the given backends with the default configuration
    pub fn with_backends(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(identity, store, AccountServiceConfig::default())
    }

    /// Create a new account service over the given backends, configured from the environment
    pub fn from_env(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Result<Self> {
        Ok(Self::with_config(identity, store, AccountServiceConfig::from_env()?))
    }

    /// Create a new account service with an explicit configuration
    pub fn with_config(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        config: AccountServiceConfig,
    ) -> Self {
        Self { identity, store, config }
    }

    /// Service configuration
    pub fn config(&self) -> &AccountServiceConfig {
        &self.config
    }

    /// Register a new user and write its profile document.
    ///
    /// Returns the uid assigned by the identity provider. A provider failure
    /// never touches the store. A store failure after the identity was created
    /// returns [`Error::Store`]; the identity account is only removed when
    /// `compensate_failed_registration` is set.
    pub async fn register(&self, request: &RegisterUserRequest) -> Result<String> {
        info!("Registering user {}", request.username);

        let user = self
            .identity
            .create_user(&request.email, &request.password)
            .await?
            .ok_or_else(|| Error::AmbiguousFailure("identity provider returned no user".to_string()))?;

        let document = ProfileDocument::new(request.username.as_str(), request.email.as_str());
        let fields = serde_json::to_value(&document)
            .map_err(|e| Error::Internal(format!("Failed to encode profile document: {}", e)))?;

        debug!("Writing profile document for {}", user.uid);
        if let Err(store_err) = self
            .store
            .set_document(&self.config.users_collection, &user.uid, fields)
            .await
        {
            warn!(
                "Profile write failed for {}; identity exists without a profile: {}",
                user.uid, store_err
            );

            if self.config.compensate_failed_registration {
                match self.identity.delete_user(&user.uid).await {
                    Ok(()) => info!("Removed identity {} after failed profile write", user.uid),
                    Err(delete_err) => {
                        error!("Failed to remove identity {}: {}", user.uid, delete_err);
                    }
                }
            }

            return Err(Error::Store(store_err));
        }

        info!("Registered user {}", user.uid);
        Ok(user.uid)
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, request: &LoginUserRequest) -> Result<()> {
        info!("Signing in");
        self.identity.sign_in(&request.email, &request.password).await?;
        Ok(())
    }

    /// Sign out of the current session
    pub async fn sign_out(&self) -> Result<()> {
        info!("Signing out");
        self.identity.sign_out()?;
        Ok(())
    }

    /// Request a password reset email. The address is passed through unvalidated.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        info!("Requesting password reset");
        self.identity.send_password_reset(email).await?;
        Ok(())
    }

    /// Uid of the signed-in user, if any
    pub fn current_user_uid(&self) -> Option<String> {
        self.identity.current_user().map(|u| u.uid)
    }

    /// Fetch the profile of the signed-in user
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        let uid = self.current_user_uid().ok_or(Error::NoActiveSession)?;
        debug!("Fetching profile for {}", uid);

        let fields = self
            .store
            .get_document(&self.config.users_collection, &uid)
            .await?
            .ok_or_else(|| Error::ProfileNotFound(uid.clone()))?;

        let document: ProfileDocument = serde_json::from_value(fields)
            .map_err(|e| Error::MalformedProfile(e.to_string()))
            .with_context(|| format!("{}/{}", self.config.users_collection, uid))?;

        Ok(UserProfile::from_document(uid, document))
    }
}
