//! Account models and related types

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    /// Display name
    pub username: String,
    /// Email, also the sign-in credential
    pub email: String,
    /// Plain password handed to the identity provider
    pub password: String,
}

impl RegisterUserRequest {
    /// Create a new registration request
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Sign-in request
#[derive(Debug, Clone)]
pub struct LoginUserRequest {
    /// Email
    pub email: String,
    /// Plain password
    pub password: String,
}

impl LoginUserRequest {
    /// Create a new sign-in request
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Identity issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Provider-assigned unique identifier, immutable after creation
    pub uid: String,
    /// Email the account was created with
    pub email: String,
}

/// Profile document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub username: String,
    pub email: String,
    pub cost: f64,
}

impl ProfileDocument {
    /// Profile written at registration time
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            cost: 0.0,
        }
    }
}

/// User profile reconstructed from the profile document and the session identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub username: String,
    /// Email
    pub email: String,
    /// Identity provider uid
    pub user_uid: String,
    /// Stored cost figure
    pub cost: f64,
}

impl UserProfile {
    /// Pair a profile document with the identity it belongs to
    pub fn from_document(user_uid: impl Into<String>, document: ProfileDocument) -> Self {
        Self {
            username: document.username,
            email: document.email,
            user_uid: user_uid.into(),
            cost: document.cost,
        }
    }
}
