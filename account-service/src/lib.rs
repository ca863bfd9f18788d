//! Account service for user registration, sign-in and profile lookup

pub mod service;
pub mod provider;
pub mod repository;
pub mod config;

pub use service::AccountService;
pub use provider::{IdentityProvider, InMemoryIdentityProvider};
pub use repository::{DocumentStore, InMemoryDocumentStore};
pub use config::AccountServiceConfig;
