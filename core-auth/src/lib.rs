//! # Authentication Module
//!
//! Credential model for first-party requests.
//!
//! ## Overview
//!
//! A calling client may carry a secret key and/or a public client id, an
//! optional ecosystem context, and the hosting application may expose a
//! session bearer token. Exactly one credential is chosen per request by
//! [`select_credential`].
//!
//! ## Features
//!
//! - Validated client credentials and ecosystem context
//! - Injectable [`BearerTokenProvider`] with a settable [`SessionTokenStore`]
//! - Priority-ordered credential selection with the pay-endpoint exclusion
//! - `Debug` output that never prints secrets

pub mod error;
pub mod selection;
pub mod token_store;
pub mod types;

pub use error::{AuthError, Result};
pub use selection::select_credential;
pub use token_store::{BearerTokenProvider, NoBearerToken, SessionTokenStore};
pub use types::{
    ClientCredentials, Credential, EcosystemContext, AUTHORIZATION, X_CLIENT_ID, X_SECRET_KEY,
};
