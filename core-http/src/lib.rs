//! # First-Party HTTP Request Core
//!
//! Decorates outbound requests to the SDK's own services.
//!
//! ## Overview
//!
//! - [`HostClassifier`] decides whether a URL is first-party, memoizing each
//!   verdict in a bounded LRU cache
//! - [`is_pay_endpoint`] flags the pay subservice, which never receives the
//!   session bearer token
//! - [`PlatformDescriptor`] computes the `x-sdk-*` identification headers once
//! - [`AuthenticatedFetch`] attaches credential, ecosystem and platform
//!   headers to first-party requests and enforces a per-request timeout
//! - [`HttpClientFactory`] owns the shared state and hands out fetch handles
//!
//! ## Usage
//!
//! ```ignore
//! use core_auth::{ClientCredentials, SessionTokenStore};
//! use core_http::HttpClientFactory;
//! use core_runtime::FetchConfig;
//! use std::sync::Arc;
//!
//! let session = SessionTokenStore::new();
//! let factory = HttpClientFactory::desktop(FetchConfig::default(), Arc::new(session.clone()))?;
//!
//! let client = ClientCredentials::new().with_client_id("abc123")?;
//! let fetch = factory.client_fetch(client, None);
//! let response = fetch.get("https://api.thirdweb.com/v1/chains").await?;
//! ```

pub mod classifier;
pub mod error;
pub mod factory;
pub mod fetch;
pub mod headers;
pub mod platform;

pub use classifier::{is_pay_endpoint, ClassifierStats, HostClassifier, FIRST_PARTY_DOMAINS};
pub use error::{FactoryError, Result};
pub use factory::HttpClientFactory;
pub use fetch::{AuthenticatedFetch, FetchOptions};
pub use platform::{detect_os_token, parse_os, PlatformDescriptor, SDK_NAME, SDK_VERSION};
