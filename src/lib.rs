//! Workspace facade crate.
//!
//! Re-exports the request-decoration core together with the credential and
//! configuration types a host needs to build it, so applications can depend
//! on `sdk-fetch-workspace` alone. The `desktop` feature (default) enables
//! the reqwest-backed transport.

pub use core_auth::{
    BearerTokenProvider, ClientCredentials, EcosystemContext, NoBearerToken, SessionTokenStore,
};
pub use core_http::*;
pub use core_runtime::config::{ExecutionMode, FetchConfig};
pub use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
