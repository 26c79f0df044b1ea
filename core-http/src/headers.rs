//! Header names attached to first-party requests.

pub use core_auth::types::{AUTHORIZATION, X_CLIENT_ID, X_SECRET_KEY};

/// Ecosystem identifier
pub const X_ECOSYSTEM_ID: &str = "x-ecosystem-id";
/// Ecosystem partner identifier
pub const X_ECOSYSTEM_PARTNER_ID: &str = "x-ecosystem-partner-id";
/// Fixed SDK name tag
pub const X_SDK_NAME: &str = "x-sdk-name";
/// Normalized operating system token
pub const X_SDK_OS: &str = "x-sdk-os";
/// Logical runtime platform
pub const X_SDK_PLATFORM: &str = "x-sdk-platform";
/// Library version baked in at build time
pub const X_SDK_VERSION: &str = "x-sdk-version";
/// Bundle id of the embedding native shell
pub const X_BUNDLE_ID: &str = "x-bundle-id";
/// Request body media type
pub const CONTENT_TYPE: &str = "content-type";
