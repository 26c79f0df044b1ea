//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`, aborting on the request's cancellation token
//! - `PlatformProbe` reporting a native runtime, with optional values
//!   forwarded by an embedding webview or shell
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopPlatformProbe, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = ReqwestHttpClient::new();
//!     let probe = DesktopPlatformProbe::new().with_bundle_id("com.example.wallet");
//!
//!     // Hand both to the HTTP client factory
//! }
//! ```

mod http;
mod platform;

pub use http::ReqwestHttpClient;
pub use platform::DesktopPlatformProbe;
