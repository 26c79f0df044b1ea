//! Runtime environment probe.
//!
//! Each host reports what it knows about the calling environment: the
//! user-agent string (when a browser-like global exists), the logical
//! platform, and the bundle identifier of an embedding native shell.

use std::fmt;

/// Logical execution platform reported to first-party services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalPlatform {
    /// Web page or web worker (including wasm32 builds)
    Browser,
    /// Server-side JavaScript host
    Node,
    /// Native-mobile shell running a JavaScript bridge
    ReactNative,
    /// Native binary with no JavaScript host
    Native,
    Unknown,
}

impl LogicalPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalPlatform::Browser => "browser",
            LogicalPlatform::Node => "node",
            LogicalPlatform::ReactNative => "react-native",
            LogicalPlatform::Native => "native",
            LogicalPlatform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LogicalPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment probe used to describe the calling platform
///
/// Implementations must be deterministic for a given environment; callers
/// memoize the results for the lifetime of the process.
pub trait PlatformProbe: Send + Sync {
    /// User-agent string, if a browser-like global is available
    fn user_agent(&self) -> Option<String>;

    /// Logical platform of the current runtime
    fn logical_platform(&self) -> LogicalPlatform;

    /// Application identifier exposed by an embedding host shell
    fn bundle_id(&self) -> Option<String> {
        None
    }
}
