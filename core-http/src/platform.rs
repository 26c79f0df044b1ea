//! Platform descriptor headers.
//!
//! Identifies the calling environment to first-party services. The values
//! derive from build info and the runtime probe, neither of which changes
//! while the process runs, so the header set is computed once and reused.

use bridge_traits::platform::PlatformProbe;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

use crate::headers::{X_BUNDLE_ID, X_SDK_NAME, X_SDK_OS, X_SDK_PLATFORM, X_SDK_VERSION};

/// Fixed SDK name tag
pub const SDK_NAME: &str = "unified-sdk";

/// Library version baked in at build time
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// OS value reported when no user agent is available
const UNKNOWN_OS: &str = "unknown";

/// Ordered user-agent rules, first match wins.
const OS_RULES: &[(&str, &[&str])] = &[
    ("iOS", &["iPhone", "iPod", "iPad"]),
    ("Android OS", &["Android"]),
    ("BlackBerry OS", &["BlackBerry", "BB10"]),
    ("Windows Mobile", &["IEMobile"]),
    ("Amazon OS", &["Kindle"]),
    ("Windows 3.11", &["Win16"]),
    ("Windows 95", &["Windows 95", "Win95", "Windows_95"]),
    ("Windows 98", &["Windows 98", "Win98"]),
    ("Windows 2000", &["Windows NT 5.0", "Windows 2000"]),
    ("Windows XP", &["Windows NT 5.1", "Windows XP"]),
    ("Windows Server 2003", &["Windows NT 5.2"]),
    ("Windows Vista", &["Windows NT 6.0"]),
    ("Windows 7", &["Windows NT 6.1"]),
    ("Windows 8", &["Windows NT 6.2"]),
    ("Windows 8.1", &["Windows NT 6.3"]),
    ("Windows 10", &["Windows NT 10.0"]),
    ("Windows ME", &["Windows ME"]),
    (
        "Windows CE",
        &["Windows CE", "WinCE", "Microsoft Pocket Internet Explorer"],
    ),
    ("Open BSD", &["OpenBSD"]),
    ("Sun OS", &["SunOS"]),
    ("Chrome OS", &["CrOS"]),
    ("Linux", &["Linux", "X11"]),
    ("Mac OS", &["Mac_PowerPC", "Macintosh"]),
    ("QNX", &["QNX"]),
    ("BeOS", &["BeOS"]),
    ("OS/2", &["OS/2"]),
];

/// Extract the operating-system token from a user-agent string.
///
/// Returns `None` when no rule matches.
pub fn detect_os_token(user_agent: &str) -> Option<&'static str> {
    OS_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| user_agent.contains(needle)))
        .map(|(os, _)| *os)
}

/// Normalize an operating-system token for the `x-sdk-os` header.
///
/// Rules, checked in order:
/// - starts with `win` (any case) → `win`
/// - `Mac OS` → `mac`
/// - `iOS` → `ios`
/// - `Android OS` → `android`
/// - otherwise lower-case with whitespace runs collapsed to `_`
pub fn parse_os(os: &str) -> String {
    let lower = os.to_lowercase();
    if lower.starts_with("win") {
        return "win".to_string();
    }

    match os {
        "Mac OS" => "mac".to_string(),
        "iOS" => "ios".to_string(),
        "Android OS" => "android".to_string(),
        _ => lower.split_whitespace().collect::<Vec<_>>().join("_"),
    }
}

/// Memoized platform descriptor
pub struct PlatformDescriptor {
    probe: Arc<dyn PlatformProbe>,
    headers: OnceCell<Vec<(&'static str, String)>>,
}

impl PlatformDescriptor {
    pub fn new(probe: Arc<dyn PlatformProbe>) -> Self {
        Self {
            probe,
            headers: OnceCell::new(),
        }
    }

    /// Ordered descriptor headers, computed on first call
    pub fn headers(&self) -> &[(&'static str, String)] {
        self.headers.get_or_init(|| self.compute())
    }

    fn compute(&self) -> Vec<(&'static str, String)> {
        let os = self
            .probe
            .user_agent()
            .and_then(|ua| detect_os_token(&ua))
            .map(parse_os)
            .unwrap_or_else(|| UNKNOWN_OS.to_string());

        let mut headers = vec![
            (X_SDK_NAME, SDK_NAME.to_string()),
            (X_SDK_OS, os),
            (
                X_SDK_PLATFORM,
                self.probe.logical_platform().as_str().to_string(),
            ),
            (X_SDK_VERSION, SDK_VERSION.to_string()),
        ];

        if let Some(bundle_id) = self.probe.bundle_id() {
            headers.push((X_BUNDLE_ID, bundle_id));
        }

        debug!(headers = ?headers, "Computed platform descriptor");
        headers
    }
}

impl std::fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("headers", &self.headers.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::platform::LogicalPlatform;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProbe {
        user_agent: Option<String>,
        bundle_id: Option<String>,
        calls: AtomicUsize,
    }

    impl PlatformProbe for CountingProbe {
        fn user_agent(&self) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.user_agent.clone()
        }

        fn logical_platform(&self) -> LogicalPlatform {
            LogicalPlatform::Browser
        }

        fn bundle_id(&self) -> Option<String> {
            self.bundle_id.clone()
        }
    }

    fn value<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_parse_os_table() {
        assert_eq!(parse_os("Windows NT 10.0"), "win");
        assert_eq!(parse_os("windows 10"), "win");
        assert_eq!(parse_os("Mac OS"), "mac");
        assert_eq!(parse_os("iOS"), "ios");
        assert_eq!(parse_os("Android OS"), "android");
        assert_eq!(parse_os("Some Weird OS"), "some_weird_os");
        assert_eq!(parse_os("Chrome  OS"), "chrome_os");
        assert_eq!(parse_os("Linux"), "linux");
    }

    #[test]
    fn test_detect_os_token() {
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36";
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let windows = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

        assert_eq!(detect_os_token(mac), Some("Mac OS"));
        assert_eq!(detect_os_token(android), Some("Android OS"));
        assert_eq!(detect_os_token(iphone), Some("iOS"));
        assert_eq!(detect_os_token(windows), Some("Windows 10"));
        assert_eq!(detect_os_token("curl/8.4.0"), None);
    }

    #[test]
    fn test_headers_without_user_agent() {
        let descriptor = PlatformDescriptor::new(Arc::new(CountingProbe::default()));
        let headers = descriptor.headers();

        let names: Vec<_> = headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![X_SDK_NAME, X_SDK_OS, X_SDK_PLATFORM, X_SDK_VERSION]
        );
        assert_eq!(value(headers, X_SDK_NAME), Some("unified-sdk"));
        assert_eq!(value(headers, X_SDK_OS), Some("unknown"));
        assert_eq!(value(headers, X_SDK_PLATFORM), Some("browser"));
        assert_eq!(value(headers, X_SDK_VERSION), Some(SDK_VERSION));
        assert_eq!(value(headers, X_BUNDLE_ID), None);
    }

    #[test]
    fn test_headers_with_user_agent_and_bundle_id() {
        let probe = CountingProbe {
            user_agent: Some("Mozilla/5.0 (Windows NT 6.1; WOW64)".to_string()),
            bundle_id: Some("com.example.wallet".to_string()),
            ..Default::default()
        };
        let descriptor = PlatformDescriptor::new(Arc::new(probe));
        let headers = descriptor.headers();

        assert_eq!(value(headers, X_SDK_OS), Some("win"));
        assert_eq!(value(headers, X_BUNDLE_ID), Some("com.example.wallet"));
        assert_eq!(headers.last().map(|(name, _)| *name), Some(X_BUNDLE_ID));
    }

    #[test]
    fn test_unmatched_user_agent_reports_unknown() {
        let probe = CountingProbe {
            user_agent: Some("curl/8.4.0".to_string()),
            ..Default::default()
        };
        let descriptor = PlatformDescriptor::new(Arc::new(probe));

        assert_eq!(value(descriptor.headers(), X_SDK_OS), Some("unknown"));
    }

    #[test]
    fn test_computed_once() {
        let probe = Arc::new(CountingProbe::default());
        let descriptor = PlatformDescriptor::new(probe.clone());

        let first = descriptor.headers().to_vec();
        let second = descriptor.headers().to_vec();

        assert_eq!(first, second);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }
}
