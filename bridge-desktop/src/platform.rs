//! Desktop platform probe

use bridge_traits::platform::{LogicalPlatform, PlatformProbe};

/// Desktop implementation of [`PlatformProbe`]
///
/// Native desktop processes have no browser globals, so the user agent and
/// bundle id are only reported when the host application supplies them
/// (for example a webview shell forwarding its navigator user agent).
#[derive(Debug, Clone, Default)]
pub struct DesktopPlatformProbe {
    user_agent: Option<String>,
    bundle_id: Option<String>,
}

impl DesktopPlatformProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a user agent forwarded by an embedding webview
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Report the application identifier of the embedding shell
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }
}

impl PlatformProbe for DesktopPlatformProbe {
    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn logical_platform(&self) -> LogicalPlatform {
        LogicalPlatform::Native
    }

    fn bundle_id(&self) -> Option<String> {
        self.bundle_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_probe_reports_nothing() {
        let probe = DesktopPlatformProbe::new();
        assert!(probe.user_agent().is_none());
        assert!(probe.bundle_id().is_none());
        assert_eq!(probe.logical_platform(), LogicalPlatform::Native);
    }

    #[test]
    fn test_forwarded_values() {
        let probe = DesktopPlatformProbe::new()
            .with_user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
            .with_bundle_id("com.example.wallet");

        assert!(probe.user_agent().unwrap().contains("Macintosh"));
        assert_eq!(probe.bundle_id().as_deref(), Some("com.example.wallet"));
    }
}
