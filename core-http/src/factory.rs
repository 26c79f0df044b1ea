//! HTTP client factory.
//!
//! Owns the state shared by every decorated client: the host classification
//! cache, the platform descriptor memo, the transport and the bearer-token
//! provider. Tests build isolated factories instead of relying on globals.

use bridge_traits::http::HttpClient;
use bridge_traits::platform::PlatformProbe;
use core_auth::{BearerTokenProvider, ClientCredentials, EcosystemContext};
use core_runtime::config::FetchConfig;
use std::sync::Arc;
use tracing::info;

use crate::classifier::HostClassifier;
use crate::error::Result;
use crate::fetch::AuthenticatedFetch;
use crate::platform::PlatformDescriptor;

/// Factory for [`AuthenticatedFetch`] instances
#[derive(Clone)]
pub struct HttpClientFactory {
    config: FetchConfig,
    transport: Arc<dyn HttpClient>,
    classifier: Arc<HostClassifier>,
    platform: Arc<PlatformDescriptor>,
    tokens: Arc<dyn BearerTokenProvider>,
}

impl HttpClientFactory {
    /// Create a factory from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(
        config: FetchConfig,
        transport: Arc<dyn HttpClient>,
        probe: Arc<dyn PlatformProbe>,
        tokens: Arc<dyn BearerTokenProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let classifier = HostClassifier::new(config.host_cache_capacity, config.execution_mode)?;

        info!(
            mode = %config.execution_mode,
            host_cache_capacity = config.host_cache_capacity,
            default_timeout_ms = config.default_request_timeout_ms,
            "HTTP client factory initialized"
        );

        Ok(Self {
            config,
            transport,
            classifier: Arc::new(classifier),
            platform: Arc::new(PlatformDescriptor::new(probe)),
            tokens,
        })
    }

    /// Create a factory backed by the reqwest transport and desktop probe
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or the transport cannot be built.
    #[cfg(feature = "desktop")]
    pub fn desktop(config: FetchConfig, tokens: Arc<dyn BearerTokenProvider>) -> Result<Self> {
        let transport =
            bridge_desktop::ReqwestHttpClient::with_settings(&config.user_agent, config.connect_timeout)?;
        Self::new(
            config,
            Arc::new(transport),
            Arc::new(bridge_desktop::DesktopPlatformProbe::new()),
            tokens,
        )
    }

    /// Decorated fetch for one client and optional ecosystem
    pub fn client_fetch(
        &self,
        client: ClientCredentials,
        ecosystem: Option<EcosystemContext>,
    ) -> AuthenticatedFetch {
        AuthenticatedFetch::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.classifier),
            Arc::clone(&self.platform),
            Arc::clone(&self.tokens),
            client,
            ecosystem,
            self.config.default_request_timeout_ms,
        )
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn classifier(&self) -> &HostClassifier {
        &self.classifier
    }

    pub fn platform(&self) -> &PlatformDescriptor {
        &self.platform
    }
}

impl std::fmt::Debug for HttpClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientFactory")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::platform::LogicalPlatform;
    use core_auth::NoBearerToken;
    use core_runtime::config::ExecutionMode;
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    struct NativeProbe;

    impl PlatformProbe for NativeProbe {
        fn user_agent(&self) -> Option<String> {
            None
        }

        fn logical_platform(&self) -> LogicalPlatform {
            LogicalPlatform::Native
        }
    }

    fn factory(config: FetchConfig) -> HttpClientFactory {
        HttpClientFactory::new(
            config,
            Arc::new(MockHttpClient::new()),
            Arc::new(NativeProbe),
            Arc::new(NoBearerToken),
        )
        .unwrap()
    }

    #[test]
    fn test_factory_uses_config() {
        let config = FetchConfig::builder()
            .execution_mode(ExecutionMode::Production)
            .host_cache_capacity(16)
            .build()
            .unwrap();
        let factory = factory(config);

        assert_eq!(factory.classifier().capacity(), 16);
        assert_eq!(factory.classifier().execution_mode(), ExecutionMode::Production);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FetchConfig {
            host_cache_capacity: 0,
            ..FetchConfig::default()
        };
        let result = HttpClientFactory::new(
            config,
            Arc::new(MockHttpClient::new()),
            Arc::new(NativeProbe),
            Arc::new(NoBearerToken),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_clients_share_classifier_cache() {
        let factory = factory(FetchConfig::default());
        let _first = factory.client_fetch(ClientCredentials::new(), None);
        let _second = factory.client_fetch(
            ClientCredentials::new().with_client_id("other").unwrap(),
            None,
        );

        assert_eq!(Arc::strong_count(&factory.classifier), 3);
        assert_eq!(Arc::strong_count(&factory.platform), 3);
    }

    #[test]
    fn test_factories_are_isolated() {
        let a = factory(FetchConfig::default());
        let b = factory(FetchConfig::default());

        a.classifier().is_first_party("https://api.thirdweb.com");

        assert_eq!(a.classifier().len(), 1);
        assert!(b.classifier().is_empty());
    }
}
