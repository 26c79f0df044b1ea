//! Authenticated fetch wrapper.
//!
//! Decorates first-party requests with one credential header, ecosystem
//! headers and the platform descriptor, applies a per-request timeout through
//! a cancellation token, and hands the request to the transport. Responses
//! and failures come back exactly as the transport produced them.
//!
//! ## Usage
//!
//! ```ignore
//! use core_http::{FetchOptions, HttpClientFactory};
//!
//! let fetch = factory.client_fetch(client, None);
//! let response = fetch
//!     .request("https://api.thirdweb.com/v1/wallets", FetchOptions::new().timeout_ms(10_000))
//!     .await?;
//! ```

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_auth::{select_credential, BearerTokenProvider, ClientCredentials, EcosystemContext};
use core_runtime::logging::redact_if_sensitive;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, Level};

use crate::classifier::{is_pay_endpoint, HostClassifier};
use crate::headers::{CONTENT_TYPE, X_ECOSYSTEM_ID, X_ECOSYSTEM_PARTNER_ID};
use crate::platform::PlatformDescriptor;

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: HttpMethod,
    /// Caller headers; `None` leaves the request without a header collection
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Bytes>,
    /// Timeout in milliseconds; `None` uses the configured default, `Some(0)` disables it
    pub request_timeout_ms: Option<u64>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as JSON and set the content type
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::OperationFailed(format!(
                "JSON serialization failed: {}",
                e
            ))
        })?;
        Ok(self.header(CONTENT_TYPE, "application/json").body(Bytes::from(json)))
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn no_timeout(self) -> Self {
        self.timeout_ms(0)
    }
}

/// Request decorator bound to one client and optional ecosystem.
///
/// Cheap to clone; clones share the classifier cache and platform memo of
/// the factory that created them.
#[derive(Clone)]
pub struct AuthenticatedFetch {
    transport: Arc<dyn HttpClient>,
    classifier: Arc<HostClassifier>,
    platform: Arc<PlatformDescriptor>,
    tokens: Arc<dyn BearerTokenProvider>,
    client: ClientCredentials,
    ecosystem: Option<EcosystemContext>,
    default_timeout_ms: u64,
}

impl AuthenticatedFetch {
    pub(crate) fn new(
        transport: Arc<dyn HttpClient>,
        classifier: Arc<HostClassifier>,
        platform: Arc<PlatformDescriptor>,
        tokens: Arc<dyn BearerTokenProvider>,
        client: ClientCredentials,
        ecosystem: Option<EcosystemContext>,
        default_timeout_ms: u64,
    ) -> Self {
        Self {
            transport,
            classifier,
            platform,
            tokens,
            client,
            ecosystem,
            default_timeout_ms,
        }
    }

    /// Issue a request, decorating it when `url` is first-party.
    ///
    /// # Errors
    ///
    /// Returns the transport's failure unchanged. A request that outlives its
    /// timeout resolves to [`BridgeError::Cancelled`](bridge_traits::BridgeError::Cancelled).
    pub async fn request(&self, url: &str, options: FetchOptions) -> Result<HttpResponse> {
        let FetchOptions {
            method,
            headers,
            body,
            request_timeout_ms,
        } = options;

        let mut headers = headers.map(normalize_headers);

        if self.classifier.is_first_party(url) {
            self.decorate(url, headers.get_or_insert_with(HashMap::new));
        }

        let mut request = HttpRequest::new(method, url);
        request.headers = headers.unwrap_or_default();
        request.body = body;

        match request_timeout_ms.unwrap_or(self.default_timeout_ms) {
            0 => self.transport.execute(request).await,
            timeout_ms => {
                let token = CancellationToken::new();
                let request = request.cancellation(token.clone());
                self.execute_with_deadline(request, token, Duration::from_millis(timeout_ms))
                    .await
            }
        }
    }

    /// `GET` with default options
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.request(url, FetchOptions::new()).await
    }

    /// `POST` a JSON body with default options
    pub async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<HttpResponse> {
        let options = FetchOptions::new().method(HttpMethod::Post).json(body)?;
        self.request(url, options).await
    }

    pub fn client(&self) -> &ClientCredentials {
        &self.client
    }

    pub fn ecosystem(&self) -> Option<&EcosystemContext> {
        self.ecosystem.as_ref()
    }

    fn decorate(&self, url: &str, headers: &mut HashMap<String, String>) {
        let credential = select_credential(&self.client, self.tokens.as_ref(), is_pay_endpoint(url));
        if let Some(credential) = &credential {
            let (name, value) = credential.header();
            headers.insert(name.to_string(), value);
        }

        if let Some(ecosystem) = &self.ecosystem {
            headers.insert(X_ECOSYSTEM_ID.to_string(), ecosystem.id().to_string());
            if let Some(partner_id) = ecosystem.partner_id() {
                headers.insert(X_ECOSYSTEM_PARTNER_ID.to_string(), partner_id.to_string());
            }
        }

        // Platform identity overrides same-named caller headers
        for (name, value) in self.platform.headers() {
            headers.insert((*name).to_string(), value.clone());
        }

        if tracing::enabled!(Level::TRACE) {
            trace!(
                url = %url,
                credential = credential.as_ref().map(|c| c.kind()).unwrap_or("none"),
                headers = ?loggable_headers(headers),
                "Decorated first-party request"
            );
        }
    }

    /// Race the transport against the deadline.
    ///
    /// The deadline timer lives on this future's stack, so it is dropped on
    /// every exit path and can never fire after the request has settled. On
    /// expiry the token is cancelled for the transport and the in-flight
    /// future is dropped, so a transport that ignores the token still cannot
    /// hold the caller past the deadline.
    async fn execute_with_deadline(
        &self,
        request: HttpRequest,
        token: CancellationToken,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self.transport.execute(request);
        tokio::pin!(response);
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        tokio::select! {
            biased;
            result = &mut response => result,
            _ = &mut deadline => {
                debug!(timeout_ms = timeout.as_millis() as u64, "Request deadline reached, cancelling");
                token.cancel();
                Err(BridgeError::Cancelled(format!(
                    "request exceeded {}ms timeout",
                    timeout.as_millis()
                )))
            }
        }
    }
}

impl std::fmt::Debug for AuthenticatedFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedFetch")
            .field("client", &self.client)
            .field("ecosystem", &self.ecosystem)
            .field("default_timeout_ms", &self.default_timeout_ms)
            .finish()
    }
}

/// Lower-case header names.
///
/// When two spellings collide, the lexically greatest original name keeps
/// its value, so an all-lower-case spelling beats any capitalized one.
fn normalize_headers(headers: HashMap<String, String>) -> HashMap<String, String> {
    let mut ordered: Vec<(String, String)> = headers.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut normalized = HashMap::with_capacity(ordered.len());
    for (name, value) in ordered {
        normalized.insert(name.to_ascii_lowercase(), value);
    }
    normalized
}

/// Header map with credential values masked, for trace output
fn loggable_headers(headers: &HashMap<String, String>) -> BTreeMap<&str, String> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str(), redact_if_sensitive(name, value)))
        .collect()
}
