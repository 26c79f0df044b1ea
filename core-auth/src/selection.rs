//! Credential selection for first-party requests.

use crate::token_store::BearerTokenProvider;
use crate::types::{ClientCredentials, Credential};

/// Pick the one credential a first-party request carries.
///
/// Priority:
/// 1. the provider's bearer token, unless the target is a pay endpoint
/// 2. the client's secret key
/// 3. the client's public client id
///
/// Empty values count as absent. Returns `None` when nothing applies.
pub fn select_credential(
    client: &ClientCredentials,
    tokens: &dyn BearerTokenProvider,
    is_pay_endpoint: bool,
) -> Option<Credential> {
    if !is_pay_endpoint {
        if let Some(token) = tokens.bearer_token().filter(|t| !t.is_empty()) {
            return Some(Credential::Bearer(token));
        }
    }

    if let Some(key) = client.secret_key() {
        return Some(Credential::SecretKey(key.to_string()));
    }

    client
        .client_id()
        .map(|id| Credential::ClientId(id.to_string()))
}
