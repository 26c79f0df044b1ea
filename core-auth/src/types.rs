use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, Result};

/// Credentials configured on a calling client.
///
/// Either field may be absent. When both are present the secret key wins
/// (see [`select_credential`](crate::select_credential)).
///
/// # Examples
///
/// ```
/// use core_auth::ClientCredentials;
///
/// let client = ClientCredentials::new().with_client_id("abc123").unwrap();
/// assert_eq!(client.client_id(), Some("abc123"));
/// assert!(client.secret_key().is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredentials {
    secret_key: Option<String>,
    client_id: Option<String>,
}

impl ClientCredentials {
    /// Create credentials with neither field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the secret key used by server-side callers
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] for a blank key.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Result<Self> {
        self.secret_key = Some(non_blank("secret_key", secret_key.into())?);
        Ok(self)
    }

    /// Set the public client identifier
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] for a blank identifier.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Result<Self> {
        self.client_id = Some(non_blank("client_id", client_id.into())?);
        Ok(self)
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Multi-tenant partner context attached to first-party requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemContext {
    id: String,
    partner_id: Option<String>,
}

impl EcosystemContext {
    /// Create an ecosystem context
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] for a blank ecosystem id.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: non_blank("ecosystem_id", id.into())?,
            partner_id: None,
        })
    }

    /// Attach a partner identifier
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] for a blank partner id.
    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Result<Self> {
        self.partner_id = Some(non_blank("partner_id", partner_id.into())?);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn partner_id(&self) -> Option<&str> {
        self.partner_id.as_deref()
    }
}

/// Header carrying a session bearer token (`Bearer <token>`)
pub const AUTHORIZATION: &str = "authorization";
/// Header carrying the client secret key
pub const X_SECRET_KEY: &str = "x-secret-key";
/// Header carrying the public client identifier
pub const X_CLIENT_ID: &str = "x-client-id";

/// The single credential attached to a first-party request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Externally supplied session token, sent as `authorization: Bearer <token>`
    Bearer(String),
    /// Client secret key, sent as `x-secret-key`
    SecretKey(String),
    /// Public client identifier, sent as `x-client-id`
    ClientId(String),
}

impl Credential {
    /// Header name and value for this credential
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Credential::Bearer(token) => (AUTHORIZATION, format!("Bearer {}", token)),
            Credential::SecretKey(key) => (X_SECRET_KEY, key.clone()),
            Credential::ClientId(id) => (X_CLIENT_ID, id.clone()),
        }
    }

    /// Short label safe for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Bearer(_) => "bearer",
            Credential::SecretKey(_) => "secret_key",
            Credential::ClientId(_) => "client_id",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ClientId(id) => f.debug_tuple("ClientId").field(id).finish(),
            other => f.debug_tuple(other.kind()).field(&"[REDACTED]").finish(),
        }
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidCredential {
            field,
            reason: "value cannot be empty".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_credentials_builder() {
        let client = ClientCredentials::new()
            .with_secret_key("sk_live_123")
            .unwrap()
            .with_client_id("client_abc")
            .unwrap();

        assert_eq!(client.secret_key(), Some("sk_live_123"));
        assert_eq!(client.client_id(), Some("client_abc"));
    }

    #[test]
    fn test_blank_values_rejected() {
        assert!(ClientCredentials::new().with_secret_key("").is_err());
        assert!(ClientCredentials::new().with_client_id("   ").is_err());
        assert!(EcosystemContext::new("").is_err());

        let err = EcosystemContext::new("ecosystem.acme")
            .unwrap()
            .with_partner_id("")
            .unwrap_err();
        assert!(err.to_string().contains("partner_id"));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let client = ClientCredentials::new()
            .with_secret_key("super_secret_value")
            .unwrap();
        let debug_str = format!("{:?}", client);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("super_secret_value"));

        let credential = Credential::Bearer("session_token_value".to_string());
        assert!(!format!("{:?}", credential).contains("session_token_value"));
    }

    #[test]
    fn test_credential_headers() {
        assert_eq!(
            Credential::Bearer("tok".to_string()).header(),
            ("authorization", "Bearer tok".to_string())
        );
        assert_eq!(
            Credential::SecretKey("sk".to_string()).header(),
            ("x-secret-key", "sk".to_string())
        );
        assert_eq!(
            Credential::ClientId("id".to_string()).header(),
            ("x-client-id", "id".to_string())
        );
    }

    #[test]
    fn test_ecosystem_serialization() {
        let ecosystem = EcosystemContext::new("ecosystem.acme")
            .unwrap()
            .with_partner_id("partner-1")
            .unwrap();
        let json = serde_json::to_string(&ecosystem).unwrap();

        assert!(json.contains("\"partnerId\":\"partner-1\""));
        let back: EcosystemContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ecosystem);
    }
}
