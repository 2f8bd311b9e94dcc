use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::identity::error::CredentialsError;

/// Completion callback handed to [`FederatedCredentials::refresh`].
/// Called exactly once: `None` on success, `Some(err)` on failure.
pub type RefreshCallback = Box<dyn FnOnce(Option<CredentialsError>) + Send + 'static>;

pub type SharedCredentials = Arc<dyn FederatedCredentials>;

/// Constructor arguments of a federated credentials object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialParams {
    #[serde(rename = "IdentityPoolId")]
    pub identity_pool_id: String,
    /// provider name -> bearer token issued by that provider
    #[serde(rename = "Logins")]
    pub logins: BTreeMap<String, String>,
}

impl CredentialParams {
    pub fn new(identity_pool_id: impl Into<String>) -> Self {
        Self {
            identity_pool_id: identity_pool_id.into(),
            logins: BTreeMap::new(),
        }
    }

    pub fn with_login(mut self, provider: impl Into<String>, token: impl Into<String>) -> Self {
        self.logins.insert(provider.into(), token.into());
        self
    }
}

/// Credentials object owned by the cloud identity SDK.
///
/// Implementations mutate in place behind `&self` so every holder of the
/// shared reference observes token rewrites.
pub trait FederatedCredentials: Send + Sync {
    /// Provider-assigned identity id, known after the first successful refresh.
    fn identity_id(&self) -> Option<String>;

    fn params(&self) -> CredentialParams;

    /// Overwrite `params.Logins[provider]`.
    fn set_login(&self, provider: &str, token: String);

    /// Start an asynchronous refresh; `callback` reports the outcome.
    fn refresh(&self, callback: RefreshCallback);
}

/// The SDK's credentials constructor.
pub trait CredentialsFactory: Send + Sync {
    fn create(&self, params: CredentialParams) -> SharedCredentials;
}

/// The SDK's global configuration: region and the active credentials.
///
/// Owned by the application and injected where needed instead of living in
/// process-global state.
#[derive(Default)]
pub struct CloudConfig {
    region: RwLock<Option<String>>,
    credentials: RwLock<Option<SharedCredentials>>,
}

impl CloudConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_region(&self, region: &str) {
        *self.region.write() = Some(region.to_owned());
    }

    pub fn region(&self) -> Option<String> {
        self.region.read().clone()
    }

    /// Replace the active credentials, returning the previous ones.
    pub fn install(&self, credentials: SharedCredentials) -> Option<SharedCredentials> {
        self.credentials.write().replace(credentials)
    }

    /// Live reference to the active credentials.
    pub fn credentials(&self) -> Option<SharedCredentials> {
        self.credentials.read().clone()
    }
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("region", &*self.region.read())
            .field("credentials", &self.credentials.read().as_ref().map(|c| c.params()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::CredentialParams;
    use serde_json::json;

    #[test]
    fn params_serialize_with_sdk_field_names() {
        let params = CredentialParams::new("pool").with_login("accounts.google.com", "GOOGLE_ID");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"IdentityPoolId": "pool", "Logins": {"accounts.google.com": "GOOGLE_ID"}})
        );
    }
}
