use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::helpers::time::seconds_until;
use crate::identity::credentials::{
    CloudConfig, CredentialParams, CredentialsFactory, FederatedCredentials, RefreshCallback, SharedCredentials,
};
use crate::identity::error::CredentialsError;
use crate::utils::constants::{COGNITO_CONTENT_TYPE, COGNITO_TARGET_PREFIX, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_REGION};

/// Temporary cloud credentials issued for a federated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsCredentials {
    #[serde(rename = "AccessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "SecretKey")]
    pub secret_key: String,
    #[serde(rename = "SessionToken")]
    pub session_token: String,
    /// unix seconds
    #[serde(rename = "Expiration", default, deserialize_with = "deserialize_epoch")]
    pub expiration: Option<u64>,
}

/// Builds [`CognitoIdentityCredentials`] against the region configured at
/// construction time.
#[derive(Debug, Clone)]
pub struct CognitoCredentialsFactory {
    client: Client,
    cloud: Arc<CloudConfig>,
    endpoint: Option<String>,
}

impl CognitoCredentialsFactory {
    pub fn new(cloud: Arc<CloudConfig>, endpoint: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS))
            .build()?;
        Ok(Self { client, cloud, endpoint })
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            let region = self.cloud.region().unwrap_or_else(|| DEFAULT_REGION.to_owned());
            format!("https://cognito-identity.{}.amazonaws.com/", region)
        })
    }
}

impl CredentialsFactory for CognitoCredentialsFactory {
    fn create(&self, params: CredentialParams) -> SharedCredentials {
        Arc::new(CognitoIdentityCredentials::new(self.client.clone(), self.endpoint(), params))
    }
}

#[derive(Debug)]
struct CognitoState {
    params: CredentialParams,
    identity_id: Option<String>,
    aws: Option<AwsCredentials>,
}

#[derive(Debug)]
struct CognitoInner {
    client: Client,
    endpoint: String,
    state: Mutex<CognitoState>,
}

/// Federated credentials resolved through `GetId` and
/// `GetCredentialsForIdentity`.
#[derive(Debug, Clone)]
pub struct CognitoIdentityCredentials {
    inner: Arc<CognitoInner>,
}

#[derive(Debug, Deserialize)]
struct GetIdResponse {
    #[serde(rename = "IdentityId")]
    identity_id: String,
}

#[derive(Debug, Deserialize)]
struct GetCredentialsResponse {
    #[serde(rename = "IdentityId")]
    identity_id: String,
    #[serde(rename = "Credentials")]
    credentials: AwsCredentials,
}

#[derive(Debug, Default, Deserialize)]
struct CognitoErrorBody {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(default, alias = "Message")]
    message: String,
}

impl CognitoIdentityCredentials {
    pub fn new(client: Client, endpoint: String, params: CredentialParams) -> Self {
        Self {
            inner: Arc::new(CognitoInner {
                client,
                endpoint,
                state: Mutex::new(CognitoState {
                    params,
                    identity_id: None,
                    aws: None,
                }),
            }),
        }
    }

    /// Last credentials obtained by `refresh`.
    pub fn aws_credentials(&self) -> Option<AwsCredentials> {
        self.inner.state.lock().aws.clone()
    }
}

impl FederatedCredentials for CognitoIdentityCredentials {
    fn identity_id(&self) -> Option<String> {
        self.inner.state.lock().identity_id.clone()
    }

    fn params(&self) -> CredentialParams {
        self.inner.state.lock().params.clone()
    }

    fn set_login(&self, provider: &str, token: String) {
        self.inner
            .state
            .lock()
            .params
            .logins
            .insert(provider.to_owned(), token);
    }

    fn refresh(&self, callback: RefreshCallback) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                callback(Some(CredentialsError::Transport(err.to_string())));
                return;
            }
        };
        let inner = self.inner.clone();
        runtime.spawn(async move {
            callback(inner.fetch().await.err());
        });
    }
}

impl CognitoInner {
    async fn fetch(&self) -> Result<(), CredentialsError> {
        let (params, known_identity_id) = {
            let state = self.state.lock();
            (state.params.clone(), state.identity_id.clone())
        };

        let identity_id = match known_identity_id {
            Some(identity_id) => identity_id,
            None => {
                let response: GetIdResponse = self
                    .call(
                        "GetId",
                        json!({"IdentityPoolId": params.identity_pool_id, "Logins": params.logins}),
                    )
                    .await?;
                info!(identity_id = %response.identity_id, "identity id assigned");
                response.identity_id
            }
        };

        let response: GetCredentialsResponse = self
            .call(
                "GetCredentialsForIdentity",
                json!({"IdentityId": identity_id, "Logins": params.logins}),
            )
            .await?;
        debug!(
            identity_id = %response.identity_id,
            expires_in = ?response.credentials.expiration.map(seconds_until),
            "cloud credentials issued"
        );

        let mut state = self.state.lock();
        state.identity_id = Some(response.identity_id);
        state.aws = Some(response.credentials);
        Ok(())
    }

    async fn call<T: DeserializeOwned>(&self, action: &str, body: serde_json::Value) -> Result<T, CredentialsError> {
        let payload = serde_json::to_vec(&body).map_err(|e| CredentialsError::Transport(e.to_string()))?;
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Amz-Target", format!("{}.{}", COGNITO_TARGET_PREFIX, action))
            .header(http::header::CONTENT_TYPE, COGNITO_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| CredentialsError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CredentialsError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error: CognitoErrorBody = serde_json::from_str(&text).unwrap_or_default();
            // `__type` may be namespaced: "com.amazonaws...#NotAuthorizedException"
            let code = error
                .kind
                .rsplit('#')
                .next()
                .filter(|code| !code.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| status.to_string());
            return Err(CredentialsError::Provider {
                code,
                message: error.message,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| CredentialsError::Transport(format!("invalid {} response: {}", action, e)))
    }
}

fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let epoch: Option<f64> = Option::deserialize(deserializer)?;
    Ok(epoch.map(|secs| secs as u64))
}
