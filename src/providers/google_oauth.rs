use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::service::GoogleConfig;
use crate::identity::error::SilentReauthError;
use crate::identity::google::{AuthInstance, GoogleUser, IdTokenUser, Prompt, SignInOptions};
use crate::providers::resolve_secret;
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;

/// Google auth instance that signs the user in again with a stored refresh
/// token, so no consent screen is ever shown.
#[derive(Debug, Clone)]
pub struct GoogleTokenEndpoint {
    client: Client,
    config: GoogleConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl GoogleTokenEndpoint {
    pub fn new(config: GoogleConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS))
            .build()?;
        Ok(Self { client, config })
    }

    fn form(&self) -> Result<Vec<(&'static str, String)>, SilentReauthError> {
        let resolve = |name: &str, value| {
            resolve_secret(value).map_err(|e| SilentReauthError::Rejected(format!("google {}: {}", name, e)))
        };
        Ok(vec![
            ("grant_type", "refresh_token".to_owned()),
            ("client_id", resolve("client_id", &self.config.client_id)?),
            ("client_secret", resolve("client_secret", &self.config.client_secret)?),
            ("refresh_token", resolve("refresh_token", &self.config.refresh_token)?),
        ])
    }
}

#[async_trait]
impl AuthInstance for GoogleTokenEndpoint {
    async fn sign_in(&self, options: SignInOptions) -> Result<Arc<dyn GoogleUser>, SilentReauthError> {
        if options.prompt == Prompt::Consent {
            return Err(SilentReauthError::InteractionRequired);
        }
        debug!(prompt = options.prompt.as_str(), "re-authenticating with google");

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&self.form()?)
            .send()
            .await
            .map_err(|e| SilentReauthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SilentReauthError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            warn!(status = %status, error = %error.error, "google token endpoint refused refresh");
            // revoked or expired grant: only an interactive sign-in can fix it
            if error.error == "invalid_grant" {
                return Err(SilentReauthError::InteractionRequired);
            }
            return Err(SilentReauthError::Rejected(
                error.error_description.unwrap_or(if error.error.is_empty() {
                    status.to_string()
                } else {
                    error.error
                }),
            ));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SilentReauthError::Rejected(format!("invalid token response: {}", e)))?;
        let id_token = token
            .id_token
            .ok_or_else(|| SilentReauthError::Rejected("token response has no id_token".to_owned()))?;
        let user = IdTokenUser::from_id_token(&id_token).map_err(|e| SilentReauthError::Rejected(e.to_string()))?;
        Ok(Arc::new(user))
    }
}
