//! Boundary of the third-party sign-in SDK.
//!
//! A signed-in user exposes an auth response (the ID token) and a basic
//! profile. The SDK's auth instance can sign the user in again; with
//! [`Prompt::Login`] it reuses the consent already granted.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::identity::error::SilentReauthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: String,
}

impl BasicProfile {
    pub fn get_email(&self) -> &str {
        &self.email
    }
}

/// Handle to a user signed in with Google.
pub trait GoogleUser: Send + Sync {
    fn get_auth_response(&self) -> AuthResponse;
    fn get_basic_profile(&self) -> BasicProfile;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Re-authenticate against the existing grant, no consent screen.
    Login,
    Consent,
    SelectAccount,
}

impl Prompt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prompt::Login => "login",
            Prompt::Consent => "consent",
            Prompt::SelectAccount => "select_account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInOptions {
    pub prompt: Prompt,
}

impl SignInOptions {
    pub fn silent() -> Self {
        Self { prompt: Prompt::Login }
    }
}

/// The SDK's current auth session.
#[async_trait]
pub trait AuthInstance: Send + Sync {
    async fn sign_in(&self, options: SignInOptions) -> Result<Arc<dyn GoogleUser>, SilentReauthError>;
}

/// Holder of the SDK's auth instance, looked up at call time.
#[derive(Default)]
pub struct Auth2 {
    instance: RwLock<Option<Arc<dyn AuthInstance>>>,
}

impl Auth2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(instance: Arc<dyn AuthInstance>) -> Self {
        let auth = Self::new();
        auth.install(instance);
        auth
    }

    pub fn install(&self, instance: Arc<dyn AuthInstance>) {
        *self.instance.write() = Some(instance);
    }

    pub fn get_auth_instance(&self) -> Result<Arc<dyn AuthInstance>, SilentReauthError> {
        self.instance
            .read()
            .clone()
            .ok_or(SilentReauthError::NotInitialized)
    }
}

impl std::fmt::Debug for Auth2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth2")
            .field("initialized", &self.instance.read().is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    exp: Option<u64>,
}

/// A [`GoogleUser`] reconstructed from a raw Google ID token.
///
/// The token signature is not checked here; the identity pool validates the
/// token when it is exchanged.
#[derive(Debug, Clone)]
pub struct IdTokenUser {
    auth_response: AuthResponse,
    profile: BasicProfile,
}

impl IdTokenUser {
    pub fn from_id_token(id_token: &str) -> Result<Self> {
        let claims = decode_id_token_claims(id_token)?;
        Ok(Self {
            auth_response: AuthResponse {
                id_token: id_token.to_owned(),
                expires_at: claims.exp,
            },
            profile: BasicProfile {
                id: claims.sub,
                name: claims.name,
                email: claims.email.unwrap_or_default(),
            },
        })
    }
}

impl GoogleUser for IdTokenUser {
    fn get_auth_response(&self) -> AuthResponse {
        self.auth_response.clone()
    }

    fn get_basic_profile(&self) -> BasicProfile {
        self.profile.clone()
    }
}

fn decode_id_token_claims(id_token: &str) -> Result<IdTokenClaims> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow!("invalid JWT format"));
    }

    let payload = parts[1].trim_end_matches('=');
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| anyhow!("base64 decode error: {}", e))?;

    serde_json::from_slice::<IdTokenClaims>(&decoded)
        .map_err(|e| anyhow!("invalid JWT payload: {}", e))
}

#[cfg(test)]
pub(crate) mod tests {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    use super::{Auth2, GoogleUser, IdTokenUser, Prompt, SignInOptions};
    use crate::identity::error::SilentReauthError;

    pub(crate) fn sample_id_token(email: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"1234","email":"{}","name":"Foo Bar","exp":4102444800}}"#,
            email
        ));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn id_token_user_exposes_token_and_profile() {
        let token = sample_id_token("foo@bar.com");
        let user = IdTokenUser::from_id_token(&token).unwrap();

        let response = user.get_auth_response();
        assert_eq!(response.id_token, token);
        assert_eq!(response.expires_at, Some(4102444800));

        let profile = user.get_basic_profile();
        assert_eq!(profile.get_email(), "foo@bar.com");
        assert_eq!(profile.id.as_deref(), Some("1234"));
    }

    #[test]
    fn malformed_id_token_is_rejected() {
        assert!(IdTokenUser::from_id_token("not-a-jwt").is_err());
        assert!(IdTokenUser::from_id_token("a.%%%.c").is_err());
    }

    #[test]
    fn silent_options_use_login_prompt() {
        let options = SignInOptions::silent();
        assert_eq!(options.prompt, Prompt::Login);
        assert_eq!(options.prompt.as_str(), "login");
        assert_eq!(
            serde_json::to_value(options).unwrap(),
            serde_json::json!({"prompt": "login"})
        );
    }

    #[test]
    fn empty_auth2_has_no_instance() {
        let auth = Auth2::new();
        assert_eq!(auth.get_auth_instance().err(), Some(SilentReauthError::NotInitialized));
    }
}
