use serde::Deserialize;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{DEFAULT_GOOGLE_TOKEN_URL, DEFAULT_REGION, GOOGLE_PROVIDER};
use crate::views::LANDING_VIEW;


/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub identity: IdentityConfig,
    /// silent re-authentication is unavailable without it
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub app: AppConfig,
}

/// ================================
/// Cloud identity pool
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// `<region>:<id>`
    pub identity_pool_id: String,
    /// Logins key of the federated provider
    #[serde(default = "default_provider")]
    pub provider: String,
    /// overrides `https://cognito-identity.<region>.amazonaws.com/`
    pub endpoint: Option<String>,
}

/// ================================
/// Google OAuth2 client used for silent re-authentication
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    pub client_id: SecretValue,
    pub client_secret: SecretValue,
    pub refresh_token: SecretValue,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_landing_view")]
    pub landing_view: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { landing_view: default_landing_view() }
    }
}

/// Secret value sources
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SecretValue {
    Literal {
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

fn default_provider() -> String {
    GOOGLE_PROVIDER.to_owned()
}

fn default_token_url() -> String {
    DEFAULT_GOOGLE_TOKEN_URL.to_owned()
}

fn default_landing_view() -> String {
    LANDING_VIEW.to_owned()
}
