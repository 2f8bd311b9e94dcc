//! HTTP-backed implementations of the identity SDK boundaries.
//!
//! - `cognito`: federated credentials over the Cognito Identity JSON API
//! - `google_oauth`: silent Google re-authentication through the OAuth2 token endpoint

use std::{env, fs};

use anyhow::{anyhow, Result};

use crate::config::service::SecretValue;

pub mod cognito;
pub mod google_oauth;

pub use cognito::{AwsCredentials, CognitoCredentialsFactory, CognitoIdentityCredentials};
pub use google_oauth::GoogleTokenEndpoint;

pub fn resolve_secret(value: &SecretValue) -> Result<String> {
    match value {
        SecretValue::Literal { value } => Ok(value.to_owned()),
        SecretValue::FromEnv { from_env } => {
            env::var(from_env).map_err(|err| anyhow!("env '{}': {}", from_env, err))
        }
        SecretValue::FromFile { path } => fs::read_to_string(path)
            .map_err(|err| anyhow!("file '{}': {}", path, err))
            .map(|res| res.trim().to_string()),
    }
}
