//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates:
//!   * identity pool id shape and its region prefix
//!   * provider / endpoint / token url
//!   * secret value sources
//!   * server / metrics / logging invariants
//!   * landing view is one the app registers

use tracing::{error, info};

use crate::config::service::{AppConfig, GoogleConfig, IdentityConfig, SecretValue, ServiceConfig};
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;
use crate::views::{LANDING_VIEW, PROBLEM_VIEW, PROFILE_VIEW};

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_identity(&cfg.identity, &mut errors);
    if let Some(google) = &cfg.google {
        validate_google(google, &mut errors);
    }
    validate_app(&cfg.app, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().config_validation_errors.inc_by(errors.len() as u64);
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.is_empty() {
        errors.push(format!(
            "settings.server.host '{}' must be valid",
            settings.server.host
        ));
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be an integer in range 0-65535",
            settings.server.port
        ));
    }

    // metrics endpoint start with '/'
    let metrics = &settings.metrics;
    if !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }

    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }
}

/// IDENTITY POOL VALIDATION
fn validate_identity(identity: &IdentityConfig, errors: &mut Vec<String>) {
    if identity.region.trim().is_empty() {
        errors.push("identity.region cannot be empty".to_string());
    }

    match identity.identity_pool_id.split_once(':') {
        Some((region, id)) if !region.is_empty() && !id.is_empty() => {
            if region != identity.region {
                errors.push(format!(
                    "identity.identity_pool_id '{}' belongs to region '{}', expected '{}'",
                    identity.identity_pool_id, region, identity.region
                ));
            }
        }
        _ => errors.push(format!(
            "identity.identity_pool_id '{}' must look like '<region>:<id>'",
            identity.identity_pool_id
        )),
    }

    if identity.provider.trim().is_empty() {
        errors.push("identity.provider cannot be empty".to_string());
    }
    if let Some(endpoint) = &identity.endpoint {
        validate_url("identity.endpoint", endpoint, errors);
    }
}

/// GOOGLE CLIENT VALIDATION
fn validate_google(google: &GoogleConfig, errors: &mut Vec<String>) {
    validate_secret_value("google.client_id", &google.client_id, errors);
    validate_secret_value("google.client_secret", &google.client_secret, errors);
    validate_secret_value("google.refresh_token", &google.refresh_token, errors);
    validate_url("google.token_url", &google.token_url, errors);
}

fn validate_app(app: &AppConfig, errors: &mut Vec<String>) {
    let known = [LANDING_VIEW, PROBLEM_VIEW, PROFILE_VIEW];
    if !known.contains(&app.landing_view.as_str()) {
        errors.push(format!(
            "app.landing_view '{}' is not a registered view; allowed: {:?}",
            app.landing_view, known
        ));
    }
}

fn validate_url(path: &str, url: &str, errors: &mut Vec<String>) {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("{} '{}' must be an http(s) url", path, url));
    }
}

fn validate_secret_value(path: &str, v: &SecretValue, errors: &mut Vec<String>) {
    match v {
        SecretValue::Literal { value } => {
            if value.trim().is_empty() {
                errors.push(format!("{}: literal value cannot be empty", path));
            }
        }
        SecretValue::FromEnv { from_env } => {
            if from_env.trim().is_empty() {
                errors.push(format!("{}: env name cannot be empty", path));
            }
        }
        SecretValue::FromFile { path: p } => {
            if p.trim().is_empty() {
                errors.push(format!("{}: file path cannot be empty", path));
            }
            // existence is checked when the value is resolved
        }
    }
}
