use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::identity::broker::CredentialBroker;
use crate::identity::credentials::CloudConfig;
use crate::identity::error::{CredentialsError, IdentityError};
use crate::identity::google::{Auth2, SignInOptions};
use crate::observability::metrics::get_metrics;

/// Re-runs Google sign-in without a consent prompt and threads the new ID
/// token into the live federated credentials.
#[derive(Debug, Clone)]
pub struct SessionRefresher {
    cloud: Arc<CloudConfig>,
    auth: Arc<Auth2>,
    broker: CredentialBroker,
    provider: String,
}

impl SessionRefresher {
    pub fn new(cloud: Arc<CloudConfig>, auth: Arc<Auth2>, provider: impl Into<String>) -> Self {
        let broker = CredentialBroker::new(cloud.clone());
        Self {
            cloud,
            auth,
            broker,
            provider: provider.into(),
        }
    }

    /// Rewrite `Logins[provider]` on the installed credentials with a freshly
    /// issued token.
    ///
    /// This does not refresh the cloud-side credentials; call
    /// [`CredentialBroker::aws_refresh`] afterwards, or use
    /// [`SessionRefresher::refresh_and_renew`].
    pub async fn refresh(&self) -> Result<(), IdentityError> {
        let metrics = get_metrics();
        let outcome = self.rethread_token().await;
        match &outcome {
            Ok(()) => {
                metrics.session_refresh.with_label_values(&["ok"]).inc();
                info!(provider = %self.provider, "provider token refreshed silently");
            }
            Err(err) => {
                metrics.session_refresh.with_label_values(&[err.reason()]).inc();
                warn!(error = %err, "silent re-authentication failed");
            }
        }
        outcome
    }

    /// `refresh` followed by a cloud credentials refresh; returns the identity id.
    pub async fn refresh_and_renew(&self) -> Result<String, IdentityError> {
        self.refresh().await?;
        Ok(self.broker.aws_refresh().await?)
    }

    async fn rethread_token(&self) -> Result<(), IdentityError> {
        let instance = self.auth.get_auth_instance()?;
        let user_update = instance.sign_in(SignInOptions::silent()).await?;
        let token = user_update.get_auth_response().id_token;

        // looked up after sign-in so a credentials swap in between is honoured
        let credentials = self.cloud.credentials().ok_or(CredentialsError::NotInstalled)?;
        credentials.set_login(&self.provider, token);
        Ok(())
    }
}

/// A federated user, produced once per successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    refresher: SessionRefresher,
}

impl Identity {
    pub fn new(id: String, email: String, refresher: SessionRefresher) -> Self {
        Self { id, email, refresher }
    }

    pub async fn refresh(&self) -> Result<(), IdentityError> {
        self.refresher.refresh().await
    }

    pub async fn refresh_and_renew(&self) -> Result<String, IdentityError> {
        self.refresher.refresh_and_renew().await
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.email == other.email
    }
}
