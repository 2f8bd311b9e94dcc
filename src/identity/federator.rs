use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::helpers::time::seconds_until;
use crate::identity::broker::CredentialBroker;
use crate::identity::credentials::{CloudConfig, CredentialParams, CredentialsFactory};
use crate::identity::deferred::Deferred;
use crate::identity::error::{IdentityError, SignInError};
use crate::identity::google::{Auth2, GoogleUser};
use crate::identity::session::{Identity, SessionRefresher};
use crate::observability::metrics::get_metrics;

pub type IdentityCell = Deferred<Identity, IdentityError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederationSettings {
    pub region: String,
    pub identity_pool_id: String,
    pub provider: String,
}

/// Turns a Google sign-in into a federated cloud identity.
#[derive(Clone)]
pub struct IdentityFederator {
    settings: Arc<FederationSettings>,
    cloud: Arc<CloudConfig>,
    factory: Arc<dyn CredentialsFactory>,
    auth: Arc<Auth2>,
    broker: CredentialBroker,
    identity: Arc<IdentityCell>,
    /// set by the first accepted sign-in
    accepted: Arc<AtomicBool>,
}

impl IdentityFederator {
    pub fn new(
        settings: FederationSettings,
        cloud: Arc<CloudConfig>,
        factory: Arc<dyn CredentialsFactory>,
        auth: Arc<Auth2>,
        identity: Arc<IdentityCell>,
    ) -> Self {
        let broker = CredentialBroker::new(cloud.clone());
        Self {
            settings: Arc::new(settings),
            cloud,
            factory,
            auth,
            broker,
            identity,
            accepted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn identity(&self) -> Arc<IdentityCell> {
        self.identity.clone()
    }

    /// Sign-in event handler.
    ///
    /// Region and credentials are installed before this returns; the
    /// credentials refresh and the identity settlement happen on the
    /// returned task.
    ///
    /// Only the first sign-in of a session is federated. Later ones are
    /// refused without touching the installed credentials, which stay bound
    /// to the identity already handed out.
    pub fn on_google_sign_in(&self, user: Arc<dyn GoogleUser>) -> Result<JoinHandle<()>, SignInError> {
        let metrics = get_metrics();
        if self.identity.is_settled() || self.accepted.swap(true, Ordering::SeqCst) {
            metrics.federation_failures.with_label_values(&["already_signed_in"]).inc();
            warn!(
                email = %user.get_basic_profile().get_email(),
                "sign-in already accepted for this session, ignoring"
            );
            return Err(SignInError::AlreadySignedIn);
        }
        metrics.federation_attempts.inc();

        let auth_response = user.get_auth_response();
        let id_token = auth_response.id_token;
        self.cloud.set_region(&self.settings.region);

        let params = CredentialParams::new(self.settings.identity_pool_id.as_str())
            .with_login(self.settings.provider.as_str(), id_token);
        if self.cloud.install(self.factory.create(params)).is_some() {
            warn!("replacing previously installed federated credentials");
        }
        info!(
            region = %self.settings.region,
            pool = %self.settings.identity_pool_id,
            token_expires_in = ?auth_response.expires_at.map(seconds_until),
            "federating google sign-in"
        );

        let federator = self.clone();
        Ok(tokio::spawn(async move {
            let outcome = federator.complete(user).await;
            if let Err(err) = &outcome {
                metrics.federation_failures.with_label_values(&[err.reason()]).inc();
                error!(error = %err, "federation failed");
            }
            if !federator.identity.settle(outcome) {
                warn!("identity already settled for this session, keeping the first one");
            }
        }))
    }

    async fn complete(&self, user: Arc<dyn GoogleUser>) -> Result<Identity, IdentityError> {
        let identity_id = self.broker.aws_refresh().await?;
        let email = user.get_basic_profile().get_email().to_owned();
        info!(identity_id = %identity_id, email = %email, "federated identity resolved");

        let refresher = SessionRefresher::new(
            self.cloud.clone(),
            self.auth.clone(),
            self.settings.provider.as_str(),
        );
        Ok(Identity::new(identity_id, email, refresher))
    }
}
