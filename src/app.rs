//! Application wiring: one window, one container, one identity per process.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::service::ServiceConfig;
use crate::identity::{Auth2, CloudConfig, CredentialsFactory, FederationSettings, IdentityCell, IdentityFederator};
use crate::providers::{CognitoCredentialsFactory, GoogleTokenEndpoint};
use crate::router::{HashRouter, ViewContainer, Window};
use crate::views;

#[derive(Clone)]
pub struct LearnApp {
    pub window: Arc<Window>,
    pub router: Arc<HashRouter>,
    pub cloud: Arc<CloudConfig>,
    pub auth: Arc<Auth2>,
    pub federator: IdentityFederator,
}

impl LearnApp {
    /// Build the app with real Cognito and Google collaborators.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let cloud = Arc::new(CloudConfig::new());
        let factory = CognitoCredentialsFactory::new(cloud.clone(), config.identity.endpoint.clone())?;
        let auth = Arc::new(Auth2::new());
        if let Some(google) = &config.google {
            auth.install(Arc::new(GoogleTokenEndpoint::new(google.clone())?));
        } else {
            info!("no google client configured, silent re-authentication disabled");
        }

        let settings = FederationSettings {
            region: config.identity.region.clone(),
            identity_pool_id: config.identity.identity_pool_id.clone(),
            provider: config.identity.provider.clone(),
        };
        Ok(Self::new(settings, &config.app.landing_view, cloud, Arc::new(factory), auth))
    }

    pub fn new(
        settings: FederationSettings,
        landing_view: &str,
        cloud: Arc<CloudConfig>,
        factory: Arc<dyn CredentialsFactory>,
        auth: Arc<Auth2>,
    ) -> Self {
        let identity: Arc<IdentityCell> = Arc::new(IdentityCell::new());
        let registry = Arc::new(views::default_registry(identity.clone()));
        let router = Arc::new(HashRouter::new(registry, Arc::new(ViewContainer::new()), landing_view));
        let federator = IdentityFederator::new(settings, cloud.clone(), factory, auth.clone(), identity);

        Self {
            window: Arc::new(Window::default()),
            router,
            cloud,
            auth,
            federator,
        }
    }

    pub fn identity(&self) -> Arc<IdentityCell> {
        self.federator.identity()
    }

    /// Initial render plus the `hashchange` subscription.
    pub fn app_on_ready(&self) -> JoinHandle<()> {
        self.router.app_on_ready(self.window.clone())
    }
}
