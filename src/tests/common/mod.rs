// src/tests/common/mod.rs
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::app::LearnApp;
use crate::identity::{
    Auth2, AuthInstance, AuthResponse, BasicProfile, CloudConfig, CredentialParams, CredentialsError,
    CredentialsFactory, FederatedCredentials, FederationSettings, GoogleUser, SharedCredentials,
    SignInOptions, SilentReauthError,
};
use crate::identity::credentials::RefreshCallback;
use crate::utils::constants::{DEFAULT_REGION, GOOGLE_PROVIDER};

pub const POOL_ID: &str = "ap-northeast-1:00000000-0000-0000-0000-000000000000";

pub fn federation_settings() -> FederationSettings {
    FederationSettings {
        region: DEFAULT_REGION.to_owned(),
        identity_pool_id: POOL_ID.to_owned(),
        provider: GOOGLE_PROVIDER.to_owned(),
    }
}

/// How a fake credentials object answers `refresh`.
#[derive(Debug, Clone)]
pub enum RefreshScript {
    /// report success and expose this identity id
    Succeed(String),
    /// report this error through the callback
    Fail(CredentialsError),
    /// drop the callback without calling it
    Drop,
}

/// Credentials object calling its refresh callback synchronously.
pub struct FakeCredentials {
    params: Mutex<CredentialParams>,
    identity_id: Mutex<Option<String>>,
    script: RefreshScript,
    refreshes: AtomicUsize,
}

impl FakeCredentials {
    pub fn new(params: CredentialParams, script: RefreshScript) -> Arc<Self> {
        Arc::new(Self {
            params: Mutex::new(params),
            identity_id: Mutex::new(None),
            script,
            refreshes: AtomicUsize::new(0),
        })
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl FederatedCredentials for FakeCredentials {
    fn identity_id(&self) -> Option<String> {
        self.identity_id.lock().clone()
    }

    fn params(&self) -> CredentialParams {
        self.params.lock().clone()
    }

    fn set_login(&self, provider: &str, token: String) {
        self.params.lock().logins.insert(provider.to_owned(), token);
    }

    fn refresh(&self, callback: RefreshCallback) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            RefreshScript::Succeed(identity_id) => {
                *self.identity_id.lock() = Some(identity_id.clone());
                callback(None);
            }
            RefreshScript::Fail(err) => callback(Some(err.clone())),
            RefreshScript::Drop => drop(callback),
        }
    }
}

/// Records constructor arguments, like a spy on the SDK constructor.
pub struct RecordingFactory {
    script: RefreshScript,
    pub created: Mutex<Vec<CredentialParams>>,
    pub instances: Mutex<Vec<Arc<FakeCredentials>>>,
}

impl RecordingFactory {
    pub fn new(script: RefreshScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            created: Mutex::new(Vec::new()),
            instances: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding(identity_id: &str) -> Arc<Self> {
        Self::new(RefreshScript::Succeed(identity_id.to_owned()))
    }
}

impl CredentialsFactory for RecordingFactory {
    fn create(&self, params: CredentialParams) -> SharedCredentials {
        self.created.lock().push(params.clone());
        let credentials = FakeCredentials::new(params, self.script.clone());
        self.instances.lock().push(credentials.clone());
        credentials
    }
}

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id_token: String,
    pub email: String,
}

impl FakeUser {
    pub fn new(id_token: &str, email: &str) -> Arc<Self> {
        Arc::new(Self {
            id_token: id_token.to_owned(),
            email: email.to_owned(),
        })
    }
}

impl GoogleUser for FakeUser {
    fn get_auth_response(&self) -> AuthResponse {
        AuthResponse {
            id_token: self.id_token.clone(),
            expires_at: None,
        }
    }

    fn get_basic_profile(&self) -> BasicProfile {
        BasicProfile {
            email: self.email.clone(),
            ..BasicProfile::default()
        }
    }
}

/// Auth instance answering every sign-in the same way and recording options.
pub struct FakeAuthInstance {
    outcome: Result<String, SilentReauthError>,
    pub calls: Mutex<Vec<SignInOptions>>,
}

impl FakeAuthInstance {
    pub fn issuing(id_token: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(id_token.to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn refusing(err: SilentReauthError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl AuthInstance for FakeAuthInstance {
    async fn sign_in(&self, options: SignInOptions) -> Result<Arc<dyn GoogleUser>, SilentReauthError> {
        self.calls.lock().push(options);
        let id_token = self.outcome.clone()?;
        let user: Arc<dyn GoogleUser> = FakeUser::new(&id_token, "foo@bar.com");
        Ok(user)
    }
}

/// App wired with fakes in place of Cognito and Google.
pub fn fake_app(factory: Arc<RecordingFactory>, auth_instance: Option<Arc<FakeAuthInstance>>) -> LearnApp {
    let auth = match auth_instance {
        Some(instance) => Arc::new(Auth2::with_instance(instance)),
        None => Arc::new(Auth2::new()),
    };
    LearnApp::new(
        federation_settings(),
        crate::views::LANDING_VIEW,
        Arc::new(CloudConfig::new()),
        factory,
        auth,
    )
}

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
