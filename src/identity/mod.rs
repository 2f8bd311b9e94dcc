//! Google Sign-In federated into cloud identity credentials.
//!
//! - `credentials`: SDK boundary: credentials objects, their constructor, the config slot
//! - `broker`: callback-to-future bridge around credentials refresh
//! - `federator`: sign-in handler resolving the process-wide identity
//! - `session`: silent re-authentication bound to a resolved identity

pub mod broker;
pub mod credentials;
pub mod deferred;
pub mod error;
pub mod federator;
pub mod google;
pub mod session;

pub use broker::CredentialBroker;
pub use credentials::{CloudConfig, CredentialParams, CredentialsFactory, FederatedCredentials, SharedCredentials};
pub use deferred::Deferred;
pub use error::{CredentialsError, IdentityError, SignInError, SilentReauthError};
pub use federator::{FederationSettings, IdentityCell, IdentityFederator};
pub use google::{Auth2, AuthInstance, AuthResponse, BasicProfile, GoogleUser, IdTokenUser, Prompt, SignInOptions};
pub use session::{Identity, SessionRefresher};
