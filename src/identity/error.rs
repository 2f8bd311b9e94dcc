use thiserror::Error;

/// Errors reported by the cloud identity SDK through its refresh callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("identity provider rejected the request: {code}: {message}")]
    Provider { code: String, message: String },
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("no federated credentials installed")]
    NotInstalled,
    #[error("credentials refreshed without an identity id")]
    MissingIdentityId,
    #[error("credentials refresh callback was dropped without being called")]
    Abandoned,
}

/// Errors from the third-party sign-in SDK when asked to re-authenticate
/// without a consent prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SilentReauthError {
    #[error("sign-in SDK has no auth instance")]
    NotInitialized,
    #[error("interactive consent required")]
    InteractionRequired,
    #[error("silent re-authentication rejected: {0}")]
    Rejected(String),
    #[error("sign-in endpoint unreachable: {0}")]
    Transport(String),
}

/// Refusals of the sign-in handler itself, before anything is federated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    #[error("a sign-in was already accepted for this session")]
    AlreadySignedIn,
}

/// Failure channel of the process-wide identity and of `Identity::refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Reauth(#[from] SilentReauthError),
}

impl IdentityError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            IdentityError::Credentials(CredentialsError::Provider { .. }) => "provider",
            IdentityError::Credentials(CredentialsError::Transport(_)) => "transport",
            IdentityError::Credentials(CredentialsError::NotInstalled) => "not_installed",
            IdentityError::Credentials(CredentialsError::MissingIdentityId) => "missing_identity_id",
            IdentityError::Credentials(CredentialsError::Abandoned) => "abandoned",
            IdentityError::Reauth(SilentReauthError::NotInitialized) => "not_initialized",
            IdentityError::Reauth(SilentReauthError::InteractionRequired) => "interaction_required",
            IdentityError::Reauth(SilentReauthError::Rejected(_)) => "rejected",
            IdentityError::Reauth(SilentReauthError::Transport(_)) => "transport",
        }
    }
}
