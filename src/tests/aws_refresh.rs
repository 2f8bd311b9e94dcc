#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::identity::{CloudConfig, CredentialBroker, CredentialParams, CredentialsError};
    use crate::tests::common::{FakeCredentials, RefreshScript, POOL_ID};

    fn broker_with(script: RefreshScript) -> (CredentialBroker, Arc<FakeCredentials>) {
        let cloud = Arc::new(CloudConfig::new());
        let credentials = FakeCredentials::new(CredentialParams::new(POOL_ID), script);
        cloud.install(credentials.clone());
        (CredentialBroker::new(cloud), credentials)
    }

    #[tokio::test]
    async fn resolves_with_the_identity_id_on_success() {
        let (broker, _) = broker_with(RefreshScript::Succeed("COGNITO_ID".into()));
        assert_eq!(broker.aws_refresh().await, Ok("COGNITO_ID".to_string()));
    }

    #[tokio::test]
    async fn rejects_with_the_callback_error_unchanged() {
        let err = CredentialsError::Provider {
            code: "error".into(),
            message: "refresh failed".into(),
        };
        let (broker, _) = broker_with(RefreshScript::Fail(err.clone()));
        assert_eq!(broker.aws_refresh().await, Err(err));
    }

    #[tokio::test]
    async fn every_call_refreshes_again() {
        let (broker, credentials) = broker_with(RefreshScript::Succeed("COGNITO_ID".into()));
        broker.aws_refresh().await.unwrap();
        broker.aws_refresh().await.unwrap();
        assert_eq!(credentials.refreshes(), 2);
    }

    #[tokio::test]
    async fn dropped_callback_is_reported() {
        let (broker, _) = broker_with(RefreshScript::Drop);
        assert_eq!(broker.aws_refresh().await, Err(CredentialsError::Abandoned));
    }

    #[tokio::test]
    async fn missing_credentials_are_reported() {
        let broker = CredentialBroker::new(Arc::new(CloudConfig::new()));
        assert_eq!(broker.aws_refresh().await, Err(CredentialsError::NotInstalled));
    }
}
