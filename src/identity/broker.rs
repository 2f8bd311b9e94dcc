use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::identity::credentials::CloudConfig;
use crate::identity::error::CredentialsError;
use crate::observability::metrics::get_metrics;

/// Bridges the SDK's callback-style credentials refresh into a future.
#[derive(Debug, Clone)]
pub struct CredentialBroker {
    cloud: Arc<CloudConfig>,
}

impl CredentialBroker {
    pub fn new(cloud: Arc<CloudConfig>) -> Self {
        Self { cloud }
    }

    /// Refresh the installed credentials once and return their identity id.
    ///
    /// A callback error is returned unchanged. No caching, no retry: every
    /// call invokes the SDK again.
    pub async fn aws_refresh(&self) -> Result<String, CredentialsError> {
        let credentials = self.cloud.credentials().ok_or(CredentialsError::NotInstalled)?;
        let metrics = get_metrics();
        let start = Instant::now();

        let (tx, rx) = oneshot::channel();
        credentials.refresh(Box::new(move |err| {
            let _ = tx.send(err);
        }));

        let outcome = match rx.await {
            Ok(None) => credentials.identity_id().ok_or(CredentialsError::MissingIdentityId),
            Ok(Some(err)) => Err(err),
            Err(_) => Err(CredentialsError::Abandoned),
        };

        metrics
            .credential_refresh_duration
            .observe(start.elapsed().as_secs_f64());
        match &outcome {
            Ok(identity_id) => {
                metrics.credential_refresh.with_label_values(&["ok"]).inc();
                debug!(identity_id = %identity_id, "credentials refreshed");
            }
            Err(err) => {
                metrics.credential_refresh.with_label_values(&["error"]).inc();
                warn!(error = %err, "credentials refresh failed");
            }
        }
        outcome
    }
}
