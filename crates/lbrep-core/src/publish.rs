// ── Target publisher ──

use lbrep_api::octavia::models::LoadBalancerTree;
use tracing::{debug, info};

use crate::api::TargetApi;
use crate::error::CoreError;

/// Submits a projected tree to the successor service in one request.
///
/// There is no rollback: if Octavia accepts the request, whatever it goes on
/// to provision is its own responsibility.
pub struct TargetPublisher<'a, T> {
    target: &'a T,
}

impl<'a, T: TargetApi> TargetPublisher<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self { target }
    }

    /// Create the load balancer and return its new id.
    pub async fn create(&self, tree: &LoadBalancerTree) -> Result<String, CoreError> {
        if let Ok(body) = serde_json::to_string(tree) {
            debug!(%body, "submitting load balancer tree");
        }

        let created = self
            .target
            .create_load_balancer(tree)
            .await
            .map_err(rejection)?;

        info!(
            id = %created.id,
            provisioning_status = created.provisioning_status.as_deref().unwrap_or("unknown"),
            "load balancer created"
        );
        Ok(created.id)
    }
}

fn rejection(err: lbrep_api::Error) -> CoreError {
    match err {
        lbrep_api::Error::Authentication { message } => CoreError::AuthenticationFailed { message },
        lbrep_api::Error::Api {
            status,
            message,
            body,
        } => CoreError::TargetCreationFailure {
            status: Some(status),
            message,
            payload: body,
        },
        lbrep_api::Error::Deserialization { message, body } => CoreError::TargetCreationFailure {
            status: None,
            message: format!("unreadable response: {message}"),
            payload: body,
        },
        other => CoreError::TargetCreationFailure {
            status: other.status(),
            message: other.to_string(),
            payload: String::new(),
        },
    }
}
