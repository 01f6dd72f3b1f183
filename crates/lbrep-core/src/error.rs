// ── Core error types ──
//
// Run-level failures of a replication. The `From<lbrep_api::Error>` impl
// covers session establishment; collection and publication map their own
// API failures into `SourceUnreachable` / `TargetCreationFailure` so the
// operator learns which side of the migration broke.

use std::path::PathBuf;

use thiserror::Error;

use crate::index::ResourceKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Missing credential: {name}")]
    MissingCredential {
        name: &'static str,
        /// Environment variable that would have supplied it.
        env: &'static str,
    },

    #[error("Cannot connect to {service}: {reason}")]
    ConnectionFailed { service: String, reason: String },

    // ── Source errors ────────────────────────────────────────────────
    #[error("Cannot fetch {kind} {id} from the source: {reason}")]
    SourceUnreachable {
        kind: ResourceKind,
        id: String,
        reason: String,
    },

    // ── Snapshot errors ──────────────────────────────────────────────
    #[error("Snapshot {} belongs to load balancer {found}, not {expected}", .path.display())]
    SnapshotIdentityMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Malformed snapshot {}: {reason}", .path.display())]
    MalformedSnapshot { path: PathBuf, reason: String },

    #[error("Cannot access snapshot {}: {source}", .path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Graph errors ─────────────────────────────────────────────────
    #[error("Incomplete graph: {kind} {id} referenced by {referenced_by} was never collected")]
    MissingResource {
        kind: ResourceKind,
        id: String,
        referenced_by: String,
    },

    // ── Target errors ────────────────────────────────────────────────
    #[error("Target rejected the load balancer: {message}")]
    TargetCreationFailure {
        status: Option<u16>,
        message: String,
        /// Raw response body from the target API.
        payload: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lbrep_api::Error> for CoreError {
    fn from(err: lbrep_api::Error) -> Self {
        match err {
            lbrep_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            lbrep_api::Error::Api {
                status: 401, message, ..
            } => CoreError::AuthenticationFailed { message },
            lbrep_api::Error::EndpointNotFound { .. } | lbrep_api::Error::InvalidUrl(_) => {
                CoreError::Config {
                    message: err.to_string(),
                }
            }
            lbrep_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                service: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                reason: err.to_string(),
            },
            other => CoreError::ConnectionFailed {
                service: "OpenStack API".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl CoreError {
    /// Collection failure for `kind`/`id`.
    pub(crate) fn unreachable(kind: ResourceKind, id: &str, err: &lbrep_api::Error) -> Self {
        CoreError::SourceUnreachable {
            kind,
            id: id.to_owned(),
            reason: err.to_string(),
        }
    }

    /// Dangling reference found while projecting.
    pub(crate) fn missing(kind: ResourceKind, id: &str, referenced_by: impl Into<String>) -> Self {
        CoreError::MissingResource {
            kind,
            id: id.to_owned(),
            referenced_by: referenced_by.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_maps_to_authentication_failed() {
        let err: CoreError = lbrep_api::Error::Authentication {
            message: "bad password".into(),
        }
        .into();
        assert!(matches!(err, CoreError::AuthenticationFailed { ref message } if message == "bad password"));
    }

    #[test]
    fn missing_endpoint_is_a_config_error() {
        let err: CoreError = lbrep_api::Error::EndpointNotFound {
            service: "load-balancer".into(),
            interface: "public".into(),
            region: Some("RegionTwo".into()),
        }
        .into();
        match err {
            CoreError::Config { message } => assert!(message.contains("RegionTwo")),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_names_the_resource() {
        let api = lbrep_api::Error::Timeout { timeout_secs: 30 };
        let err = CoreError::unreachable(ResourceKind::Pool, "pool-1", &api);
        assert_eq!(
            err.to_string(),
            "Cannot fetch pool pool-1 from the source: Request timed out after 30s"
        );
    }
}
