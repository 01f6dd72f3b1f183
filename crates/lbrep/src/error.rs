//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use lbrep_core::{CoreError, ResourceKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const SOURCE_UNREACHABLE: i32 = 4;
    pub const IDENTITY_MISMATCH: i32 = 5;
    pub const SNAPSHOT: i32 = 6;
    pub const TARGET: i32 = 7;
    pub const INCOMPLETE_GRAPH: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lbrep::auth_failed),
        help(
            "Check OS_USERNAME, OS_PASSWORD, OS_PROJECT_NAME and the domain names.\n\
             Sourcing the project's openrc file sets all of them."
        )
    )]
    AuthFailed { message: String },

    #[error("No {flag} given")]
    #[diagnostic(
        code(lbrep::no_credentials),
        help("Pass {flag} or set {env}.")
    )]
    NoCredentials { flag: String, env: String },

    #[error("Could not reach {service}")]
    #[diagnostic(
        code(lbrep::connection_failed),
        help("Check OS_AUTH_URL and network access. Self-signed endpoints need --insecure (-k) or --cacert.")
    )]
    ConnectionFailed {
        service: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Source ───────────────────────────────────────────────────────
    #[error("Could not fetch {kind} '{id}' from Neutron")]
    #[diagnostic(
        code(lbrep::source_unreachable),
        help("Reason: {reason}\nNothing was written and nothing was created.")
    )]
    SourceUnreachable {
        kind: ResourceKind,
        id: String,
        reason: String,
    },

    // ── Snapshot ─────────────────────────────────────────────────────
    #[error("Snapshot {} was taken of load balancer '{found}', not '{expected}'", .path.display())]
    #[diagnostic(
        code(lbrep::identity_mismatch),
        help("Pass the matching --lb-id, or point --snapshot at the file for '{expected}'.")
    )]
    IdentityMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Snapshot {} is malformed", .path.display())]
    #[diagnostic(
        code(lbrep::malformed_snapshot),
        help("{reason}\nRe-create it with: lbrep --lb-id <ID> --to-file")
    )]
    MalformedSnapshot { path: PathBuf, reason: String },

    #[error("Cannot access snapshot {}", .path.display())]
    #[diagnostic(
        code(lbrep::snapshot_io),
        help("Check that the file exists and is readable, or save one first with --to-file.")
    )]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Graph ────────────────────────────────────────────────────────
    #[error("{kind} '{id}' is referenced by {referenced_by} but missing from the graph")]
    #[diagnostic(
        code(lbrep::incomplete_graph),
        help("The snapshot or the source is inconsistent. Collect it again with --to-file.")
    )]
    IncompleteGraph {
        kind: ResourceKind,
        id: String,
        referenced_by: String,
    },

    // ── Target ───────────────────────────────────────────────────────
    #[error("Octavia rejected the load balancer{}: {message}", status_suffix(.status.as_ref()))]
    #[diagnostic(
        code(lbrep::target_rejected),
        help("Response body:\n{payload}")
    )]
    TargetRejected {
        status: Option<u16>,
        message: String,
        payload: String,
    },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lbrep::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(lbrep::config))]
    Settings { message: String },

    #[error(transparent)]
    #[diagnostic(code(lbrep::config))]
    Config(Box<figment::Error>),

    // ── Output ───────────────────────────────────────────────────────
    #[error("Cannot render output: {0}")]
    #[diagnostic(code(lbrep::render))]
    Render(String),
}

fn status_suffix(status: Option<&u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } | Self::SourceUnreachable { .. } => {
                exit_code::SOURCE_UNREACHABLE
            }
            Self::IdentityMismatch { .. } => exit_code::IDENTITY_MISMATCH,
            Self::MalformedSnapshot { .. } | Self::SnapshotIo { .. } => exit_code::SNAPSHOT,
            Self::IncompleteGraph { .. } => exit_code::INCOMPLETE_GRAPH,
            Self::TargetRejected { .. } => exit_code::TARGET,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::MissingCredential { name, env } => CliError::NoCredentials {
                flag: name.into(),
                env: env.into(),
            },

            CoreError::ConnectionFailed { service, reason } => CliError::ConnectionFailed {
                service,
                source: reason.into(),
            },

            CoreError::SourceUnreachable { kind, id, reason } => {
                CliError::SourceUnreachable { kind, id, reason }
            }

            CoreError::SnapshotIdentityMismatch {
                path,
                expected,
                found,
            } => CliError::IdentityMismatch {
                path,
                expected,
                found,
            },

            CoreError::MalformedSnapshot { path, reason } => {
                CliError::MalformedSnapshot { path, reason }
            }

            CoreError::SnapshotIo { path, source } => CliError::SnapshotIo { path, source },

            CoreError::MissingResource {
                kind,
                id,
                referenced_by,
            } => CliError::IncompleteGraph {
                kind,
                id,
                referenced_by,
            },

            CoreError::TargetCreationFailure {
                status,
                message,
                payload,
            } => CliError::TargetRejected {
                status,
                message,
                payload,
            },

            CoreError::Config { message } => CliError::Settings { message },
        }
    }
}
