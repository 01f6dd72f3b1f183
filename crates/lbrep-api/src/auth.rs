use secrecy::SecretString;
use strum::{AsRefStr, Display, EnumString};
use url::Url;

/// Password credentials for a project-scoped Keystone v3 token.
///
/// Mirrors the `OS_*` variables an OpenStack RC file exports.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub auth_url: Url,
    pub username: String,
    pub password: SecretString,
    pub project_name: String,
    pub user_domain_name: String,
    pub project_domain_name: String,
}

/// Which catalog endpoint flavour to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

/// A catalog service the replicator needs an endpoint for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Neutron, home of the LBaaS v2 extension.
    Network,
    /// Octavia.
    LoadBalancer,
}

impl Service {
    /// The catalog `type` for this service.
    pub fn catalog_type(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::LoadBalancer => "load-balancer",
        }
    }

    /// The conventional catalog `name`, used when no entry matches by type.
    pub fn catalog_name(self) -> &'static str {
        match self {
            Self::Network => "neutron",
            Self::LoadBalancer => "octavia",
        }
    }
}
