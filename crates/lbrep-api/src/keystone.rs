// Keystone v3 authentication
//
// Password login scoped to a project. The issued token comes back in the
// `X-Subject-Token` header; the body carries the service catalog we use to
// locate the Neutron and Octavia endpoints.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, Interface, Service};
use crate::error::Error;
use crate::response::{preview, send_error};
use crate::transport::TransportConfig;

// ── Token response shape ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
    #[serde(default)]
    project: Option<ProjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProjectRef {
    id: String,
}

/// One service in the Keystone catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// One endpoint of a catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEndpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}

impl CatalogEndpoint {
    fn in_region(&self, region: Option<&str>) -> bool {
        match region {
            None => true,
            Some(r) => self.region.as_deref() == Some(r) || self.region_id.as_deref() == Some(r),
        }
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// An authenticated Keystone session: token plus service catalog.
#[derive(Debug, Clone)]
pub struct Session {
    token: SecretString,
    project_id: Option<String>,
    catalog: Vec<CatalogEntry>,
}

impl Session {
    /// Assemble a session from parts (tests, pre-issued tokens).
    pub fn new(token: SecretString, project_id: Option<String>, catalog: Vec<CatalogEntry>) -> Self {
        Self {
            token,
            project_id,
            catalog,
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The project the token is scoped to, when Keystone reported it.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Look up the endpoint URL for `service`.
    ///
    /// Matches on catalog type first and falls back to the conventional
    /// service name, then filters by interface and (optionally) region.
    pub fn endpoint(
        &self,
        service: Service,
        interface: Interface,
        region: Option<&str>,
    ) -> Result<Url, Error> {
        let entry = self
            .catalog
            .iter()
            .find(|e| e.service_type == service.catalog_type())
            .or_else(|| {
                self.catalog
                    .iter()
                    .find(|e| e.name.as_deref() == Some(service.catalog_name()))
            });

        let endpoint = entry.and_then(|e| {
            e.endpoints
                .iter()
                .find(|ep| ep.interface == interface.as_ref() && ep.in_region(region))
        });

        match endpoint {
            Some(ep) => {
                debug!(service = service.catalog_type(), url = %ep.url, "resolved endpoint");
                Ok(Url::parse(&ep.url)?)
            }
            None => Err(Error::EndpointNotFound {
                service: service.catalog_type().to_owned(),
                interface: interface.to_string(),
                region: region.map(str::to_owned),
            }),
        }
    }
}

// ── Login ────────────────────────────────────────────────────────────

/// Build `{auth_url}/v3/auth/tokens`, tolerating auth URLs that already
/// carry the `/v3` suffix.
pub fn tokens_url(auth_url: &Url) -> Url {
    let mut url = auth_url.clone();
    let path = url.path().trim_end_matches('/').to_owned();
    if path.ends_with("/v3") {
        url.set_path(&format!("{path}/auth/tokens"));
    } else {
        url.set_path(&format!("{path}/v3/auth/tokens"));
    }
    url
}

/// Authenticate with the password method and return a scoped session.
pub async fn authenticate(
    credentials: &Credentials,
    transport: &TransportConfig,
) -> Result<Session, Error> {
    let url = tokens_url(&credentials.auth_url);
    let http = transport.build_client()?;

    debug!(user = %credentials.username, project = %credentials.project_name, "requesting token at {url}");

    let body = json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": credentials.username,
                        "domain": { "name": credentials.user_domain_name },
                        "password": credentials.password.expose_secret(),
                    }
                }
            },
            "scope": {
                "project": {
                    "name": credentials.project_name,
                    "domain": { "name": credentials.project_domain_name },
                }
            }
        }
    });

    let resp = http
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(|e| send_error(e, transport.timeout_secs()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Authentication {
            message: format!("token request failed (HTTP {status}): {}", preview(&body)),
        });
    }

    let token = resp
        .headers()
        .get("X-Subject-Token")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .ok_or_else(|| Error::Authentication {
            message: "response carried no X-Subject-Token header".into(),
        })?;

    let raw = resp.text().await?;
    let parsed: TokenResponse = serde_json::from_str(&raw).map_err(|e| Error::Deserialization {
        message: format!("token body: {e}"),
        body: raw.clone(),
    })?;

    debug!(services = parsed.token.catalog.len(), "token issued");

    Ok(Session {
        token: SecretString::from(token),
        project_id: parsed.token.project.map(|p| p.id),
        catalog: parsed.token.catalog,
    })
}
