// Octavia v2 HTTP client
//
// The replicator only ever creates: one POST carrying the whole tree.

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::models::{CreateLoadBalancerRequest, CreatedEnvelope, CreatedLoadBalancer, LoadBalancerTree};
use crate::error::Error;
use crate::response::{decode, send_error};
use crate::transport::TransportConfig;

/// Async client for the Octavia v2 API.
pub struct OctaviaClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl OctaviaClient {
    /// Build a client for a catalog `load-balancer` endpoint.
    pub fn new(endpoint: &Url, token: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client_with_token(token)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(endpoint)?,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, endpoint: &Url) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(endpoint)?,
            timeout_secs: 0,
        })
    }

    /// Build the base URL ending in `/v2/lbaas/`.
    ///
    /// Octavia answers on both `/v2` and `/v2.0`; an endpoint that already
    /// names a version keeps it.
    fn normalize_base_url(endpoint: &Url) -> Result<Url, Error> {
        if endpoint.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let mut url = endpoint.clone();
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/v2") || path.ends_with("/v2.0") {
            url.set_path(&format!("{path}/lbaas/"));
        } else {
            url.set_path(&format!("{path}/v2/lbaas/"));
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST loadbalancers` with the fully populated tree.
    ///
    /// Octavia accepts the request asynchronously (HTTP 201, provisioning
    /// `PENDING_CREATE`); the returned id is usable immediately.
    pub async fn create_load_balancer(
        &self,
        tree: &LoadBalancerTree,
    ) -> Result<CreatedLoadBalancer, Error> {
        let url = self.base_url.join("loadbalancers")?;
        debug!("POST {url}");

        let body = CreateLoadBalancerRequest { loadbalancer: tree };
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;

        let created: CreatedEnvelope = decode(resp).await?;
        debug!(id = %created.loadbalancer.id, "load balancer accepted");
        Ok(created.loadbalancer)
    }
}
