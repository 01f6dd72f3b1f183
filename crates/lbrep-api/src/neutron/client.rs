// Neutron-LBaaS v2 HTTP client
//
// Read-only access to the handful of `/v2.0/lbaas/` endpoints the graph
// reader needs. Each call strips the resource envelope before the caller
// sees the record.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::{
    HealthMonitor, HealthMonitorEnvelope, Listener, ListenerEnvelope, LoadBalancer,
    LoadBalancerEnvelope, Member, MemberEnvelope, Pool, PoolEnvelope, StatusTree,
};
use crate::error::Error;
use crate::response::{decode, send_error};
use crate::transport::TransportConfig;

/// Raw HTTP client for the Neutron LBaaS v2 extension.
pub struct NeutronClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl NeutronClient {
    /// Build a client for a catalog `network` endpoint, authenticating every
    /// request with `token`.
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

    /// Build the base URL ending in `/v2.0/lbaas/`.
    ///
    /// Catalog entries for Neutron usually stop at the port
    /// (`http://host:9696/`), but some deployments publish the versioned path.
    fn normalize_base_url(endpoint: &Url) -> Result<Url, Error> {
        if endpoint.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let mut url = endpoint.clone();
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/v2.0") {
            url.set_path(&format!("{path}/lbaas/"));
        } else {
            url.set_path(&format!("{path}/v2.0/lbaas/"));
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;
        decode(resp).await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET loadbalancers/{id}/statuses`
    pub async fn load_balancer_statuses(&self, lb_id: &str) -> Result<StatusTree, Error> {
        self.get(&["loadbalancers", lb_id, "statuses"]).await
    }

    /// `GET loadbalancers/{id}`
    pub async fn show_load_balancer(&self, lb_id: &str) -> Result<LoadBalancer, Error> {
        let env: LoadBalancerEnvelope = self.get(&["loadbalancers", lb_id]).await?;
        Ok(env.loadbalancer)
    }

    /// `GET listeners/{id}`
    pub async fn show_listener(&self, listener_id: &str) -> Result<Listener, Error> {
        let env: ListenerEnvelope = self.get(&["listeners", listener_id]).await?;
        Ok(env.listener)
    }

    /// `GET pools/{id}`
    pub async fn show_pool(&self, pool_id: &str) -> Result<Pool, Error> {
        let env: PoolEnvelope = self.get(&["pools", pool_id]).await?;
        Ok(env.pool)
    }

    /// `GET healthmonitors/{id}`
    pub async fn show_health_monitor(&self, monitor_id: &str) -> Result<HealthMonitor, Error> {
        let env: HealthMonitorEnvelope = self.get(&["healthmonitors", monitor_id]).await?;
        Ok(env.healthmonitor)
    }

    /// `GET pools/{pool_id}/members/{id}`. Members are only addressable
    /// through their pool.
    pub async fn show_member(&self, member_id: &str, pool_id: &str) -> Result<Member, Error> {
        let env: MemberEnvelope = self.get(&["pools", pool_id, "members", member_id]).await?;
        Ok(env.member)
    }
}
