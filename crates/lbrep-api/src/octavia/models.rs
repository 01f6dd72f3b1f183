// Octavia v2 request / response types
//
// The create call takes a fully populated load balancer tree: listeners with
// their default pool nested inside, plus any remaining pools as siblings.
// Unset optional fields are left out of the JSON entirely; Octavia treats a
// missing key and an empty string differently.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::neutron::models::{LbAlgorithm, MonitorType, Protocol};

/// Body of `POST /v2/lbaas/loadbalancers`.
#[derive(Debug, Serialize)]
pub struct CreateLoadBalancerRequest<'a> {
    pub loadbalancer: &'a LoadBalancerTree,
}

/// Fully populated load balancer for a single-call create.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadBalancerTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub admin_state_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<ListenerTree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<PoolTree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub protocol: Protocol,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<PoolTree>,
}

/// A pool, either nested as a listener's `default_pool` or standalone.
///
/// `description` is only ever filled for standalone pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub protocol: Protocol,
    pub lb_algorithm: LbAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthmonitor: Option<HealthMonitorTree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberTree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMonitorTree {
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub delay: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_codes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    pub max_retries: u32,
    pub timeout: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTree {
    pub admin_state_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    pub weight: u32,
}

// ── Response ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedEnvelope {
    pub loadbalancer: CreatedLoadBalancer,
}

/// What Octavia echoes back for a newly accepted load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedLoadBalancer {
    pub id: String,
    #[serde(default)]
    pub provisioning_status: Option<String>,
    #[serde(default)]
    pub vip_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
