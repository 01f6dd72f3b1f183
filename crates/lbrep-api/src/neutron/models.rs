// Neutron-LBaaS v2 response types
//
// Every endpoint wraps its payload in a single-key envelope named after the
// resource (`{"listener": {...}}`). Fields the replicator does not interpret
// land in `extra` so a snapshot keeps the full record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

fn default_true() -> bool {
    true
}

// ── Enumerations ─────────────────────────────────────────────────────

/// Listener / pool protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    Tcp,
    Http,
    Https,
    TerminatedHttps,
    Proxy,
    Udp,
}

/// Pool load-balancing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LbAlgorithm {
    RoundRobin,
    LeastConnections,
    SourceIp,
}

/// Health monitor probe type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum MonitorType {
    #[serde(rename = "PING")]
    #[strum(serialize = "PING")]
    Ping,
    #[serde(rename = "TCP")]
    #[strum(serialize = "TCP")]
    Tcp,
    #[serde(rename = "HTTP")]
    #[strum(serialize = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    #[strum(serialize = "HTTPS")]
    Https,
    #[serde(rename = "TLS-HELLO")]
    #[strum(serialize = "TLS-HELLO")]
    TlsHello,
    #[serde(rename = "UDP-CONNECT")]
    #[strum(serialize = "UDP-CONNECT")]
    UdpConnect,
}

/// `{"id": "..."}` reference used in list-valued fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

// ── Status tree ──────────────────────────────────────────────────────

/// Response of `GET loadbalancers/{id}/statuses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTree {
    pub statuses: Statuses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statuses {
    pub loadbalancer: LoadBalancerStatus,
}

/// Root of the status tree: the listeners and pools hanging off a load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerStatus {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub listeners: Vec<ListenerStatus>,
    #[serde(default)]
    pub pools: Vec<PoolStatus>,
    /// Operating / provisioning status and anything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerStatus {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub pools: Vec<PoolStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthmonitor: Option<MonitorStatus>,
    #[serde(default)]
    pub members: Vec<MemberStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatus {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStatus {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Resources ────────────────────────────────────────────────────────

/// Full load balancer record from `GET loadbalancers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(default)]
    pub listeners: Vec<IdRef>,
    #[serde(default)]
    pub pools: Vec<IdRef>,
    /// Provider, flavor, statuses, port id, etc.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoadBalancer {
    /// The owning project. Older Neutron releases only report `tenant_id`.
    pub fn owner(&self) -> Option<&str> {
        self.tenant_id.as_deref().or(self.project_id.as_deref())
    }
}

/// Full listener record from `GET listeners/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub protocol: Protocol,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pool_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full pool record from `GET pools/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub protocol: Protocol,
    pub lb_algorithm: LbAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthmonitor_id: Option<String>,
    /// Member references, in the order Neutron reports them.
    #[serde(default)]
    pub members: Vec<IdRef>,
    /// Session persistence, listeners, load balancers, etc.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full health monitor record from `GET healthmonitors/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitor {
    pub id: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub delay: u32,
    pub timeout: u32,
    pub max_retries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_codes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full member record from `GET pools/{pool_id}/members/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_weight() -> u32 {
    1
}

// ── Envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerEnvelope {
    pub loadbalancer: LoadBalancer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerEnvelope {
    pub listener: Listener,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEnvelope {
    pub pool: Pool,
}

/// Older tooling stored monitors fetched through the v1 call, keyed
/// `health_monitor`; both spellings are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitorEnvelope {
    #[serde(alias = "health_monitor")]
    pub healthmonitor: HealthMonitor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEnvelope {
    pub member: Member,
}
