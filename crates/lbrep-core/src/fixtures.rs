// Test fixtures: source records shaped like real Neutron-LBaaS responses.
#![allow(clippy::unwrap_used)]

use lbrep_api::neutron::models::{
    HealthMonitor, Listener, LoadBalancer, Member, MonitorType, Pool, StatusTree,
};
use serde_json::json;

use crate::index::{GraphIndex, GraphIndexBuilder};

/// Status tree of `lb-1`: listener `lst-1` defaulting to `pool-1`, plus an
/// unattached `pool-2`.
pub(crate) fn status_tree_lb1() -> StatusTree {
    serde_json::from_value(json!({
        "statuses": {
            "loadbalancer": {
                "id": "lb-1",
                "name": "web",
                "operating_status": "ONLINE",
                "provisioning_status": "ACTIVE",
                "listeners": [{
                    "id": "lst-1",
                    "name": "lst-1",
                    "operating_status": "ONLINE",
                    "pools": [{
                        "id": "pool-1",
                        "name": "pool-1",
                        "healthmonitor": { "id": "hm-1", "type": "PING" },
                        "members": [{ "id": "m-1", "address": "10.0.0.5", "protocol_port": 80 }]
                    }]
                }],
                "pools": [
                    {
                        "id": "pool-1",
                        "name": "pool-1",
                        "healthmonitor": { "id": "hm-1", "type": "PING" },
                        "members": [{ "id": "m-1", "address": "10.0.0.5", "protocol_port": 80 }]
                    },
                    { "id": "pool-2", "name": "pool-2", "members": [] }
                ]
            }
        }
    }))
    .unwrap()
}

pub(crate) fn load_balancer_lb1() -> LoadBalancer {
    serde_json::from_value(json!({
        "id": "lb-1",
        "name": "web",
        "description": "",
        "admin_state_up": true,
        "tenant_id": "tenant-1",
        "vip_subnet_id": "subnet-1",
        "vip_address": "192.0.2.10",
        "vip_port_id": "port-1",
        "provider": "haproxy",
        "listeners": [{ "id": "lst-1" }],
        "pools": [{ "id": "pool-1" }, { "id": "pool-2" }]
    }))
    .unwrap()
}

pub(crate) fn listener(id: &str, port: u16, default_pool_id: Option<&str>) -> Listener {
    serde_json::from_value(json!({
        "id": id,
        "name": id,
        "protocol": "HTTP",
        "protocol_port": port,
        "default_pool_id": default_pool_id,
        "connection_limit": -1,
        "admin_state_up": true
    }))
    .unwrap()
}

pub(crate) fn pool(id: &str, monitor_id: Option<&str>, member_ids: &[&str]) -> Pool {
    let members: Vec<_> = member_ids.iter().map(|m| json!({ "id": m })).collect();
    serde_json::from_value(json!({
        "id": id,
        "name": id,
        "description": "",
        "protocol": "HTTP",
        "lb_algorithm": "ROUND_ROBIN",
        "healthmonitor_id": monitor_id,
        "members": members,
        "session_persistence": null,
        "admin_state_up": true
    }))
    .unwrap()
}

pub(crate) fn ping_monitor(id: &str) -> HealthMonitor {
    serde_json::from_value(json!({
        "id": id,
        "type": "PING",
        "delay": 5,
        "timeout": 3,
        "max_retries": 3,
        "admin_state_up": true,
        "pools": [{ "id": "pool-1" }]
    }))
    .unwrap()
}

pub(crate) fn member(id: &str, address: &str) -> Member {
    serde_json::from_value(json!({
        "id": id,
        "admin_state_up": true,
        "name": "",
        "address": address,
        "protocol_port": 80,
        "subnet_id": "subnet-1",
        "weight": 1
    }))
    .unwrap()
}

/// The fully collected `lb-1` graph.
pub(crate) fn index_lb1() -> GraphIndex {
    let mut builder = GraphIndexBuilder::new("lb-1", status_tree_lb1(), load_balancer_lb1());
    builder.insert_listener(listener("lst-1", 80, Some("pool-1")));
    builder.insert_pool(pool("pool-1", Some("hm-1"), &["m-1"]));
    builder.insert_health_monitor(ping_monitor("hm-1"));
    builder.insert_member(member("m-1", "10.0.0.5"));
    builder.insert_pool(pool("pool-2", None, &[]));
    builder.build()
}

/// Two listeners, each with its own default pool, one shared sibling pool,
/// every optional string left empty and some unmodelled nested fields.
pub(crate) fn two_listener_index() -> GraphIndex {
    let tree = serde_json::from_value(json!({
        "statuses": { "loadbalancer": {
            "id": "lb-9",
            "listeners": [
                { "id": "lst-a", "pools": [{ "id": "pool-a", "members": [] }] },
                { "id": "lst-b", "pools": [{ "id": "pool-b", "members": [] }] }
            ],
            "pools": [
                { "id": "pool-a", "members": [] },
                { "id": "pool-b", "members": [] },
                { "id": "pool-c", "members": [] }
            ]
        }}
    }))
    .unwrap();
    let lb = serde_json::from_value(json!({
        "id": "lb-9", "name": "", "description": "", "tenant_id": "",
        "vip_subnet_id": "", "vip_address": "",
        "provider": "octavia",
        "flavor": { "zones": ["az-1", "az-2"], "limits": { "max": 18446744073709551615u64, "floor": -1 } }
    }))
    .unwrap();

    let mut monitor = ping_monitor("hm-a");
    monitor.monitor_type = MonitorType::Http;
    monitor.http_method = Some(String::new());
    monitor.url_path = Some(String::new());
    monitor.expected_codes = Some(String::new());

    let mut m_a = member("m-a", "");
    m_a.subnet_id = Some(String::new());

    let mut pool_c = pool("pool-c", None, &[]);
    pool_c.name = Some(String::new());

    let mut builder = GraphIndexBuilder::new("lb-9", tree, lb);
    let mut lst_a = listener("lst-a", 80, Some("pool-a"));
    lst_a.name = Some(String::new());
    builder.insert_listener(lst_a);
    builder.insert_listener(listener("lst-b", 443, Some("pool-b")));
    builder.insert_pool(pool("pool-a", Some("hm-a"), &["m-a"]));
    builder.insert_health_monitor(monitor);
    builder.insert_member(m_a);
    builder.insert_pool(pool("pool-b", None, &[]));
    builder.insert_pool(pool_c);
    builder.build()
}
