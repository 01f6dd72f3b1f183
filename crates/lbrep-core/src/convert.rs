// ── Tree projection ──
//
// Turns a collected `GraphIndex` into the nested body Octavia's single-call
// create expects. Pure: no I/O, no clock, and the same index always projects
// to the same tree.

use std::collections::BTreeSet;

use lbrep_api::neutron::models::Pool;
use lbrep_api::octavia::models::{
    HealthMonitorTree, ListenerTree, LoadBalancerTree, MemberTree, PoolTree,
};

use crate::error::CoreError;
use crate::index::{GraphIndex, ResourceKind};

/// Empty strings mean "unset" on the source side.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Project the collected graph into a creatable load balancer tree.
///
/// Each listener carries its default pool nested inside it; every other pool
/// of the status tree becomes a sibling in `pools`. The VIP address is only
/// carried over when `reuse_vip` is set.
pub fn project(index: &GraphIndex, reuse_vip: bool) -> Result<LoadBalancerTree, CoreError> {
    let lb = index.load_balancer();
    let root = &index.status_tree().statuses.loadbalancer;

    let mut default_pool_ids = BTreeSet::new();
    let mut listeners = Vec::with_capacity(root.listeners.len());

    for status in &root.listeners {
        let listener = index
            .listener(&status.id)
            .ok_or_else(|| CoreError::missing(ResourceKind::Listener, &status.id, format!("load balancer {}", lb.id)))?;

        let default_pool = match non_empty(listener.default_pool_id.as_ref()) {
            Some(pool_id) => {
                let referrer = format!("listener {}", listener.id);
                let tree = pool_tree(index, &pool_id, &referrer, false)?;
                default_pool_ids.insert(pool_id);
                Some(tree)
            }
            None => None,
        };

        listeners.push(ListenerTree {
            name: non_empty(listener.name.as_ref()),
            protocol: listener.protocol,
            protocol_port: listener.protocol_port,
            default_pool,
        });
    }

    let referrer = format!("load balancer {}", lb.id);
    let pools = root
        .pools
        .iter()
        .filter(|p| !default_pool_ids.contains(&p.id))
        .map(|p| pool_tree(index, &p.id, &referrer, true))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadBalancerTree {
        name: non_empty(lb.name.as_ref()),
        description: non_empty(lb.description.as_ref()),
        admin_state_up: lb.admin_state_up,
        project_id: lb.owner().filter(|s| !s.is_empty()).map(str::to_owned),
        flavor_id: None,
        vip_subnet_id: non_empty(lb.vip_subnet_id.as_ref()),
        vip_address: if reuse_vip {
            non_empty(lb.vip_address.as_ref())
        } else {
            None
        },
        listeners,
        pools,
    })
}

fn pool_tree(
    index: &GraphIndex,
    pool_id: &str,
    referrer: &str,
    standalone: bool,
) -> Result<PoolTree, CoreError> {
    let pool = index
        .pool(pool_id)
        .ok_or_else(|| CoreError::missing(ResourceKind::Pool, pool_id, referrer))?;

    Ok(PoolTree {
        name: non_empty(pool.name.as_ref()),
        description: if standalone {
            non_empty(pool.description.as_ref())
        } else {
            None
        },
        protocol: pool.protocol,
        lb_algorithm: pool.lb_algorithm,
        healthmonitor: monitor_tree(index, pool)?,
        members: member_trees(index, pool)?,
    })
}

fn monitor_tree(index: &GraphIndex, pool: &Pool) -> Result<Option<HealthMonitorTree>, CoreError> {
    let Some(monitor_id) = non_empty(pool.healthmonitor_id.as_ref()) else {
        return Ok(None);
    };

    let monitor = index.health_monitor(&monitor_id).ok_or_else(|| {
        CoreError::missing(ResourceKind::HealthMonitor, &monitor_id, format!("pool {}", pool.id))
    })?;

    Ok(Some(HealthMonitorTree {
        monitor_type: monitor.monitor_type,
        delay: monitor.delay,
        expected_codes: non_empty(monitor.expected_codes.as_ref()),
        http_method: non_empty(monitor.http_method.as_ref()),
        max_retries: monitor.max_retries,
        timeout: monitor.timeout,
        url_path: non_empty(monitor.url_path.as_ref()),
    }))
}

fn member_trees(index: &GraphIndex, pool: &Pool) -> Result<Vec<MemberTree>, CoreError> {
    pool.members
        .iter()
        .map(|member_ref| {
            let member = index.member(&member_ref.id).ok_or_else(|| {
                CoreError::missing(ResourceKind::Member, &member_ref.id, format!("pool {}", pool.id))
            })?;
            Ok(MemberTree {
                admin_state_up: member.admin_state_up,
                name: non_empty(member.name.as_ref()),
                address: non_empty(Some(&member.address)),
                protocol_port: member.protocol_port,
                subnet_id: non_empty(member.subnet_id.as_ref()),
                weight: member.weight,
            })
        })
        .collect()
}
