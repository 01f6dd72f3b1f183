// ── Graph index ──
//
// Flat, id-keyed view of one load balancer's resource graph. Built once by
// `GraphIndexBuilder` (live collection or snapshot load) and read-only
// afterwards.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use lbrep_api::neutron::models::{HealthMonitor, Listener, LoadBalancer, Member, Pool, StatusTree};
use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// Kind of resource held in a [`GraphIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
pub enum ResourceKind {
    #[strum(serialize = "load balancer")]
    LoadBalancer,
    #[strum(serialize = "listener")]
    Listener,
    #[strum(serialize = "pool")]
    Pool,
    #[strum(serialize = "health monitor")]
    HealthMonitor,
    #[strum(serialize = "member")]
    Member,
}

/// Number of collected resources per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub listeners: usize,
    pub pools: usize,
    pub health_monitors: usize,
    pub members: usize,
}

impl GraphCounts {
    pub fn get(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::LoadBalancer => 1,
            ResourceKind::Listener => self.listeners,
            ResourceKind::Pool => self.pools,
            ResourceKind::HealthMonitor => self.health_monitors,
            ResourceKind::Member => self.members,
        }
    }
}

/// Everything known about one source load balancer.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphIndex {
    lb_id: String,
    status_tree: StatusTree,
    load_balancer: LoadBalancer,
    listeners: BTreeMap<String, Listener>,
    pools: BTreeMap<String, Pool>,
    health_monitors: BTreeMap<String, HealthMonitor>,
    members: BTreeMap<String, Member>,
}

impl GraphIndex {
    pub fn lb_id(&self) -> &str {
        &self.lb_id
    }

    pub fn status_tree(&self) -> &StatusTree {
        &self.status_tree
    }

    pub fn load_balancer(&self) -> &LoadBalancer {
        &self.load_balancer
    }

    pub fn listener(&self, id: &str) -> Option<&Listener> {
        self.listeners.get(id)
    }

    pub fn pool(&self, id: &str) -> Option<&Pool> {
        self.pools.get(id)
    }

    pub fn health_monitor(&self, id: &str) -> Option<&HealthMonitor> {
        self.health_monitors.get(id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn listeners(&self) -> &BTreeMap<String, Listener> {
        &self.listeners
    }

    pub fn pools(&self) -> &BTreeMap<String, Pool> {
        &self.pools
    }

    pub fn health_monitors(&self) -> &BTreeMap<String, HealthMonitor> {
        &self.health_monitors
    }

    pub fn members(&self) -> &BTreeMap<String, Member> {
        &self.members
    }

    pub fn counts(&self) -> GraphCounts {
        GraphCounts {
            listeners: self.listeners.len(),
            pools: self.pools.len(),
            health_monitors: self.health_monitors.len(),
            members: self.members.len(),
        }
    }
}

/// Append-only accumulator for a [`GraphIndex`].
///
/// Each id is stored at most once: a second insert under the same id is
/// ignored and reported as `false`.
#[derive(Debug)]
pub struct GraphIndexBuilder {
    index: GraphIndex,
}

impl GraphIndexBuilder {
    pub fn new(lb_id: impl Into<String>, status_tree: StatusTree, load_balancer: LoadBalancer) -> Self {
        Self {
            index: GraphIndex {
                lb_id: lb_id.into(),
                status_tree,
                load_balancer,
                listeners: BTreeMap::new(),
                pools: BTreeMap::new(),
                health_monitors: BTreeMap::new(),
                members: BTreeMap::new(),
            },
        }
    }

    pub fn contains(&self, kind: ResourceKind, id: &str) -> bool {
        let index = &self.index;
        match kind {
            ResourceKind::LoadBalancer => index.load_balancer.id == id,
            ResourceKind::Listener => index.listeners.contains_key(id),
            ResourceKind::Pool => index.pools.contains_key(id),
            ResourceKind::HealthMonitor => index.health_monitors.contains_key(id),
            ResourceKind::Member => index.members.contains_key(id),
        }
    }

    pub fn insert_listener(&mut self, listener: Listener) -> bool {
        insert_new(&mut self.index.listeners, listener.id.clone(), listener)
    }

    pub fn insert_pool(&mut self, pool: Pool) -> bool {
        insert_new(&mut self.index.pools, pool.id.clone(), pool)
    }

    pub fn insert_health_monitor(&mut self, monitor: HealthMonitor) -> bool {
        insert_new(&mut self.index.health_monitors, monitor.id.clone(), monitor)
    }

    pub fn insert_member(&mut self, member: Member) -> bool {
        insert_new(&mut self.index.members, member.id.clone(), member)
    }

    pub fn build(self) -> GraphIndex {
        self.index
    }
}

fn insert_new<T>(map: &mut BTreeMap<String, T>, id: String, value: T) -> bool {
    match map.entry(id) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}
