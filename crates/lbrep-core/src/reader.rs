// ── Source graph reader ──
//
// Walks a load balancer's status tree and fetches the detail record of every
// resource hanging off it, strictly one request at a time in traversal
// order. Pools reached through more than one path are fetched once.

use tracing::{debug, info};

use crate::api::SourceApi;
use crate::error::CoreError;
use crate::index::{GraphIndex, GraphIndexBuilder, ResourceKind};

pub struct SourceGraphReader<'a, S> {
    source: &'a S,
}

impl<'a, S: SourceApi> SourceGraphReader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Collect the complete graph rooted at `lb_id`.
    ///
    /// The first failed fetch aborts the walk; nothing collected so far is
    /// returned.
    pub async fn collect(&self, lb_id: &str) -> Result<GraphIndex, CoreError> {
        debug!(lb_id, "fetching status tree");
        let tree = self
            .source
            .load_balancer_status_tree(lb_id)
            .await
            .map_err(|e| CoreError::unreachable(ResourceKind::LoadBalancer, lb_id, &e))?;

        debug!(lb_id, "fetching load balancer");
        let details = self
            .source
            .load_balancer(lb_id)
            .await
            .map_err(|e| CoreError::unreachable(ResourceKind::LoadBalancer, lb_id, &e))?;

        let root = tree.statuses.loadbalancer.clone();
        let mut builder = GraphIndexBuilder::new(lb_id, tree, details);

        for listener in &root.listeners {
            if !builder.contains(ResourceKind::Listener, &listener.id) {
                debug!(listener_id = %listener.id, "fetching listener");
                let record = self
                    .source
                    .listener(&listener.id)
                    .await
                    .map_err(|e| CoreError::unreachable(ResourceKind::Listener, &listener.id, &e))?;
                builder.insert_listener(record);
            }

            for pool in &listener.pools {
                self.collect_pool(&mut builder, &pool.id).await?;
            }
        }

        for pool in &root.pools {
            self.collect_pool(&mut builder, &pool.id).await?;
        }

        let index = builder.build();
        let counts = index.counts();
        info!(
            lb_id,
            listeners = counts.listeners,
            pools = counts.pools,
            health_monitors = counts.health_monitors,
            members = counts.members,
            "collected load balancer graph"
        );
        Ok(index)
    }

    /// Fetch a pool, its monitor and its members unless already indexed.
    async fn collect_pool(&self, builder: &mut GraphIndexBuilder, pool_id: &str) -> Result<(), CoreError> {
        if builder.contains(ResourceKind::Pool, pool_id) {
            return Ok(());
        }

        debug!(pool_id, "fetching pool");
        let pool = self
            .source
            .pool(pool_id)
            .await
            .map_err(|e| CoreError::unreachable(ResourceKind::Pool, pool_id, &e))?;

        let monitor_id = pool.healthmonitor_id.clone().filter(|id| !id.is_empty());
        let member_ids: Vec<String> = pool.members.iter().map(|m| m.id.clone()).collect();
        builder.insert_pool(pool);

        if let Some(monitor_id) = monitor_id {
            if !builder.contains(ResourceKind::HealthMonitor, &monitor_id) {
                debug!(pool_id, monitor_id = %monitor_id, "fetching health monitor");
                let monitor = self
                    .source
                    .health_monitor(&monitor_id)
                    .await
                    .map_err(|e| CoreError::unreachable(ResourceKind::HealthMonitor, &monitor_id, &e))?;
                builder.insert_health_monitor(monitor);
            }
        }

        for member_id in &member_ids {
            if builder.contains(ResourceKind::Member, member_id) {
                continue;
            }
            debug!(pool_id, member_id = %member_id, "fetching member");
            let member = self
                .source
                .member(member_id, pool_id)
                .await
                .map_err(|e| CoreError::unreachable(ResourceKind::Member, member_id, &e))?;
            builder.insert_member(member);
        }

        Ok(())
    }
}
