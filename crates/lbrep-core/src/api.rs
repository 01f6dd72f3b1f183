// ── API seams ──
//
// The core talks to both control planes through these traits so collection
// and publication can run against the HTTP clients or in-memory fakes.

use std::sync::Arc;

use lbrep_api::neutron::models::{HealthMonitor, Listener, LoadBalancer, Member, Pool, StatusTree};
use lbrep_api::octavia::models::{CreatedLoadBalancer, LoadBalancerTree};
use lbrep_api::{NeutronClient, OctaviaClient};

use crate::error::CoreError;

/// Read access to the legacy load-balancing service.
#[allow(async_fn_in_trait)]
pub trait SourceApi {
    async fn load_balancer_status_tree(&self, lb_id: &str) -> Result<StatusTree, lbrep_api::Error>;
    async fn load_balancer(&self, lb_id: &str) -> Result<LoadBalancer, lbrep_api::Error>;
    async fn listener(&self, listener_id: &str) -> Result<Listener, lbrep_api::Error>;
    async fn pool(&self, pool_id: &str) -> Result<Pool, lbrep_api::Error>;
    async fn health_monitor(&self, monitor_id: &str) -> Result<HealthMonitor, lbrep_api::Error>;
    async fn member(&self, member_id: &str, pool_id: &str) -> Result<Member, lbrep_api::Error>;
}

/// Write access to the successor service.
#[allow(async_fn_in_trait)]
pub trait TargetApi {
    async fn create_load_balancer(
        &self,
        tree: &LoadBalancerTree,
    ) -> Result<CreatedLoadBalancer, lbrep_api::Error>;
}

/// Opens the two API clients on demand.
///
/// A run asks for a side only when it is about to use it, so offline modes
/// never authenticate.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Source: SourceApi;
    type Target: TargetApi;

    async fn source(&self) -> Result<Self::Source, CoreError>;
    async fn target(&self) -> Result<Self::Target, CoreError>;
}

impl SourceApi for NeutronClient {
    async fn load_balancer_status_tree(&self, lb_id: &str) -> Result<StatusTree, lbrep_api::Error> {
        self.load_balancer_statuses(lb_id).await
    }

    async fn load_balancer(&self, lb_id: &str) -> Result<LoadBalancer, lbrep_api::Error> {
        self.show_load_balancer(lb_id).await
    }

    async fn listener(&self, listener_id: &str) -> Result<Listener, lbrep_api::Error> {
        self.show_listener(listener_id).await
    }

    async fn pool(&self, pool_id: &str) -> Result<Pool, lbrep_api::Error> {
        self.show_pool(pool_id).await
    }

    async fn health_monitor(&self, monitor_id: &str) -> Result<HealthMonitor, lbrep_api::Error> {
        self.show_health_monitor(monitor_id).await
    }

    async fn member(&self, member_id: &str, pool_id: &str) -> Result<Member, lbrep_api::Error> {
        self.show_member(member_id, pool_id).await
    }
}

impl TargetApi for OctaviaClient {
    async fn create_load_balancer(
        &self,
        tree: &LoadBalancerTree,
    ) -> Result<CreatedLoadBalancer, lbrep_api::Error> {
        OctaviaClient::create_load_balancer(self, tree).await
    }
}

impl<T: SourceApi> SourceApi for Arc<T> {
    async fn load_balancer_status_tree(&self, lb_id: &str) -> Result<StatusTree, lbrep_api::Error> {
        T::load_balancer_status_tree(self, lb_id).await
    }

    async fn load_balancer(&self, lb_id: &str) -> Result<LoadBalancer, lbrep_api::Error> {
        T::load_balancer(self, lb_id).await
    }

    async fn listener(&self, listener_id: &str) -> Result<Listener, lbrep_api::Error> {
        T::listener(self, listener_id).await
    }

    async fn pool(&self, pool_id: &str) -> Result<Pool, lbrep_api::Error> {
        T::pool(self, pool_id).await
    }

    async fn health_monitor(&self, monitor_id: &str) -> Result<HealthMonitor, lbrep_api::Error> {
        T::health_monitor(self, monitor_id).await
    }

    async fn member(&self, member_id: &str, pool_id: &str) -> Result<Member, lbrep_api::Error> {
        T::member(self, member_id, pool_id).await
    }
}

impl<T: TargetApi> TargetApi for Arc<T> {
    async fn create_load_balancer(
        &self,
        tree: &LoadBalancerTree,
    ) -> Result<CreatedLoadBalancer, lbrep_api::Error> {
        T::create_load_balancer(self, tree).await
    }
}
