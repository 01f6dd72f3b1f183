// lbrep-core: collect a Neutron-LBaaS load balancer graph and replicate it
// into Octavia, directly or through a snapshot file.

pub mod api;
pub mod convert;
pub mod error;
pub mod index;
pub mod publish;
pub mod reader;
pub mod replicate;
pub mod snapshot;

#[cfg(test)]
mod fixtures;

pub use api::{Connector, SourceApi, TargetApi};
pub use convert::project;
pub use error::CoreError;
pub use index::{GraphCounts, GraphIndex, GraphIndexBuilder, ResourceKind};
pub use publish::TargetPublisher;
pub use reader::SourceGraphReader;
pub use replicate::{Mode, Outcome, ReplicationRequest, replicate};
pub use snapshot::SnapshotStore;
