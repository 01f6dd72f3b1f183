// ── Replication run ──
//
// One code path for all three modes. The graph comes either from the live
// source or from a snapshot; it then goes either to a snapshot or through
// projection to the target.

use std::path::PathBuf;

use lbrep_api::octavia::models::LoadBalancerTree;
use strum::{Display, EnumString};
use tracing::info;

use crate::api::Connector;
use crate::convert::project;
use crate::error::CoreError;
use crate::index::{GraphCounts, GraphIndex};
use crate::publish::TargetPublisher;
use crate::reader::SourceGraphReader;
use crate::snapshot::SnapshotStore;

/// Where the graph comes from and where it goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Source API to target API.
    #[default]
    Create,
    /// Source API to snapshot file.
    ToFile,
    /// Snapshot file to target API.
    FromFile,
}

/// Parameters of a single replication run.
#[derive(Debug, Clone)]
pub struct ReplicationRequest {
    pub lb_id: String,
    pub mode: Mode,
    pub reuse_vip: bool,
    /// Project the tree but make no call to the target.
    pub dry_run: bool,
    /// Explicit snapshot file instead of the store's conventional path.
    pub snapshot: Option<PathBuf>,
}

impl ReplicationRequest {
    pub fn new(lb_id: impl Into<String>, mode: Mode) -> Self {
        Self {
            lb_id: lb_id.into(),
            mode,
            reuse_vip: false,
            dry_run: false,
            snapshot: None,
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The graph was written to a snapshot.
    Saved { path: PathBuf, counts: GraphCounts },
    /// The target accepted the tree.
    Created {
        id: String,
        tree: LoadBalancerTree,
        counts: GraphCounts,
    },
    /// Dry run: the tree that would have been submitted.
    Planned {
        tree: LoadBalancerTree,
        counts: GraphCounts,
    },
}

impl Outcome {
    pub fn counts(&self) -> GraphCounts {
        match self {
            Outcome::Saved { counts, .. }
            | Outcome::Created { counts, .. }
            | Outcome::Planned { counts, .. } => *counts,
        }
    }

    pub fn tree(&self) -> Option<&LoadBalancerTree> {
        match self {
            Outcome::Saved { .. } => None,
            Outcome::Created { tree, .. } | Outcome::Planned { tree, .. } => Some(tree),
        }
    }
}

/// Run one replication.
///
/// The connector is consulted only for the side a mode actually touches:
/// a from-file run reads and checks the snapshot before it asks for the
/// target, and a dry run never asks for it at all.
pub async fn replicate<C: Connector>(
    request: &ReplicationRequest,
    store: &SnapshotStore,
    connector: &C,
) -> Result<Outcome, CoreError> {
    info!(lb_id = %request.lb_id, mode = %request.mode, dry_run = request.dry_run, "starting replication");

    let index = match request.mode {
        Mode::FromFile => match &request.snapshot {
            Some(path) => SnapshotStore::load_from(path, &request.lb_id)?,
            None => store.load(&request.lb_id)?,
        },
        Mode::Create | Mode::ToFile => {
            let source = connector.source().await?;
            SourceGraphReader::new(&source).collect(&request.lb_id).await?
        }
    };
    let counts = index.counts();

    if request.mode == Mode::ToFile {
        let path = save(store, request, &index)?;
        return Ok(Outcome::Saved { path, counts });
    }

    let tree = project(&index, request.reuse_vip)?;
    if request.dry_run {
        info!(lb_id = %request.lb_id, "dry run: skipping creation");
        return Ok(Outcome::Planned { tree, counts });
    }

    let target = connector.target().await?;
    let id = TargetPublisher::new(&target).create(&tree).await?;
    Ok(Outcome::Created { id, tree, counts })
}

fn save(store: &SnapshotStore, request: &ReplicationRequest, index: &GraphIndex) -> Result<PathBuf, CoreError> {
    match &request.snapshot {
        Some(path) => {
            SnapshotStore::save_to(index, path)?;
            Ok(path.clone())
        }
        None => store.save(index),
    }
}
