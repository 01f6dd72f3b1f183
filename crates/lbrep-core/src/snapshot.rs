// ── Snapshot store ──
//
// One JSON document per load balancer, named `<lb_id>_data.json`. Records
// are stored inside the same envelopes the source API returns them in, keys
// are sorted and indentation is four spaces so snapshots diff cleanly.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use lbrep_api::neutron::models::{
    HealthMonitorEnvelope, ListenerEnvelope, LoadBalancerEnvelope, MemberEnvelope, PoolEnvelope,
    StatusTree,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::index::{GraphIndex, GraphIndexBuilder};

const INDENT: &[u8] = b"    ";

/// On-disk layout of a snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    lb_id: String,
    lb_tree: StatusTree,
    lb_details: LoadBalancerEnvelope,
    lb_listeners: BTreeMap<String, ListenerEnvelope>,
    lb_pools: BTreeMap<String, PoolEnvelope>,
    lb_healthmonitors: BTreeMap<String, HealthMonitorEnvelope>,
    lb_members: BTreeMap<String, MemberEnvelope>,
}

impl SnapshotDocument {
    fn from_index(index: &GraphIndex) -> Self {
        fn wrap<T: Clone, E>(records: &BTreeMap<String, T>, envelope: impl Fn(T) -> E) -> BTreeMap<String, E> {
            records.iter().map(|(id, r)| (id.clone(), envelope(r.clone()))).collect()
        }

        Self {
            lb_id: index.lb_id().to_owned(),
            lb_tree: index.status_tree().clone(),
            lb_details: LoadBalancerEnvelope {
                loadbalancer: index.load_balancer().clone(),
            },
            lb_listeners: wrap(index.listeners(), |listener| ListenerEnvelope { listener }),
            lb_pools: wrap(index.pools(), |pool| PoolEnvelope { pool }),
            lb_healthmonitors: wrap(index.health_monitors(), |healthmonitor| HealthMonitorEnvelope {
                healthmonitor,
            }),
            lb_members: wrap(index.members(), |member| MemberEnvelope { member }),
        }
    }

    fn into_index(self, path: &Path) -> Result<GraphIndex, CoreError> {
        fn check_key(path: &Path, map: &str, key: &str, id: &str) -> Result<(), CoreError> {
            if key == id {
                Ok(())
            } else {
                Err(CoreError::MalformedSnapshot {
                    path: path.to_path_buf(),
                    reason: format!("{map} entry '{key}' holds a record with id '{id}'"),
                })
            }
        }

        let mut builder = GraphIndexBuilder::new(self.lb_id, self.lb_tree, self.lb_details.loadbalancer);
        for (key, env) in self.lb_listeners {
            check_key(path, "lb_listeners", &key, &env.listener.id)?;
            builder.insert_listener(env.listener);
        }
        for (key, env) in self.lb_pools {
            check_key(path, "lb_pools", &key, &env.pool.id)?;
            builder.insert_pool(env.pool);
        }
        for (key, env) in self.lb_healthmonitors {
            check_key(path, "lb_healthmonitors", &key, &env.healthmonitor.id)?;
            builder.insert_health_monitor(env.healthmonitor);
        }
        for (key, env) in self.lb_members {
            check_key(path, "lb_members", &key, &env.member.id)?;
            builder.insert_member(env.member);
        }
        Ok(builder.build())
    }
}

/// Rebuild every object with its keys in sorted order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Reads and writes graph snapshots under one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Conventional location of the snapshot for `lb_id`.
    pub fn path_for(&self, lb_id: &str) -> PathBuf {
        self.dir.join(format!("{lb_id}_data.json"))
    }

    /// Write `index` to its conventional location.
    pub fn save(&self, index: &GraphIndex) -> Result<PathBuf, CoreError> {
        let path = self.path_for(index.lb_id());
        Self::save_to(index, &path)?;
        Ok(path)
    }

    /// Write `index` to `path`, replacing any existing file atomically.
    pub fn save_to(index: &GraphIndex, path: &Path) -> Result<(), CoreError> {
        let io_err = |source: std::io::Error| CoreError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        };

        let document = SnapshotDocument::from_index(index);
        let value = serde_json::to_value(&document).map_err(|e| CoreError::MalformedSnapshot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut bytes = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(INDENT));
        sort_keys(value)
            .serialize(&mut ser)
            .map_err(|e| CoreError::MalformedSnapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        bytes.push(b'\n');

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(io_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        info!(path = %path.display(), lb_id = index.lb_id(), "snapshot saved");
        Ok(())
    }

    /// Load the snapshot for `lb_id` from its conventional location.
    pub fn load(&self, lb_id: &str) -> Result<GraphIndex, CoreError> {
        Self::load_from(&self.path_for(lb_id), lb_id)
    }

    /// Load a snapshot from `path`, refusing it unless it was taken of `lb_id`.
    pub fn load_from(path: &Path, lb_id: &str) -> Result<GraphIndex, CoreError> {
        let malformed = |reason: String| CoreError::MalformedSnapshot {
            path: path.to_path_buf(),
            reason,
        };

        debug!(path = %path.display(), "reading snapshot");
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?;
        let found = value
            .get("lb_id")
            .ok_or_else(|| malformed("missing field `lb_id`".into()))?
            .as_str()
            .ok_or_else(|| malformed("`lb_id` is not a string".into()))?;

        if found != lb_id {
            return Err(CoreError::SnapshotIdentityMismatch {
                path: path.to_path_buf(),
                expected: lb_id.to_owned(),
                found: found.to_owned(),
            });
        }

        let document: SnapshotDocument =
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        let index = document.into_index(path)?;

        let counts = index.counts();
        info!(
            path = %path.display(),
            listeners = counts.listeners,
            pools = counts.pools,
            health_monitors = counts.health_monitors,
            members = counts.members,
            "snapshot loaded"
        );
        Ok(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    fn store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn round_trip_preserves_the_index() {
        let (_dir, store) = store();
        let index = fixtures::index_lb1();

        let path = store.save(&index).unwrap();
        assert_eq!(path, store.path_for("lb-1"));
        assert!(path.ends_with("lb-1_data.json"));

        assert_eq!(store.load("lb-1").unwrap(), index);
    }

    #[test]
    fn round_trip_keeps_empty_strings_and_unmodelled_fields() {
        let (_dir, store) = store();
        let index = fixtures::two_listener_index();

        store.save(&index).unwrap();
        let loaded = store.load("lb-9").unwrap();

        assert_eq!(loaded, index);
        assert_eq!(loaded.pools().len(), 3);
        assert_eq!(loaded.load_balancer().vip_address.as_deref(), Some(""));
        assert_eq!(loaded.load_balancer().extra["flavor"]["limits"]["max"], u64::MAX);
        assert_eq!(loaded.load_balancer().extra["flavor"]["limits"]["floor"], -1);
    }

    #[test]
    fn saved_file_is_sorted_enveloped_and_indented() {
        let (_dir, store) = store();
        let path = store.save(&fixtures::index_lb1()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();

        let top: Vec<_> = text
            .lines()
            .filter(|l| l.starts_with("    \"") && !l.starts_with("     "))
            .map(|l| l.trim().split('"').nth(1).unwrap().to_owned())
            .collect();
        assert_eq!(
            top,
            vec![
                "lb_details",
                "lb_healthmonitors",
                "lb_id",
                "lb_listeners",
                "lb_members",
                "lb_pools",
                "lb_tree"
            ]
        );

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lb_listeners"]["lst-1"]["listener"]["protocol_port"], 80);
        assert_eq!(value["lb_healthmonitors"]["hm-1"]["healthmonitor"]["type"], "PING");
        assert_eq!(value["lb_details"]["loadbalancer"]["provider"], "haproxy");
    }

    #[test]
    fn mismatched_identity_is_rejected() {
        let (_dir, store) = store();
        let path = store.save(&fixtures::index_lb1()).unwrap();

        match SnapshotStore::load_from(&path, "lb-3") {
            Err(CoreError::SnapshotIdentityMismatch { expected, found, .. }) => {
                assert_eq!(expected, "lb-3");
                assert_eq!(found, "lb-1");
            }
            other => panic!("expected SnapshotIdentityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_malformed() {
        let (dir, store) = store();
        let path = dir.path().join("lb-1_data.json");
        std::fs::write(&path, r#"{"lb_id": "lb-1", "lb_tree": {}}"#).unwrap();

        assert!(matches!(
            store.load("lb-1"),
            Err(CoreError::MalformedSnapshot { .. })
        ));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("lb-1_data.json"), "{ not json").unwrap();

        assert!(matches!(
            store.load("lb-1"),
            Err(CoreError::MalformedSnapshot { .. })
        ));
    }

    #[test]
    fn absent_file_is_an_io_error() {
        let (_dir, store) = store();
        assert!(matches!(store.load("lb-1"), Err(CoreError::SnapshotIo { .. })));
    }

    #[test]
    fn legacy_monitor_envelope_is_accepted() {
        let (_dir, store) = store();
        let index = fixtures::index_lb1();
        let path = store.save(&index).unwrap();

        let mut value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let envelope = value["lb_healthmonitors"]["hm-1"].as_object_mut().unwrap();
        let monitor = envelope.remove("healthmonitor").unwrap();
        envelope.insert("health_monitor".into(), monitor);
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        assert_eq!(store.load("lb-1").unwrap(), index);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("snapshots"));
        let path = store.save(&fixtures::index_lb1()).unwrap();
        assert!(path.exists());
    }
}
