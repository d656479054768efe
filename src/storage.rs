use crate::error::Result;
use crate::models::Project;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The persisted document: project collection wrapped in a metadata envelope.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    metadata: SnapshotMetadata,
    projects: BTreeMap<String, Project>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotMetadata {
    last_saved: DateTime<Utc>,
    version: String,
}

/// JSON snapshot persistence for the project collection.
///
/// `load` never fails: a missing file yields an empty collection and a
/// corrupt one is logged and treated as empty. `save` propagates errors,
/// since a failed write is the one durability signal the caller can act on.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Storage {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full collection, replacing any previous snapshot.
    pub fn save(&self, projects: &BTreeMap<String, Project>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = Snapshot {
            metadata: SnapshotMetadata {
                last_saved: Utc::now(),
                version: "1.0".to_string(),
            },
            projects: projects.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), projects = projects.len(), "snapshot saved");
        Ok(())
    }

    /// Read the collection back. Accepts both the enveloped format and the
    /// legacy format that stored the bare project map at the top level.
    pub fn load(&self) -> BTreeMap<String, Project> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read snapshot, starting empty");
                return BTreeMap::new();
            }
        };

        let document: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse snapshot, starting empty");
                return BTreeMap::new();
            }
        };

        // A `projects` key marks the enveloped format; anything else is a
        // legacy document holding the project map directly.
        let projects_value = match document {
            serde_json::Value::Object(ref map) if map.contains_key("projects") => {
                map["projects"].clone()
            }
            other => other,
        };

        match serde_json::from_value(projects_value) {
            Ok(projects) => projects,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to decode projects, starting empty");
                BTreeMap::new()
            }
        }
    }
}
