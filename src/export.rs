//! Point-in-time JSON export and re-import of a workflow snapshot.
//!
//! The document is the snapshot itself, pretty-printed:
//!
//! ```json
//! {
//!   "nodes": {
//!     "start-node": { "id": "start-node", "type": "start", "label": "Start", "children": [] }
//!   },
//!   "rootId": "start-node"
//! }
//! ```

use crate::error::{ExportError, SnapshotError};
use crate::model::WorkflowSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Serializes a snapshot as pretty-printed JSON.
pub fn to_json_pretty(snapshot: &WorkflowSnapshot) -> Result<String, ExportError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Parses an exported document and checks it against the tree invariants.
pub fn from_json(json: &str) -> Result<WorkflowSnapshot, SnapshotError> {
    let snapshot: WorkflowSnapshot =
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Reads and validates an exported document from disk.
pub fn from_file(path: impl AsRef<Path>) -> Result<WorkflowSnapshot, SnapshotError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    from_json(&content)
}

/// `workflow-<unix-millis>.json`
pub fn file_name(unix_millis: u128) -> String {
    format!("workflow-{}.json", unix_millis)
}

/// Export file name stamped with the current wall-clock time.
pub fn file_name_now() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    file_name(millis)
}

/// Writes `snapshot` into `dir` under a timestamped name and returns the
/// full path of the new file.
pub fn write_to_dir(
    dir: impl AsRef<Path>,
    snapshot: &WorkflowSnapshot,
) -> Result<PathBuf, ExportError> {
    let path = dir.as_ref().join(file_name_now());
    write_to_path(&path, snapshot)?;
    Ok(path)
}

/// Writes `snapshot` to exactly `path`.
pub fn write_to_path(path: &Path, snapshot: &WorkflowSnapshot) -> Result<(), ExportError> {
    let json = to_json_pretty(snapshot)?;
    fs::write(path, json).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), nodes = snapshot.len(), "exported workflow");
    Ok(())
}
