use super::Edit;
use crate::error::EditError;
use crate::model::{NodeId, NodeKind, WorkflowSnapshot};

/// Replaces the label of `node_id`. Structure is left untouched.
pub fn relabel_node(
    snapshot: &WorkflowSnapshot,
    node_id: &NodeId,
    label: &str,
) -> Result<Edit, EditError> {
    let node = snapshot
        .get(node_id.as_str())
        .ok_or_else(|| EditError::NoSuchNode(node_id.clone()))?;
    if node.kind == NodeKind::Start {
        return Err(EditError::ImmutableLabel(node_id.clone()));
    }

    let mut nodes = snapshot.nodes.clone();
    let mut updated = node.clone();
    updated.label = label.to_string();
    nodes.insert(node_id.clone(), updated);

    Ok(Edit {
        snapshot: WorkflowSnapshot {
            nodes,
            root_id: snapshot.root_id.clone(),
        },
        advisory: None,
    })
}
