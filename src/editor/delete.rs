use super::Edit;
use crate::error::{Advisory, EditError};
use crate::model::{NodeId, NodeKind, WorkflowSnapshot};

/// Removes `node_id` and reattaches its first child to the grandparent.
///
/// When the removed node has no child in slot 0 the parent slot it occupied
/// goes away: a branch parent loses that arm positionally (so deleting arm 0
/// moves arm 1 down to index 0), any other parent ends up with no children.
pub fn delete_node(snapshot: &WorkflowSnapshot, node_id: &NodeId) -> Result<Edit, EditError> {
    if node_id == &snapshot.root_id {
        return Err(EditError::InvalidRoot(node_id.clone()));
    }
    let node = snapshot
        .get(node_id.as_str())
        .ok_or_else(|| EditError::NoSuchNode(node_id.clone()))?;
    let (parent_id, index) = snapshot
        .parent_of(node_id.as_str())
        .ok_or_else(|| EditError::NoSuchParent(node_id.clone()))?;
    let parent = snapshot
        .get(parent_id.as_str())
        .ok_or_else(|| EditError::NoSuchParent(node_id.clone()))?;

    let mut updated_parent = parent.clone();
    let heir = node.first_child().cloned();
    match &heir {
        Some(child) => updated_parent.children[index] = Some(child.clone()),
        None if parent.kind == NodeKind::Branch => {
            updated_parent.children.remove(index);
        }
        None => updated_parent.children.clear(),
    }

    // Only slot 0 is promoted; anything else the node held is cut loose.
    let advisory = node
        .child_ids()
        .find(|child| Some(*child) != heir.as_ref())
        .map(|detached| Advisory::OrphanCreated {
            cause: node_id.clone(),
            detached: detached.clone(),
        });

    let mut nodes = snapshot.nodes.clone();
    nodes.remove(node_id);
    nodes.insert(parent_id, updated_parent);

    Edit::checked(
        WorkflowSnapshot {
            nodes,
            root_id: snapshot.root_id.clone(),
        },
        advisory,
    )
}
