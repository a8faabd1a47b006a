use super::Edit;
use crate::error::{Advisory, EditError};
use crate::model::{Node, NodeId, NodeKind, WorkflowSnapshot};

/// Inserts a new node of `kind` under `parent_id`, named `new_id`.
///
/// A branch parent receives the node in arm `slot` (0 = TRUE, 1 = FALSE);
/// every other parent uses its single slot and ignores `slot`. If the slot
/// was occupied, the new node is spliced in front of the old occupant, which
/// becomes its only child. An `end` node has nowhere to put the old occupant,
/// so that subtree is detached and reported through
/// [`Advisory::OrphanCreated`].
pub fn insert_node(
    snapshot: &WorkflowSnapshot,
    parent_id: &NodeId,
    kind: NodeKind,
    slot: usize,
    new_id: NodeId,
) -> Result<Edit, EditError> {
    if kind == NodeKind::Start {
        return Err(EditError::StartNotInsertable);
    }
    let parent = snapshot
        .get(parent_id.as_str())
        .ok_or_else(|| EditError::NoSuchNode(parent_id.clone()))?;
    if parent.is_terminal() {
        return Err(EditError::TerminalParent(parent_id.clone()));
    }
    if snapshot.contains(new_id.as_str()) {
        return Err(EditError::DuplicateId(new_id));
    }

    let slot = match parent.kind {
        NodeKind::Branch if slot > 1 => {
            return Err(EditError::InvalidSlot {
                node_id: parent_id.clone(),
                slot,
            });
        }
        NodeKind::Branch => slot,
        _ => 0,
    };

    let mut updated_parent = parent.clone();
    if updated_parent.children.len() <= slot {
        updated_parent.children.resize(slot + 1, None);
    }
    let displaced = updated_parent.children[slot].replace(new_id.clone());

    let mut new_node = Node::new(new_id.clone(), kind);
    let mut advisory = None;
    if let Some(old_child) = displaced {
        if kind == NodeKind::End {
            advisory = Some(Advisory::OrphanCreated {
                cause: new_id.clone(),
                detached: old_child,
            });
        } else {
            new_node.children.push(Some(old_child));
        }
    }

    let mut nodes = snapshot.nodes.clone();
    nodes.insert(parent_id.clone(), updated_parent);
    nodes.insert(new_id, new_node);

    Edit::checked(
        WorkflowSnapshot {
            nodes,
            root_id: snapshot.root_id.clone(),
        },
        advisory,
    )
}
