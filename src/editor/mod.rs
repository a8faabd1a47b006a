//! Pure structural transforms over a [`WorkflowSnapshot`].
//!
//! Each transform borrows the current snapshot and either returns a brand new
//! one or an [`EditError`] explaining why nothing changed. The input is never
//! modified, so a rejected edit is always a clean no-op for the caller.

use crate::error::{Advisory, EditError};
use crate::model::{NodeId, WorkflowSnapshot};

mod delete;
mod insert;
mod relabel;

pub use delete::delete_node;
pub use insert::insert_node;
pub use relabel::relabel_node;

/// The product of a successful edit.
#[derive(Debug, Clone)]
pub struct Edit {
    pub snapshot: WorkflowSnapshot,
    pub advisory: Option<Advisory>,
}

impl Edit {
    fn checked(
        snapshot: WorkflowSnapshot,
        advisory: Option<Advisory>,
    ) -> Result<Self, EditError> {
        snapshot.validate()?;
        Ok(Self { snapshot, advisory })
    }
}

/// Drops every node that is no longer reachable from the root.
///
/// Returns the pruned snapshot together with the ids that were removed, in
/// sorted order.
pub fn sweep_orphans(snapshot: &WorkflowSnapshot) -> (WorkflowSnapshot, Vec<NodeId>) {
    let reachable = snapshot.reachable();
    let (kept, dropped): (Vec<_>, Vec<_>) = snapshot
        .nodes
        .iter()
        .partition(|(id, _)| reachable.contains(*id));

    let pruned = WorkflowSnapshot {
        nodes: kept
            .into_iter()
            .map(|(id, node)| (id.clone(), node.clone()))
            .collect(),
        root_id: snapshot.root_id.clone(),
    };
    let removed = dropped.into_iter().map(|(id, _)| id.clone()).collect();
    (pruned, removed)
}
