//! Common test utilities for building workflows and checking invariants.
use branchwork::prelude::*;
use std::collections::HashSet;

/// A session with deterministic ids (`node-1`, `node-2`, ...).
#[allow(dead_code)]
pub fn sequential_workflow() -> Workflow {
    Workflow::builder()
        .with_id_source(SequentialIds::new("node"))
        .build()
}

/// Same as [`sequential_workflow`] but sweeping orphans after each edit.
#[allow(dead_code)]
pub fn sweeping_workflow() -> Workflow {
    Workflow::builder()
        .with_id_source(SequentialIds::new("node"))
        .with_orphan_policy(OrphanPolicy::Sweep)
        .build()
}

/// Builds `start -> branch(TRUE: action, FALSE: end)`.
///
/// Returns the session and the ids `(branch, action, end)`.
#[allow(dead_code)]
pub fn branching_workflow() -> (Workflow, NodeId, NodeId, NodeId) {
    let mut workflow = sequential_workflow();
    let action = workflow
        .insert_node(INITIAL_ROOT_ID, NodeKind::Action)
        .expect("insert action")
        .node_id;
    let branch = workflow
        .insert_node(INITIAL_ROOT_ID, NodeKind::Branch)
        .expect("insert branch")
        .node_id;
    let end = workflow
        .insert_node_at(&branch, NodeKind::End, 1)
        .expect("insert end")
        .node_id;
    (workflow, branch, action, end)
}

/// The children of `id`, panicking if the node is missing.
#[allow(dead_code)]
pub fn children_of(snapshot: &WorkflowSnapshot, id: &str) -> Vec<Option<NodeId>> {
    snapshot
        .get(id)
        .unwrap_or_else(|| panic!("node '{}' missing", id))
        .children
        .clone()
}

/// Shorthand for an occupied slot.
#[allow(dead_code)]
pub fn some(id: &NodeId) -> Option<NodeId> {
    Some(id.clone())
}

/// Asserts the tree properties every reachable snapshot must have: one start
/// node which is the root, every child reference resolves, and no node has
/// two parents.
#[allow(dead_code)]
pub fn assert_tree_invariants(snapshot: &WorkflowSnapshot) {
    let starts: Vec<_> = snapshot
        .nodes()
        .values()
        .filter(|n| n.kind == NodeKind::Start)
        .collect();
    assert_eq!(starts.len(), 1, "expected exactly one start node");
    assert_eq!(&starts[0].id, snapshot.root_id());

    let mut referenced = HashSet::new();
    for node in snapshot.nodes().values() {
        for child in node.child_ids() {
            assert!(
                snapshot.contains(child),
                "child '{}' of '{}' is missing",
                child,
                node.id
            );
            assert!(
                referenced.insert(child.clone()),
                "node '{}' has more than one parent",
                child
            );
        }
    }

    snapshot.validate().expect("snapshot should validate");
}
