//! Tests for the pure tree transforms.
mod common;
use common::*;
use branchwork::prelude::*;

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn root() -> NodeId {
    id(INITIAL_ROOT_ID)
}

#[test]
fn test_insert_action_under_start() {
    let base = WorkflowSnapshot::initial();
    let edit = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).expect("insert");

    assert_eq!(children_of(&edit.snapshot, INITIAL_ROOT_ID), vec![Some(id("a"))]);
    let action = edit.snapshot.get("a").unwrap();
    assert_eq!(action.kind, NodeKind::Action);
    assert_eq!(action.label, "New Action");
    assert!(action.children.is_empty());
    assert!(edit.advisory.is_none());
    assert_tree_invariants(&edit.snapshot);

    // The input snapshot is untouched.
    assert_eq!(base, WorkflowSnapshot::initial());
}

#[test]
fn test_insert_branch_splices_before_existing_child() {
    let base = WorkflowSnapshot::initial();
    let first = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let second = insert_node(&first.snapshot, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let snapshot = second.snapshot;

    assert_eq!(children_of(&snapshot, INITIAL_ROOT_ID), vec![Some(id("b"))]);
    let branch = snapshot.get("b").unwrap();
    assert_eq!(branch.label, "Condition");
    assert_eq!(branch.child(0), Some(&id("a")));
    assert_eq!(branch.child(1), None);
    assert_eq!(branch.children.len(), 1);
    assert_tree_invariants(&snapshot);
}

#[test]
fn test_slot_argument_ignored_for_linear_parents() {
    let base = WorkflowSnapshot::initial();
    let edit = insert_node(&base, &root(), NodeKind::Action, 1, id("a")).unwrap();
    assert_eq!(children_of(&edit.snapshot, INITIAL_ROOT_ID), vec![Some(id("a"))]);

    let spliced = insert_node(&edit.snapshot, &root(), NodeKind::Action, 7, id("c")).unwrap();
    assert_eq!(children_of(&spliced.snapshot, INITIAL_ROOT_ID), vec![Some(id("c"))]);
    assert_eq!(children_of(&spliced.snapshot, "c"), vec![Some(id("a"))]);
}

#[test]
fn test_insert_into_empty_false_arm_pads_true_arm() {
    let base = WorkflowSnapshot::initial();
    let with_branch = insert_node(&base, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let edit = insert_node(&with_branch.snapshot, &id("b"), NodeKind::End, 1, id("e")).unwrap();

    assert_eq!(children_of(&edit.snapshot, "b"), vec![None, Some(id("e"))]);
    assert_eq!(edit.snapshot.get("e").unwrap().label, "End");
    assert!(edit.advisory.is_none());
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_end_splice_orphans_old_subtree() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let b = insert_node(&a.snapshot, &id("a"), NodeKind::Action, 0, id("b")).unwrap();
    let edit = insert_node(&b.snapshot, &root(), NodeKind::End, 0, id("e")).unwrap();

    assert_eq!(children_of(&edit.snapshot, INITIAL_ROOT_ID), vec![Some(id("e"))]);
    assert!(edit.snapshot.get("e").unwrap().children.is_empty());
    assert_eq!(
        edit.advisory,
        Some(Advisory::OrphanCreated {
            cause: id("e"),
            detached: id("a"),
        })
    );

    // The detached subtree is still in the map, just unreachable.
    assert!(edit.snapshot.contains("a"));
    assert!(edit.snapshot.contains("b"));
    assert_eq!(edit.snapshot.orphans(), vec![id("a"), id("b")]);
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_insert_rejections() {
    let base = WorkflowSnapshot::initial();
    let with_branch = insert_node(&base, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let with_end = insert_node(&with_branch.snapshot, &id("b"), NodeKind::End, 0, id("e")).unwrap();
    let snapshot = &with_end.snapshot;

    assert_eq!(
        insert_node(snapshot, &id("ghost"), NodeKind::Action, 0, id("x")).unwrap_err(),
        EditError::NoSuchNode(id("ghost"))
    );
    assert_eq!(
        insert_node(snapshot, &root(), NodeKind::Start, 0, id("x")).unwrap_err(),
        EditError::StartNotInsertable
    );
    assert_eq!(
        insert_node(snapshot, &id("e"), NodeKind::Action, 0, id("x")).unwrap_err(),
        EditError::TerminalParent(id("e"))
    );
    assert_eq!(
        insert_node(snapshot, &id("b"), NodeKind::Action, 2, id("x")).unwrap_err(),
        EditError::InvalidSlot {
            node_id: id("b"),
            slot: 2
        }
    );
    assert_eq!(
        insert_node(snapshot, &root(), NodeKind::Action, 0, id("e")).unwrap_err(),
        EditError::DuplicateId(id("e"))
    );
}

#[test]
fn test_delete_promotes_single_child() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let b = insert_node(&a.snapshot, &id("a"), NodeKind::Action, 0, id("b")).unwrap();
    let edit = delete_node(&b.snapshot, &id("a")).unwrap();

    assert!(!edit.snapshot.contains("a"));
    assert_eq!(children_of(&edit.snapshot, INITIAL_ROOT_ID), vec![Some(id("b"))]);
    assert!(edit.advisory.is_none());
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_delete_leaf_under_linear_parent_clears_children() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let edit = delete_node(&a.snapshot, &id("a")).unwrap();

    assert!(children_of(&edit.snapshot, INITIAL_ROOT_ID).is_empty());
    assert_eq!(edit.snapshot, WorkflowSnapshot::initial());
}

#[test]
fn test_delete_leaf_in_true_arm_shifts_false_arm_down() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let b = insert_node(&a.snapshot, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let e = insert_node(&b.snapshot, &id("b"), NodeKind::End, 1, id("e")).unwrap();
    assert_eq!(children_of(&e.snapshot, "b"), vec![Some(id("a")), Some(id("e"))]);

    let edit = delete_node(&e.snapshot, &id("a")).unwrap();
    // Positional removal: the former FALSE arm now sits in slot 0.
    assert_eq!(children_of(&edit.snapshot, "b"), vec![Some(id("e"))]);
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_delete_branch_promotes_true_arm_and_orphans_false_arm() {
    let base = WorkflowSnapshot::initial();
    let b = insert_node(&base, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let t = insert_node(&b.snapshot, &id("b"), NodeKind::Action, 0, id("t")).unwrap();
    let f = insert_node(&t.snapshot, &id("b"), NodeKind::Action, 1, id("f")).unwrap();

    let edit = delete_node(&f.snapshot, &id("b")).unwrap();
    assert_eq!(children_of(&edit.snapshot, INITIAL_ROOT_ID), vec![Some(id("t"))]);
    assert_eq!(
        edit.advisory,
        Some(Advisory::OrphanCreated {
            cause: id("b"),
            detached: id("f"),
        })
    );
    assert_eq!(edit.snapshot.orphans(), vec![id("f")]);
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_delete_branch_with_empty_true_arm_orphans_false_arm() {
    let base = WorkflowSnapshot::initial();
    let b = insert_node(&base, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let f = insert_node(&b.snapshot, &id("b"), NodeKind::Action, 1, id("f")).unwrap();
    assert_eq!(children_of(&f.snapshot, "b"), vec![None, Some(id("f"))]);

    let edit = delete_node(&f.snapshot, &id("b")).unwrap();
    // Nothing to promote, so the start node is left without a child.
    assert!(children_of(&edit.snapshot, INITIAL_ROOT_ID).is_empty());
    assert_eq!(edit.snapshot.orphans(), vec![id("f")]);
    assert_eq!(
        edit.advisory,
        Some(Advisory::OrphanCreated {
            cause: id("b"),
            detached: id("f"),
        })
    );
    assert_tree_invariants(&edit.snapshot);
}

#[test]
fn test_delete_only_false_arm_leaves_trailing_empty_slot() {
    let base = WorkflowSnapshot::initial();
    let b = insert_node(&base, &root(), NodeKind::Branch, 0, id("b")).unwrap();
    let x = insert_node(&b.snapshot, &id("b"), NodeKind::End, 1, id("x")).unwrap();
    assert_eq!(children_of(&x.snapshot, "b"), vec![None, Some(id("x"))]);

    let edit = delete_node(&x.snapshot, &id("x")).unwrap();
    assert_eq!(children_of(&edit.snapshot, "b"), vec![None]);
    assert!(edit.advisory.is_none());
    assert_tree_invariants(&edit.snapshot);

    let json = export::to_json_pretty(&edit.snapshot).unwrap();
    let reloaded = export::from_json(&json).unwrap();
    assert_eq!(children_of(&reloaded, "b"), vec![None]);
    assert_eq!(reloaded, edit.snapshot);
}

#[test]
fn test_delete_rejections() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let e = insert_node(&a.snapshot, &root(), NodeKind::End, 0, id("e")).unwrap();

    assert_eq!(
        delete_node(&e.snapshot, &root()).unwrap_err(),
        EditError::InvalidRoot(root())
    );
    assert_eq!(
        delete_node(&e.snapshot, &id("ghost")).unwrap_err(),
        EditError::NoSuchNode(id("ghost"))
    );
    // `a` was detached by the end splice and has no parent any more.
    assert_eq!(
        delete_node(&e.snapshot, &id("a")).unwrap_err(),
        EditError::NoSuchParent(id("a"))
    );
}

#[test]
fn test_relabel_is_idempotent_and_structure_preserving() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();

    let once = relabel_node(&a.snapshot, &id("a"), "Charge card").unwrap();
    let twice = relabel_node(&once.snapshot, &id("a"), "Charge card").unwrap();
    assert_eq!(once.snapshot, twice.snapshot);
    assert_eq!(once.snapshot.get("a").unwrap().label, "Charge card");
    assert_eq!(
        once.snapshot.get("a").unwrap().children,
        a.snapshot.get("a").unwrap().children
    );
}

#[test]
fn test_relabel_rejections() {
    let base = WorkflowSnapshot::initial();
    assert_eq!(
        relabel_node(&base, &root(), "Begin").unwrap_err(),
        EditError::ImmutableLabel(root())
    );
    assert_eq!(
        relabel_node(&base, &id("ghost"), "x").unwrap_err(),
        EditError::NoSuchNode(id("ghost"))
    );
}

#[test]
fn test_sweep_removes_only_unreachable_nodes() {
    let base = WorkflowSnapshot::initial();
    let a = insert_node(&base, &root(), NodeKind::Action, 0, id("a")).unwrap();
    let b = insert_node(&a.snapshot, &id("a"), NodeKind::Action, 0, id("b")).unwrap();
    let e = insert_node(&b.snapshot, &root(), NodeKind::End, 0, id("e")).unwrap();

    let (swept, removed) = sweep_orphans(&e.snapshot);
    assert_eq!(removed, vec![id("a"), id("b")]);
    assert_eq!(swept.len(), 2);
    assert!(swept.orphans().is_empty());
    assert_tree_invariants(&swept);
}
