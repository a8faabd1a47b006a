use crate::model::{Node, NodeId, NodeKind, WorkflowSnapshot};
use ahash::AHashSet;

/// Renders a workflow snapshot as an indented plain-text tree.
///
/// ```text
/// Start (start) [start-node]
/// └── Condition (branch) [node-2]
///     ├── TRUE: New Action (action) [node-1]
///     └── FALSE: (empty)
/// ```
pub struct OutlineFormatter;

impl OutlineFormatter {
    /// Format the part of the snapshot reachable from the root, followed by
    /// any detached subtrees.
    pub fn format(snapshot: &WorkflowSnapshot) -> String {
        let mut out = String::new();
        let mut seen = AHashSet::with_capacity(snapshot.len());
        Self::format_node(snapshot, snapshot.root_id(), "", None, &mut seen, &mut out);

        let detached: Vec<NodeId> = snapshot
            .orphans()
            .into_iter()
            .filter(|id| snapshot.parent_of(id).is_none())
            .collect();
        if !detached.is_empty() {
            out.push_str("\nDetached:\n");
            for id in &detached {
                Self::format_node(snapshot, id, "", None, &mut seen, &mut out);
            }
        }
        out
    }

    /// One line for `id`, then its slots beneath it. `prefix` is the
    /// indentation inherited from ancestors; `arm` labels branch arms.
    fn format_node(
        snapshot: &WorkflowSnapshot,
        id: &NodeId,
        prefix: &str,
        arm: Option<&str>,
        seen: &mut AHashSet<NodeId>,
        out: &mut String,
    ) {
        if let Some(arm) = arm {
            out.push_str(arm);
            out.push_str(": ");
        }
        let Some(node) = snapshot.get(id) else {
            out.push_str(&format!("<missing {}>\n", id));
            return;
        };
        out.push_str(&Self::format_label(node));
        out.push('\n');
        // A malformed snapshot could loop; print each node once.
        if !seen.insert(id.clone()) {
            return;
        }

        let slots: Vec<(Option<&str>, Option<&NodeId>)> = match node.kind {
            NodeKind::Branch => vec![(Some("TRUE"), node.child(0)), (Some("FALSE"), node.child(1))],
            _ => node.child_ids().map(|child| (None, Some(child))).collect(),
        };

        let last = slots.len().saturating_sub(1);
        for (i, (arm, child)) in slots.into_iter().enumerate() {
            let (connector, extension) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(prefix);
            out.push_str(connector);
            match child {
                Some(child) => {
                    let child_prefix = format!("{}{}", prefix, extension);
                    Self::format_node(snapshot, child, &child_prefix, arm, seen, out);
                }
                None => {
                    if let Some(arm) = arm {
                        out.push_str(arm);
                        out.push_str(": ");
                    }
                    out.push_str("(empty)\n");
                }
            }
        }
    }

    fn format_label(node: &Node) -> String {
        format!("{} ({}) [{}]", node.label, node.kind, node.id)
    }
}
