use super::node::{Node, NodeId, NodeKind};
use crate::error::SnapshotError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the start node in a freshly created workflow.
pub const INITIAL_ROOT_ID: &str = "start-node";

/// One complete, immutable value of the workflow tree.
///
/// Nodes live in a flat arena keyed by id and refer to each other by id.
/// The map is ordered so that serialized exports are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) root_id: NodeId,
}

impl Default for WorkflowSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

impl WorkflowSnapshot {
    /// A workflow holding nothing but its start node.
    pub fn initial() -> Self {
        let root_id = NodeId::from(INITIAL_ROOT_ID);
        let mut nodes = BTreeMap::new();
        nodes.insert(root_id.clone(), Node::new(root_id.clone(), NodeKind::Start));
        Self { nodes, root_id }
    }

    /// Assembles a snapshot from raw parts, rejecting anything that breaks the
    /// tree invariants.
    pub fn from_parts(
        nodes: BTreeMap<NodeId, Node>,
        root_id: NodeId,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Self { nodes, root_id };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&self.root_id)
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the node holding `id` in one of its slots by scanning the whole
    /// map. Returns the parent's id and the slot index.
    pub fn parent_of(&self, id: &str) -> Option<(NodeId, usize)> {
        self.nodes.values().find_map(|node| {
            node.children
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|child| child.as_str() == id))
                .map(|slot| (node.id.clone(), slot))
        })
    }

    /// Ids of every node reachable from the root, root included.
    pub fn reachable(&self) -> AHashSet<NodeId> {
        let mut visited = AHashSet::with_capacity(self.nodes.len());
        self.walk_from(&self.root_id, &mut visited);
        visited
    }

    /// Ids of nodes present in the map but not reachable from the root,
    /// in sorted order.
    pub fn orphans(&self) -> Vec<NodeId> {
        let reachable = self.reachable();
        self.nodes
            .keys()
            .filter(|id| !reachable.contains(*id))
            .cloned()
            .collect()
    }

    /// Checks every structural invariant of the node arena.
    ///
    /// Unreachable nodes are tolerated as long as they are themselves well
    /// formed; they are what an `end` splice leaves behind.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let root = self
            .nodes
            .get(&self.root_id)
            .ok_or_else(|| SnapshotError::MissingRoot(self.root_id.clone()))?;
        if root.kind != NodeKind::Start {
            return Err(SnapshotError::RootNotStart {
                root_id: self.root_id.clone(),
                kind: root.kind,
            });
        }

        let mut parents: AHashMap<&NodeId, &NodeId> = AHashMap::with_capacity(self.nodes.len());
        for (key, node) in &self.nodes {
            if key != &node.id {
                return Err(SnapshotError::KeyMismatch {
                    key: key.clone(),
                    id: node.id.clone(),
                });
            }
            if node.kind == NodeKind::Start && key != &self.root_id {
                return Err(SnapshotError::MultipleStarts(key.clone()));
            }

            let max = node.kind.max_children();
            if node.children.len() > max {
                return Err(SnapshotError::Arity {
                    node_id: key.clone(),
                    kind: node.kind,
                    count: node.children.len(),
                    max,
                });
            }
            if node.kind != NodeKind::Branch && node.children.iter().any(Option::is_none) {
                return Err(SnapshotError::EmptySlot(key.clone()));
            }

            for child in node.child_ids() {
                if !self.nodes.contains_key(child) {
                    return Err(SnapshotError::DanglingChild {
                        parent: key.clone(),
                        child: child.clone(),
                    });
                }
                if child == &self.root_id {
                    return Err(SnapshotError::RootReferenced {
                        root_id: self.root_id.clone(),
                        parent: key.clone(),
                    });
                }
                if let Some(first) = parents.insert(child, key) {
                    return Err(SnapshotError::SharedChild {
                        child: child.clone(),
                        first: first.clone(),
                        second: key.clone(),
                    });
                }
            }
        }

        // Every node has at most one parent here, so anything not reachable
        // from a parentless node sits on a cycle.
        let mut visited = AHashSet::with_capacity(self.nodes.len());
        for id in self.nodes.keys().filter(|id| !parents.contains_key(id)) {
            self.walk_from(id, &mut visited);
        }
        if let Some(id) = self.nodes.keys().find(|id| !visited.contains(*id)) {
            return Err(SnapshotError::Cycle(id.clone()));
        }

        Ok(())
    }

    fn walk_from(&self, start: &NodeId, visited: &mut AHashSet<NodeId>) {
        let mut stack = vec![start.clone()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.child_ids().cloned());
            }
        }
    }
}
