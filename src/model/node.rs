use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Identifier of a node within a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The four kinds of workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Action,
    Branch,
    End,
}

impl NodeKind {
    /// The label a freshly created node of this kind receives.
    pub fn default_label(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Action => "New Action",
            NodeKind::Branch => "Condition",
            NodeKind::End => "End",
        }
    }

    /// Maximum number of child slots a node of this kind may hold.
    pub fn max_children(self) -> usize {
        match self {
            NodeKind::Start | NodeKind::Action => 1,
            NodeKind::Branch => 2,
            NodeKind::End => 0,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::Action => "action",
            NodeKind::Branch => "branch",
            NodeKind::End => "end",
        };
        f.write_str(name)
    }
}

/// A single step of the workflow.
///
/// `children` is a slot array. Linear kinds use at most slot 0. A branch uses
/// slot 0 for its TRUE arm and slot 1 for its FALSE arm; an empty arm that
/// precedes an occupied one is held as `None` and serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub children: Vec<Option<NodeId>>,
}

impl Node {
    /// Creates a childless node carrying its kind's default label.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            label: kind.default_label().to_string(),
            children: Vec::new(),
        }
    }

    /// The occupant of `slot`, if any.
    pub fn child(&self, slot: usize) -> Option<&NodeId> {
        self.children.get(slot).and_then(Option::as_ref)
    }

    /// The child in slot 0, which is what a deletion promotes.
    pub fn first_child(&self) -> Option<&NodeId> {
        self.child(0)
    }

    /// Every occupied slot, in slot order.
    pub fn child_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.children.iter().flatten()
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == NodeKind::End
    }
}
