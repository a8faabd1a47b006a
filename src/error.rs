use crate::model::{NodeId, NodeKind};
use std::fmt;
use thiserror::Error;

/// Reasons a structural or label edit was rejected.
///
/// A rejected edit never touches the snapshot it was applied to, so every
/// variant is recoverable: the caller keeps its current state and may show
/// the message to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node '{0}' does not exist in the current workflow")]
    NoSuchNode(NodeId),

    #[error("Node '{0}' is the workflow root and cannot be deleted or moved")]
    InvalidRoot(NodeId),

    #[error("Node '{0}' is not attached to any parent")]
    NoSuchParent(NodeId),

    #[error("Slot {slot} is not a valid branch arm on node '{node_id}' (expected 0 or 1)")]
    InvalidSlot { node_id: NodeId, slot: usize },

    #[error("Node '{0}' is an end node and cannot have successors")]
    TerminalParent(NodeId),

    #[error("A workflow has exactly one start node; another one cannot be inserted")]
    StartNotInsertable,

    #[error("Node id '{0}' is already in use")]
    DuplicateId(NodeId),

    #[error("The label of node '{0}' cannot be edited")]
    ImmutableLabel(NodeId),

    #[error("Edit would break the workflow structure: {0}")]
    InvariantViolation(#[from] SnapshotError),
}

/// Non-fatal notices attached to an edit that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// A subtree is no longer reachable from the root. `cause` is the node
    /// whose insertion or removal detached it: an `end` node spliced into an
    /// occupied slot, or a deleted branch whose other arm had nowhere to go.
    OrphanCreated { cause: NodeId, detached: NodeId },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::OrphanCreated { cause, detached } => write!(
                f,
                "Editing node '{}' detached the subtree rooted at '{}'",
                cause, detached
            ),
        }
    }
}

/// Structural problems found while validating or importing a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Could not read workflow file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse workflow JSON: {0}")]
    Json(String),

    #[error("Root node '{0}' is missing from the node map")]
    MissingRoot(NodeId),

    #[error("Root node '{root_id}' has kind '{kind}', expected 'start'")]
    RootNotStart { root_id: NodeId, kind: NodeKind },

    #[error("Node '{0}' is a second start node; only the root may be a start node")]
    MultipleStarts(NodeId),

    #[error("Node stored under key '{key}' declares id '{id}'")]
    KeyMismatch { key: NodeId, id: NodeId },

    #[error("Node '{parent}' references child '{child}', which does not exist")]
    DanglingChild { parent: NodeId, child: NodeId },

    #[error("Node '{child}' is referenced by more than one parent ('{first}' and '{second}')")]
    SharedChild {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },

    #[error("Root node '{root_id}' is referenced as a child of '{parent}'")]
    RootReferenced { root_id: NodeId, parent: NodeId },

    #[error("Node '{node_id}' of kind '{kind}' has {count} child slots, at most {max} allowed")]
    Arity {
        node_id: NodeId,
        kind: NodeKind,
        count: usize,
        max: usize,
    },

    #[error("Node '{0}' has an empty child slot, which only branch nodes may have")]
    EmptySlot(NodeId),

    #[error("Node '{0}' is part of a cycle")]
    Cycle(NodeId),
}

/// Errors raised while writing an export document.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Failed to serialize workflow: {0}")]
    Serialize(String),

    #[error("Could not write '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised while loading an `EditorConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("History capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}
