use crate::model::NodeId;

/// Supplies identifiers for newly inserted nodes.
///
/// The [`Workflow`](crate::workflow::Workflow) asks its source for an id on
/// every insert; implementations only need to avoid repeating themselves.
/// Collisions with ids already in the workflow are rejected by the editor.
pub trait IdSource: Send {
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic ids of the form `<prefix>-<n>`, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
