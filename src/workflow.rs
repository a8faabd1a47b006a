use crate::config::{EditorConfig, OrphanPolicy};
use crate::editor::{self, Edit};
use crate::error::{Advisory, EditError, SnapshotError};
use crate::history::{DEFAULT_HISTORY_CAPACITY, History};
use crate::ids::{IdSource, UuidIds};
use crate::model::{NodeId, NodeKind, WorkflowSnapshot};
use std::fmt;

/// How many fresh ids to draw before giving up on finding an unused one.
const MAX_ID_ATTEMPTS: usize = 64;

/// What an applied structural edit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    /// The inserted or deleted node.
    pub node_id: NodeId,
    pub advisory: Option<Advisory>,
    /// Nodes removed by [`OrphanPolicy::Sweep`] after the edit.
    pub swept: Vec<NodeId>,
}

/// The editing session: the current snapshot plus its undo history.
///
/// Structural edits (`insert_node*`, `delete_node`) are recorded in history;
/// relabels replace the current snapshot without a history entry, so an undo
/// after a relabel returns to the previous structural state. Rejected edits
/// leave the session exactly as it was.
pub struct Workflow {
    current: WorkflowSnapshot,
    history: History,
    orphan_policy: OrphanPolicy,
    ids: Box<dyn IdSource>,
}

/// Configures a [`Workflow`] before it starts.
pub struct WorkflowBuilder {
    initial: WorkflowSnapshot,
    history_capacity: usize,
    orphan_policy: OrphanPolicy,
    ids: Box<dyn IdSource>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            initial: WorkflowSnapshot::initial(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            orphan_policy: OrphanPolicy::default(),
            ids: Box::new(UuidIds),
        }
    }

    /// Applies the capacity and orphan policy of `config`.
    pub fn with_config(mut self, config: &EditorConfig) -> Self {
        self.history_capacity = config.history_capacity;
        self.orphan_policy = config.orphan_policy;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Starts the session from an existing snapshot instead of a bare start
    /// node. The snapshot is validated first.
    pub fn with_snapshot(mut self, snapshot: WorkflowSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        self.initial = snapshot;
        Ok(self)
    }

    pub fn build(self) -> Workflow {
        Workflow {
            history: History::new(self.initial.clone(), self.history_capacity),
            current: self.initial,
            orphan_policy: self.orphan_policy,
            ids: self.ids,
        }
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("current", &self.current)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("orphan_policy", &self.orphan_policy)
            .finish_non_exhaustive()
    }
}

impl Workflow {
    /// A session holding only the start node, with default settings.
    pub fn new() -> Self {
        WorkflowBuilder::new().build()
    }

    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Inserts a node after `parent_id`, using arm 0 if the parent is a
    /// branch.
    pub fn insert_node(
        &mut self,
        parent_id: &str,
        kind: NodeKind,
    ) -> Result<EditReport, EditError> {
        self.insert_node_at(parent_id, kind, 0)
    }

    /// Inserts a node after `parent_id` into `slot` (only meaningful when the
    /// parent is a branch).
    pub fn insert_node_at(
        &mut self,
        parent_id: &str,
        kind: NodeKind,
        slot: usize,
    ) -> Result<EditReport, EditError> {
        let parent_id = NodeId::from(parent_id);
        let new_id = self.fresh_id();
        editor::insert_node(&self.current, &parent_id, kind, slot, new_id.clone())
            .map(|edit| self.commit(edit, new_id, "insert"))
            .inspect_err(|e| {
                tracing::warn!(parent = %parent_id, %kind, slot, error = %e, "rejected insert")
            })
    }

    /// Deletes `node_id`, promoting its first child into its place.
    pub fn delete_node(&mut self, node_id: &str) -> Result<EditReport, EditError> {
        let node_id = NodeId::from(node_id);
        editor::delete_node(&self.current, &node_id)
            .map(|edit| self.commit(edit, node_id.clone(), "delete"))
            .inspect_err(|e| tracing::warn!(node = %node_id, error = %e, "rejected delete"))
    }

    /// Renames `node_id`. Not recorded in history.
    pub fn relabel_node(&mut self, node_id: &str, label: &str) -> Result<(), EditError> {
        let node_id = NodeId::from(node_id);
        let edit = editor::relabel_node(&self.current, &node_id, label)
            .inspect_err(|e| tracing::warn!(node = %node_id, error = %e, "rejected relabel"))?;
        self.current = edit.snapshot;
        tracing::trace!(node = %node_id, label, "relabelled node");
        Ok(())
    }

    /// Steps back one structural edit. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                tracing::debug!(cursor = self.history.cursor(), "undo");
                true
            }
            None => false,
        }
    }

    /// Re-applies the next structural edit. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                tracing::debug!(cursor = self.history.cursor(), "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The current snapshot, for renderers and other readers.
    pub fn snapshot(&self) -> &WorkflowSnapshot {
        &self.current
    }

    /// An owned copy of the current snapshot, ready for serialization.
    pub fn export_snapshot(&self) -> WorkflowSnapshot {
        self.current.clone()
    }

    /// Replaces the session with `snapshot`, clearing undo history.
    pub fn load(&mut self, snapshot: WorkflowSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        tracing::info!(nodes = snapshot.len(), root = %snapshot.root_id(), "loaded workflow");
        self.history.reset(snapshot.clone());
        self.current = snapshot;
        Ok(())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    fn fresh_id(&mut self) -> NodeId {
        let mut id = self.ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.current.contains(&id) {
                break;
            }
            id = self.ids.next_id();
        }
        id
    }

    fn commit(&mut self, edit: Edit, node_id: NodeId, operation: &'static str) -> EditReport {
        let Edit { snapshot, advisory } = edit;
        if let Some(advisory) = &advisory {
            tracing::warn!(%advisory, "edit detached a subtree");
        }

        let (snapshot, swept) = match self.orphan_policy {
            OrphanPolicy::Retain => (snapshot, Vec::new()),
            OrphanPolicy::Sweep => editor::sweep_orphans(&snapshot),
        };

        self.history.record(snapshot.clone());
        self.current = snapshot;
        tracing::debug!(
            operation,
            node = %node_id,
            nodes = self.current.len(),
            history = self.history.len(),
            swept = swept.len(),
            "applied edit"
        );

        EditReport {
            node_id,
            advisory,
            swept,
        }
    }
}
