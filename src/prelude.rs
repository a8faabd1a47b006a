//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the branchwork
//! crate, so that an editor front end can get going with a single import.
//!
//! # Example
//!
//! ```rust,no_run
//! use branchwork::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let snapshot = export::from_file("path/to/workflow.json")?;
//! let mut workflow = Workflow::builder().with_snapshot(snapshot)?.build();
//!
//! let root = workflow.snapshot().root_id().clone();
//! workflow.insert_node(&root, NodeKind::Action)?;
//!
//! println!("{}", OutlineFormatter::format(workflow.snapshot()));
//! # Ok(())
//! # }
//! ```

// Editing session
pub use crate::workflow::{EditReport, Workflow, WorkflowBuilder};

// Node store
pub use crate::model::{INITIAL_ROOT_ID, Node, NodeId, NodeKind, WorkflowSnapshot};

// Pure transforms and history
pub use crate::editor::{Edit, delete_node, insert_node, relabel_node, sweep_orphans};
pub use crate::history::{DEFAULT_HISTORY_CAPACITY, History};

// Configuration and ids
pub use crate::config::{EditorConfig, OrphanPolicy};
pub use crate::ids::{IdSource, SequentialIds, UuidIds};

// Error types
pub use crate::error::{Advisory, ConfigError, EditError, ExportError, SnapshotError};

// Export and rendering
pub use crate::export;
pub use crate::outline::OutlineFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
