//! # Branchwork - Workflow Tree Editing Core
//!
//! **Branchwork** is the state model behind a visual editor for simple
//! linear and branching workflows. A workflow is a tree of steps rooted at a
//! single start node: actions run one after another, conditional branches
//! split into a TRUE and a FALSE arm, and end nodes terminate a path.
//!
//! ## Core Workflow
//!
//! The crate is organised leaves first:
//!
//! 1.  **Node Store** ([`model`]): a flat arena of nodes keyed by id, wrapped in
//!     an immutable [`WorkflowSnapshot`](model::WorkflowSnapshot) that knows how
//!     to validate its own tree invariants.
//! 2.  **Tree Editor** ([`editor`]): pure transforms (insert, delete, relabel)
//!     that turn one snapshot into the next, or explain why they refused.
//! 3.  **History** ([`history`]): a bounded linear undo/redo log of snapshots.
//! 4.  **Workflow** ([`workflow`]): the editing session that ties the three
//!     together and is handed to renderers and exporters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use branchwork::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut workflow = Workflow::new();
//!     let root = workflow.snapshot().root_id().clone();
//!
//!     // start -> action
//!     let action = workflow.insert_node(&root, NodeKind::Action)?.node_id;
//!     workflow.relabel_node(&action, "Send welcome email")?;
//!
//!     // start -> branch -> (TRUE: action, FALSE: end)
//!     let branch = workflow.insert_node(&root, NodeKind::Branch)?.node_id;
//!     workflow.insert_node_at(&branch, NodeKind::End, 1)?;
//!
//!     println!("{}", OutlineFormatter::format(workflow.snapshot()));
//!
//!     workflow.undo();
//!     assert!(workflow.can_redo());
//!
//!     let path = export::write_to_dir(".", workflow.snapshot())?;
//!     println!("Exported to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod history;
pub mod ids;
pub mod model;
pub mod outline;
pub mod prelude;
pub mod workflow;
