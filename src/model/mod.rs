pub mod node;
pub mod snapshot;

pub use node::*;
pub use snapshot::*;
