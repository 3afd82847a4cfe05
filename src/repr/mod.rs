//! Model representation: SoA trees and the forest that owns them.

mod forest;
mod tree;

pub use forest::Forest;
pub use tree::{NodeId, Tree, TreeValidationError};
