//! Hierarchy builder and squarified treemap engine.
//!
//! The pipeline turns a nested JSON dataset into laid-out rectangles:
//! [`RawNode`] (parsed input) → [`Hierarchy`] (arena tree with dotted ids,
//! aggregated values and layout ordering) → [`TreemapLayout::compute`]
//! (bounds on every node, proportional to aggregate value).

mod hierarchy;
mod squarify;

pub use hierarchy::{Hierarchy, HierarchyError, Node, NodeId, RawNode};
pub use squarify::TreemapLayout;
