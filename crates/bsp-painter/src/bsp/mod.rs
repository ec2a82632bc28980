//! Binary Space Partitioning for painter's-algorithm rendering.
//!
//! The tree partitions scene polygons recursively by splitting planes
//! derived from the polygons themselves, so that for any observer
//! position a correct back-to-front draw order falls out of a single
//! traversal. Build once, traverse every frame:
//!
//! ```ignore
//! use bsp_painter::BspTree;
//! use nalgebra::Point3;
//!
//! let tree = BspTree::from_polygons(scene_polygons);
//!
//! // Per frame, as the observer moves:
//! for polygon in tree.depth_sorted_polygons(observer_position) {
//!     // draw farthest-first; occluders land on top
//! }
//! ```
//!
//! - [`BspTree`]: container and construction entry points
//! - [`BspNode`]: a splitting plane plus its coplanar polygons
//! - [`PlaneSelector`]: strategy for picking splitters during the build
//! - [`BspVisitor`]: callback-style traversal in either depth order

mod node;
mod selector;
mod tree;
mod visitor;

pub use node::BspNode;
pub use selector::{FirstPolygon, PlaneSelector};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
