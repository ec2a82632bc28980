//! Painter's-algorithm visibility engine for convex 3D polygons.
//!
//! The pipeline: a set of colored convex [`Polygon`]s is partitioned
//! once into a [`BspTree`]; every frame, the tree yields the polygons in
//! back-to-front order for the current observer, and the [`Camera`]
//! clips each one against its near plane and projects it to a
//! [`ScreenPolygon`] — a 2D outline plus color, ready for any external
//! rasterizer. [`Scene`] wires those steps together and rebuilds the
//! tree when geometry changes.
//!
//! Rasterization, input handling, and model loading live outside this
//! crate; it consumes polygons and camera deltas and produces ordered
//! 2D shapes, nothing more.

pub mod bsp;
mod camera;
mod cuttable;
mod plane;
mod polygon;
mod scene;
mod screen;

pub use bsp::{BspNode, BspTree, BspVisitor, CollectingVisitor, FirstPolygon, FnVisitor, PlaneSelector};
pub use camera::Camera;
pub use cuttable::Cuttable;
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};
pub use polygon::{Color, Polygon};
pub use scene::{Scene, SceneObject};
pub use screen::ScreenPolygon;
