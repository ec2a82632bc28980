//! Splitting-plane selection strategies.
//!
//! The splitter chosen at each node decides the tree's shape: a poor
//! choice means deeper trees and more polygons cut in half during
//! construction.

use crate::Polygon;

/// Strategy for choosing which polygon's plane splits a node.
///
/// The chosen polygon's plane becomes the node's splitting plane.
pub trait PlaneSelector {
    /// Selects a polygon from the slice to act as the splitter.
    ///
    /// Returns `None` for an empty slice. The returned reference must
    /// point into the provided slice.
    fn select<'a>(&self, polygons: &'a [Polygon]) -> Option<&'a Polygon>;
}

/// Always selects the first polygon.
///
/// Fast, deterministic for a fixed input order, and makes no attempt at
/// balancing; pathological input orders can produce degenerate trees,
/// which is the accepted cost for build-once scenes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select<'a>(&self, polygons: &'a [Polygon]) -> Option<&'a Polygon> {
        polygons.first()
    }
}
