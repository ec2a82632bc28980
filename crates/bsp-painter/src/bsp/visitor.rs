//! Visitor pattern for depth-ordered traversal.

use crate::Polygon;

/// Receives coplanar polygon groups during tree traversal.
///
/// One call per visited node, with all polygons lying on that node's
/// plane. Implement this to render, collect, or measure polygons in the
/// traversal's order without coupling the tree to any of those concerns.
pub trait BspVisitor {
    fn visit(&mut self, polygons: &[Polygon]);
}

/// Collects visited polygons into a vector, preserving visit order.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Polygon>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected polygons, in visit order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.collected
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, polygons: &[Polygon]) {
        self.collected.extend_from_slice(polygons);
    }
}

/// Adapts a closure into a visitor.
pub struct FnVisitor<F>
where
    F: FnMut(&[Polygon]),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&[Polygon]),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(&[Polygon]),
{
    fn visit(&mut self, polygons: &[Polygon]) {
        (self.func)(polygons);
    }
}
