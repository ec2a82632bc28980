//! BSP tree node.

use crate::{Plane3D, Polygon};

/// A node in the BSP tree.
///
/// Each node holds the plane that partitions its subtree, the polygons
/// coplanar with that plane, and optional front/back child subtrees
/// (front is the positive-normal half-space). Coplanar polygons
/// accumulate at one node and are never split against each other.
///
/// Nodes are built whole by [`BspTree`](crate::BspTree) construction and
/// carry no mutation API: the tree's shape is fixed once built, and only
/// traversal order depends on the observer. Each child is exclusively
/// owned by its parent, so dropping a node drops its subtree.
#[derive(Debug, Clone)]
pub struct BspNode {
    plane: Plane3D,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a node from its plane, coplanar polygons, and fully built
    /// children.
    ///
    /// # Panics
    /// Panics if the polygon list is empty: a node exists only to hold
    /// geometry on its plane.
    pub fn new(
        plane: Plane3D,
        polygons: Vec<Polygon>,
        front: Option<BspNode>,
        back: Option<BspNode>,
    ) -> Self {
        assert!(!polygons.is_empty(), "BSP node built without polygons");
        Self {
            plane,
            polygons,
            front: front.map(Box::new),
            back: back.map(Box::new),
        }
    }

    /// The splitting plane of this node.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// The polygons lying on this node's plane.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The subtree in front of the plane, if any.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    /// The subtree behind the plane, if any.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    /// True when the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Total number of polygons in this subtree.
    pub fn polygon_count(&self) -> usize {
        let mut count = self.polygons.len();
        if let Some(ref front) = self.front {
            count += front.polygon_count();
        }
        if let Some(ref back) = self.back {
            count += back.polygon_count();
        }
        count
    }

    /// Depth of this subtree (1 for a leaf).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use nalgebra::{Point3, Vector3};

    fn floor_triangle(z: f64) -> Polygon {
        Polygon::new(
            vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(1.0, 0.0, z),
                Point3::new(0.0, 1.0, z),
            ],
            Color::WHITE,
        )
    }

    fn xy_plane() -> Plane3D {
        Plane3D::new(Vector3::new(0.0, 0.0, 1.0), 0.0)
    }

    #[test]
    fn childless_node_is_leaf() {
        let node = BspNode::new(xy_plane(), vec![floor_triangle(0.0)], None, None);
        assert!(node.is_leaf());
        assert_eq!(node.polygon_count(), 1);
        assert_eq!(node.depth(), 1);
    }

    #[test]
    #[should_panic]
    fn node_without_polygons_is_fatal() {
        BspNode::new(xy_plane(), vec![], None, None);
    }

    #[test]
    fn counts_and_depth_recurse() {
        let front = BspNode::new(
            xy_plane(),
            vec![floor_triangle(1.0), floor_triangle(1.0)],
            None,
            None,
        );
        let back_inner = BspNode::new(xy_plane(), vec![floor_triangle(-2.0)], None, None);
        let back = BspNode::new(
            xy_plane(),
            vec![floor_triangle(-1.0)],
            Some(back_inner),
            None,
        );
        let root = BspNode::new(
            xy_plane(),
            vec![floor_triangle(0.0)],
            Some(front),
            Some(back),
        );

        assert!(!root.is_leaf());
        assert_eq!(root.polygon_count(), 5);
        assert_eq!(root.depth(), 3);
    }
}
