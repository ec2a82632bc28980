//! BSP tree container, construction, and depth-ordered traversal.

use nalgebra::Point3;

use crate::{Classification, Cuttable, PlaneSide, Polygon};

use super::node::BspNode;
use super::selector::{FirstPolygon, PlaneSelector};
use super::visitor::BspVisitor;

/// A Binary Space Partitioning tree over convex 3D polygons.
///
/// Construction recursively partitions the input: one polygon's plane
/// becomes the node's splitting plane, polygons coplanar with it stay at
/// the node, and the rest are routed (splitting those that straddle) to
/// the front or back subtree. The result is observer-independent; a
/// single build supports any number of depth-ordered queries as the
/// observer moves.
///
/// Build cost is at least O(P²) in the worst case and straddling
/// polygons duplicate geometry, which is accepted for mostly-static
/// scenes: the tree is rebuilt when geometry changes, not per frame.
///
/// ```
/// use bsp_painter::{BspTree, Color, Polygon};
/// use nalgebra::Point3;
///
/// let triangle = Polygon::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     Color::WHITE,
/// );
/// let tree = BspTree::from_polygons(vec![triangle]);
///
/// let observer = Point3::new(0.0, 0.0, 10.0);
/// let back_to_front = tree.depth_sorted_polygons(observer);
/// assert_eq!(back_to_front.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    root: Option<BspNode>,
}

impl BspTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a tree from polygons, choosing splitters with `selector`.
    ///
    /// Construction is deterministic for a fixed input order and
    /// selector. An empty input yields an empty tree.
    ///
    /// # Panics
    /// Panics if any input polygon has fewer than three vertices or a
    /// degenerate normal; such polygons cannot define or be classified
    /// against splitting planes.
    pub fn build<S: PlaneSelector>(polygons: Vec<Polygon>, selector: &S) -> Self {
        Self {
            root: build_node(polygons, selector),
        }
    }

    /// Builds a tree with the default [`FirstPolygon`] selector.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self::build(polygons, &FirstPolygon)
    }

    /// True when the tree holds no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_ref()
    }

    /// Total polygon count, including fragments created by splitting.
    pub fn polygon_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.polygon_count())
    }

    /// Maximum tree depth (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Returns the tree's polygons ordered back-to-front for an observer
    /// at `observer`, ready for painter's-algorithm drawing: anything
    /// that occludes something else from that position appears after it.
    ///
    /// Allocates a fresh sequence per call and never touches the tree,
    /// so it can be called every frame with a moving observer.
    pub fn depth_sorted_polygons(&self, observer: Point3<f64>) -> Vec<&Polygon> {
        let mut sorted = Vec::with_capacity(self.polygon_count());
        if let Some(ref root) = self.root {
            push_back_to_front(root, observer, &mut sorted);
        }
        sorted
    }

    /// Visits coplanar polygon groups back-to-front relative to `eye`.
    pub fn traverse_back_to_front<V: BspVisitor>(&self, eye: Point3<f64>, visitor: &mut V) {
        if let Some(ref root) = self.root {
            traverse_node(root, eye, visitor, Order::BackToFront);
        }
    }

    /// Visits coplanar polygon groups front-to-back relative to `eye`,
    /// the mirror of [`traverse_back_to_front`](Self::traverse_back_to_front).
    pub fn traverse_front_to_back<V: BspVisitor>(&self, eye: Point3<f64>, visitor: &mut V) {
        if let Some(ref root) = self.root {
            traverse_node(root, eye, visitor, Order::FrontToBack);
        }
    }

    /// Collects every polygon in the tree, in no particular order.
    pub fn collect_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::with_capacity(self.polygon_count());
        collect_recursive(self.root.as_ref(), &mut result);
        result
    }
}

/// Recursively builds a subtree. Pure: consumes its polygon list and
/// returns a finished node, so a constructed tree is never mutated.
fn build_node<S: PlaneSelector>(mut polygons: Vec<Polygon>, selector: &S) -> Option<BspNode> {
    if polygons.is_empty() {
        return None;
    }

    let splitter_idx = polygons
        .iter()
        .position(|p| Some(p) == selector.select(&polygons))?;
    let splitter = polygons.swap_remove(splitter_idx);
    let plane = splitter.plane();

    let mut at_node = vec![splitter];
    let mut front_list = Vec::new();
    let mut back_list = Vec::new();

    for polygon in polygons {
        match polygon.classify(&plane) {
            // Coplanar polygons accumulate at the node; they are never
            // split against each other.
            Classification::Coplanar => at_node.push(polygon),
            Classification::Front => front_list.push(polygon),
            Classification::Back => back_list.push(polygon),
            Classification::Spanning => {
                let (front_part, back_part) = polygon.cut(&plane);
                if let Some(f) = front_part {
                    front_list.push(f);
                }
                if let Some(b) = back_part {
                    back_list.push(b);
                }
            }
        }
    }

    // Empty partitions allocate no child node.
    Some(BspNode::new(
        plane,
        at_node,
        build_node(front_list, selector),
        build_node(back_list, selector),
    ))
}

fn push_back_to_front<'a>(
    node: &'a BspNode,
    observer: Point3<f64>,
    sorted: &mut Vec<&'a Polygon>,
) {
    // Observer on the plane counts as the front side.
    if node.plane().signed_distance(observer) >= 0.0 {
        if let Some(back) = node.back() {
            push_back_to_front(back, observer, sorted);
        }
        sorted.extend(node.polygons());
        if let Some(front) = node.front() {
            push_back_to_front(front, observer, sorted);
        }
    } else {
        if let Some(front) = node.front() {
            push_back_to_front(front, observer, sorted);
        }
        sorted.extend(node.polygons());
        if let Some(back) = node.back() {
            push_back_to_front(back, observer, sorted);
        }
    }
}

#[derive(Clone, Copy)]
enum Order {
    BackToFront,
    FrontToBack,
}

fn traverse_node<V: BspVisitor>(node: &BspNode, eye: Point3<f64>, visitor: &mut V, order: Order) {
    let eye_side = node.plane().classify_point(eye);
    // Which child is farther from the eye.
    let far_is_back = matches!(eye_side, PlaneSide::Front | PlaneSide::OnPlane);
    let (first, second) = match (order, far_is_back) {
        (Order::BackToFront, true) | (Order::FrontToBack, false) => (node.back(), node.front()),
        (Order::BackToFront, false) | (Order::FrontToBack, true) => (node.front(), node.back()),
    };

    if let Some(child) = first {
        traverse_node(child, eye, visitor, order);
    }
    visitor.visit(node.polygons());
    if let Some(child) = second {
        traverse_node(child, eye, visitor, order);
    }
}

fn collect_recursive(node: Option<&BspNode>, result: &mut Vec<Polygon>) {
    if let Some(n) = node {
        result.extend_from_slice(n.polygons());
        collect_recursive(n.front(), result);
        collect_recursive(n.back(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::bsp::visitor::CollectingVisitor;

    fn triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Polygon {
        Polygon::new(
            vec![
                Point3::new(a[0], a[1], a[2]),
                Point3::new(b[0], b[1], b[2]),
                Point3::new(c[0], c[1], c[2]),
            ],
            Color::WHITE,
        )
    }

    fn z_facing_triangle(z: f64) -> Polygon {
        triangle([0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z])
    }

    #[test]
    fn empty_tree() {
        let tree = BspTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.depth_sorted_polygons(Point3::origin()).is_empty());
    }

    #[test]
    fn build_from_no_polygons() {
        assert!(BspTree::from_polygons(vec![]).is_empty());
    }

    #[test]
    fn single_polygon_is_a_leaf() {
        let tree = BspTree::from_polygons(vec![z_facing_triangle(0.0)]);
        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(tree.depth(), 1);
        assert!(tree.root().unwrap().is_leaf());
    }

    #[test]
    fn coplanar_polygons_share_a_node() {
        let left = triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let right = triangle([2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 1.0, 0.0]);

        let tree = BspTree::from_polygons(vec![left, right]);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.root().unwrap().polygons().len(), 2);
    }

    #[test]
    fn parallel_polygons_become_parent_and_child() {
        let tree = BspTree::from_polygons(vec![z_facing_triangle(0.0), z_facing_triangle(1.0)]);
        assert_eq!(tree.polygon_count(), 2);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn straddling_polygon_is_split_not_dropped() {
        // Splitter in the plane z = 0; the second triangle crosses it.
        let splitter = z_facing_triangle(0.0);
        let straddler = triangle([0.2, 0.2, -1.0], [0.2, 0.8, -1.0], [0.2, 0.2, 1.0]);

        let tree = BspTree::from_polygons(vec![splitter, straddler]);

        // One input became two fragments, nothing was lost.
        assert_eq!(tree.polygon_count(), 3);
        let total_area_fragments = tree.collect_polygons().len();
        assert_eq!(total_area_fragments, 3);
        assert!(tree.root().unwrap().front().is_some());
        assert!(tree.root().unwrap().back().is_some());
    }

    #[test]
    fn depth_sorted_is_back_to_front() {
        let near = z_facing_triangle(1.0);
        let far = z_facing_triangle(-1.0);
        let tree = BspTree::from_polygons(vec![near.clone(), far.clone()]);

        // Observer at z = 10: far triangle must be emitted first.
        let sorted = tree.depth_sorted_polygons(Point3::new(0.3, 0.3, 10.0));
        assert_eq!(sorted.len(), 2);
        assert!(sorted[0].centroid().z < sorted[1].centroid().z);

        // Mirror observer: the order flips without rebuilding.
        let sorted = tree.depth_sorted_polygons(Point3::new(0.3, 0.3, -10.0));
        assert!(sorted[0].centroid().z > sorted[1].centroid().z);
    }

    #[test]
    fn depth_sorted_with_observer_on_the_plane() {
        let tree = BspTree::from_polygons(vec![z_facing_triangle(0.0), z_facing_triangle(-1.0)]);
        // Exactly on the root plane counts as the front side, so the
        // back child still comes first.
        let sorted = tree.depth_sorted_polygons(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(sorted.len(), 2);
        assert!(sorted[0].centroid().z < sorted[1].centroid().z);
    }

    #[test]
    fn occluder_is_emitted_after_occludee() {
        // Observer, near quad, far quad all along +z; near occludes far.
        let far = Polygon::new(
            vec![
                Point3::new(-2.0, -2.0, -3.0),
                Point3::new(2.0, -2.0, -3.0),
                Point3::new(2.0, 2.0, -3.0),
                Point3::new(-2.0, 2.0, -3.0),
            ],
            Color::rgb(0, 0, 200),
        );
        let near = Polygon::new(
            vec![
                Point3::new(-1.0, -1.0, -1.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(1.0, 1.0, -1.0),
                Point3::new(-1.0, 1.0, -1.0),
            ],
            Color::rgb(200, 0, 0),
        );

        let tree = BspTree::from_polygons(vec![near.clone(), far.clone()]);
        let sorted = tree.depth_sorted_polygons(Point3::new(0.0, 0.0, 5.0));

        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].color(), far.color());
        assert_eq!(sorted[1].color(), near.color());
    }

    #[test]
    fn visitor_traversals_mirror_each_other() {
        let tree = BspTree::from_polygons(vec![
            z_facing_triangle(-1.0),
            z_facing_triangle(0.0),
            z_facing_triangle(1.0),
        ]);
        let eye = Point3::new(0.0, 0.0, 10.0);

        let mut btf = CollectingVisitor::new();
        tree.traverse_back_to_front(eye, &mut btf);
        let mut ftb = CollectingVisitor::new();
        tree.traverse_front_to_back(eye, &mut ftb);

        let mut reversed = ftb.into_polygons();
        reversed.reverse();
        assert_eq!(btf.into_polygons(), reversed);
    }

    #[test]
    fn collect_preserves_every_fragment() {
        let tree = BspTree::from_polygons(vec![
            z_facing_triangle(0.0),
            z_facing_triangle(1.0),
            z_facing_triangle(2.0),
        ]);
        assert_eq!(tree.collect_polygons().len(), 3);
    }
}
