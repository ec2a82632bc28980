//! Scene: objects, a camera, and the lazily rebuilt BSP tree tying the
//! pipeline together.

use nalgebra::Vector3;

use crate::{BspTree, Camera, Polygon, ScreenPolygon};

/// A group of polygons placed in the world at an origin offset.
///
/// Polygons are stored in object-local coordinates; the origin is
/// applied when the scene gathers world geometry. Moving an object is
/// therefore cheap, at the cost of a tree rebuild on the next render.
#[derive(Debug, Clone, Default)]
pub struct SceneObject {
    origin: Vector3<f64>,
    polygons: Vec<Polygon>,
}

impl SceneObject {
    /// Creates an object at the world origin from local-space polygons.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            origin: Vector3::zeros(),
            polygons,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector3<f64>) {
        self.origin = origin;
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Tags every polygon of the object with one color.
    pub fn set_color(&mut self, color: crate::Color) {
        for polygon in &mut self.polygons {
            polygon.set_color(color);
        }
    }

    /// The object's polygons translated into world space.
    pub fn world_polygons(&self) -> impl Iterator<Item = Polygon> + '_ {
        self.polygons.iter().map(|p| p.translated(self.origin))
    }
}

/// Owns the scene geometry, the camera, and a cached BSP tree.
///
/// The tree is rebuilt wholesale, and lazily: any mutable access to an
/// object marks it stale, and the next [`render`](Self::render) swaps in
/// a freshly built tree before traversing. A caller never observes a
/// partially rebuilt tree. Camera changes never force a rebuild; only
/// traversal order and projection depend on the camera.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    camera: Camera,
    tree: BspTree,
    tree_stale: bool,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            camera,
            tree: BspTree::new(),
            tree_stale: false,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.tree_stale = true;
        self.objects.push(object);
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn object(&self, index: usize) -> &SceneObject {
        &self.objects[index]
    }

    /// Mutable object access; marks the tree for rebuild.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn object_mut(&mut self, index: usize) -> &mut SceneObject {
        self.tree_stale = true;
        &mut self.objects[index]
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove_object(&mut self, index: usize) -> SceneObject {
        self.tree_stale = true;
        self.objects.remove(index)
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Discards the cached tree and rebuilds it from current geometry.
    pub fn rebuild_tree(&mut self) {
        let world: Vec<Polygon> = self
            .objects
            .iter()
            .flat_map(|object| object.world_polygons())
            .collect();
        self.tree = BspTree::from_polygons(world);
        self.tree_stale = false;
    }

    /// Runs the full pipeline for the current camera: rebuild the tree
    /// if geometry changed, depth-sort from the camera position, and
    /// project every polygon, in order, to screen space. Polygons
    /// clipped away by the near plane are dropped.
    ///
    /// The returned sequence is in back-to-front draw order; a renderer
    /// that fills the shapes in this order gets correct occlusion from
    /// overdraw alone.
    pub fn render(&mut self) -> Vec<ScreenPolygon> {
        if self.tree_stale {
            self.rebuild_tree();
        }

        self.tree
            .depth_sorted_polygons(self.camera.position())
            .into_iter()
            .map(|polygon| self.camera.project_polygon(polygon))
            .filter(|projected| !projected.is_empty())
            .collect()
    }
}
