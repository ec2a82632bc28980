//! Colored convex polygon: the unit of geometry the whole engine moves
//! around.

use nalgebra::{Point3, Vector3};

use crate::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};

/// RGBA color tag carried by a polygon through clipping, splitting, and
/// projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A convex polygon in 3D space: an ordered vertex list plus a color.
///
/// Vertex order is geometrically significant. Edge `i` runs from vertex
/// `i` to vertex `(i + 1) mod n`, and the winding determines the normal
/// direction via the right-hand rule. Vertices are expected to be
/// coplanar and the outline convex; neither is enforced on the release
/// path, and violating inputs give undefined clip/normal results.
///
/// A polygon with zero vertices is valid: it is the result of clipping
/// everything away, and renderers simply skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
    color: Color,
}

impl Polygon {
    /// Creates a polygon from a vertex list and a color.
    ///
    /// # Panics (debug builds only)
    /// Panics if four or more vertices are given and they are not
    /// coplanar within [`PLANE_EPSILON`].
    pub fn new(vertices: Vec<Point3<f64>>, color: Color) -> Self {
        debug_assert!(
            Self::vertices_coplanar(&vertices),
            "polygon vertices must be coplanar"
        );
        Self { vertices, color }
    }

    fn vertices_coplanar(vertices: &[Point3<f64>]) -> bool {
        if vertices.len() <= 3 {
            return true;
        }
        let plane = Plane3D::from_three_points(vertices[0], vertices[1], vertices[2]);
        vertices[3..]
            .iter()
            .all(|v| plane.classify_point(*v) == PlaneSide::OnPlane)
    }

    /// The vertices, in winding order.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Number of vertices (and, for non-empty polygons, of edges).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True for the zero-vertex polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The polygon's color tag.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replaces the color tag, leaving the geometry untouched.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Iterates over the edges `(vertex[i], vertex[(i + 1) mod n])`.
    ///
    /// The wraparound edge is included for every `n >= 1`; a one-vertex
    /// polygon yields a single degenerate edge back to itself.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// The (unnormalized) normal from the first three vertices,
    /// right-hand rule over the winding.
    ///
    /// # Panics
    /// Panics if the polygon has fewer than three vertices.
    pub fn normal(&self) -> Vector3<f64> {
        let a = self.vertices[0];
        let b = self.vertices[1];
        let c = self.vertices[2];
        (b - a).cross(&(c - a))
    }

    /// The unit normal, or `None` if the first three vertices are
    /// collinear.
    ///
    /// # Panics
    /// Panics if the polygon has fewer than three vertices.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal();
        let len = n.norm();
        if len > f64::EPSILON { Some(n / len) } else { None }
    }

    /// The plane this polygon lies on.
    ///
    /// # Panics
    /// Panics if the polygon has fewer than three vertices or its first
    /// three vertices are collinear.
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_three_points(self.vertices[0], self.vertices[1], self.vertices[2])
    }

    /// Average of the vertices.
    ///
    /// # Panics
    /// Panics if the polygon is empty.
    pub fn centroid(&self) -> Point3<f64> {
        assert!(!self.is_empty(), "centroid of an empty polygon");
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// The same polygon shifted by `offset`.
    pub fn translated(&self, offset: Vector3<f64>) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
            color: self.color,
        }
    }

    /// Tests whether `other` lies on this polygon's plane, using the
    /// first three vertices of each and the [`PLANE_EPSILON`] tolerance.
    ///
    /// # Panics
    /// Panics if either polygon has fewer than three vertices.
    pub fn is_coplanar_with(&self, other: &Polygon) -> bool {
        let plane = self.plane();
        other
            .vertices
            .iter()
            .take(3)
            .all(|v| plane.classify_point(*v) == PlaneSide::OnPlane)
    }

    /// Classifies this polygon against a plane.
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point(*vertex) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        if on_plane == self.vertices.len() {
            Classification::Coplanar
        } else if back == 0 {
            Classification::Front
        } else if front == 0 {
            Classification::Back
        } else {
            Classification::Spanning
        }
    }

    /// Clips the polygon against a plane, keeping the part strictly in
    /// front of it (single-plane Sutherland-Hodgman).
    ///
    /// Walks the edges in winding order; an inside start vertex is
    /// emitted as-is, and every inside/outside transition emits the
    /// edge-plane intersection point. Near-plane vertices (within
    /// [`PLANE_EPSILON`]) count as outside, so slivers along the plane
    /// collapse to nothing. Winding is preserved, the color is
    /// inherited, and a polygon entirely behind the plane clips to the
    /// empty polygon.
    pub fn clip(&self, plane: &Plane3D) -> Polygon {
        let n = self.vertices.len();
        let inside: Vec<bool> = self
            .vertices
            .iter()
            .map(|v| plane.signed_distance(*v) > PLANE_EPSILON)
            .collect();

        let mut clipped = Vec::with_capacity(n + 1);
        for i in 0..n {
            let j = (i + 1) % n;
            if inside[i] {
                clipped.push(self.vertices[i]);
            }
            if inside[i] != inside[j] {
                // A parallel edge cannot straddle the plane; if the
                // classifications disagree anyway, the edge is
                // degenerate and emits nothing.
                if let Some((_, point)) = plane.intersect_segment(self.vertices[i], self.vertices[j])
                {
                    clipped.push(point);
                }
            }
        }

        Polygon {
            vertices: clipped,
            color: self.color,
        }
    }
}
