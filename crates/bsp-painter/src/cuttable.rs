//! Two-sided polygon splitting, used by BSP tree construction.

use crate::{Classification, Plane3D, PlaneSide, Polygon};

/// Geometry that a plane can cut into a front part and a back part.
pub trait Cuttable {
    /// Cuts the geometry by a plane, returning `(front, back)`.
    ///
    /// - **Front** or **Coplanar**: `(Some(self), None)`
    /// - **Back**: `(None, Some(self))`
    /// - **Spanning**: `(Some(front_part), Some(back_part))`
    ///
    /// Both halves of a spanning cut inherit the input's color.
    fn cut(&self, plane: &Plane3D) -> (Option<Polygon>, Option<Polygon>);
}

impl Cuttable for Polygon {
    fn cut(&self, plane: &Plane3D) -> (Option<Polygon>, Option<Polygon>) {
        match self.classify(plane) {
            Classification::Front | Classification::Coplanar => (Some(self.clone()), None),
            Classification::Back => (None, Some(self.clone())),
            Classification::Spanning => split_polygon(self, plane),
        }
    }
}

/// Splits a spanning polygon along the plane in a single edge walk.
///
/// Equivalent to clipping once against the plane and once against its
/// flipped twin, but both halves are emitted in one pass: each vertex
/// goes to the list(s) for its side, and every front/back edge crossing
/// contributes the intersection point to both.
fn split_polygon(polygon: &Polygon, plane: &Plane3D) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let sides: Vec<PlaneSide> = vertices.iter().map(|v| plane.classify_point(*v)).collect();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    for i in 0..n {
        let j = (i + 1) % n;
        let vertex = vertices[i];

        match sides[i] {
            PlaneSide::Front => front_verts.push(vertex),
            PlaneSide::Back => back_verts.push(vertex),
            // On-plane vertices belong to both halves.
            PlaneSide::OnPlane => {
                front_verts.push(vertex);
                back_verts.push(vertex);
            }
        }

        let crosses = matches!(
            (sides[i], sides[j]),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );
        if crosses
            && let Some((_, intersection)) = plane.intersect_segment(vertex, vertices[j])
        {
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    let front = (front_verts.len() >= 3).then(|| Polygon::new(front_verts, polygon.color()));
    let back = (back_verts.len() >= 3).then(|| Polygon::new(back_verts, polygon.color()));

    (front, back)
}
