//! Plane representation and the point/segment predicates built on it.

use nalgebra::{Point3, Vector3};

/// Default tolerance for plane classification.
///
/// A point whose signed distance to a plane is within this value is
/// considered to lie on the plane. This is also the tolerance behind the
/// polygon coplanarity test: the underlying requirement is "on the same
/// plane within modeling tolerance", never exact floating equality.
pub const PLANE_EPSILON: f64 = 1e-9;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// On the positive side of the normal.
    Front,
    /// On the negative side of the normal.
    Back,
    /// Within epsilon of the plane.
    OnPlane,
}

/// Where a polygon sits relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every vertex is in front of the plane.
    Front,
    /// Every vertex is behind the plane.
    Back,
    /// Every vertex lies on the plane.
    Coplanar,
    /// Vertices on both sides; the plane cuts the polygon.
    Spanning,
}

/// A plane in 3D space, stored as `normal · point = offset` with a unit
/// normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane3D {
    /// Creates a plane from a normal vector and offset. The normal is
    /// normalized (and the offset rescaled to match).
    ///
    /// # Panics
    /// Panics if the normal has zero length.
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane through `point` with the given normal direction.
    ///
    /// # Panics
    /// Panics if the normal has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "plane normal cannot be zero");
        let unit_normal = normal / norm;
        Self {
            normal: unit_normal,
            offset: unit_normal.dot(&point.coords),
        }
    }

    /// Creates a plane through three non-collinear points. The normal
    /// follows the right-hand rule: `(b - a) × (c - a)`.
    ///
    /// # Panics
    /// Panics if the points are (nearly) collinear.
    pub fn from_three_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self::from_point_and_normal(a, normal)
    }

    /// The unit normal of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed distance from `point` to the plane: positive in front of
    /// the normal, negative behind, zero on the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies a point against the plane with the default
    /// [`PLANE_EPSILON`] tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f64>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies a point against the plane with a caller-chosen
    /// tolerance.
    pub fn classify_point_with_epsilon(&self, point: Point3<f64>, epsilon: f64) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// The same plane with its normal reversed.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// The closest point on the plane to `point`.
    #[inline]
    pub fn project_point(&self, point: Point3<f64>) -> Point3<f64> {
        point - self.normal * self.signed_distance(point)
    }

    /// Intersects the segment `start → end` with the plane.
    ///
    /// Returns `Some((t, point))` with `t` in `[0, 1]` (0 at `start`),
    /// or `None` when the segment is parallel to the plane or the
    /// crossing lies outside the segment. Callers that already know the
    /// endpoints straddle the plane treat `None` as a degenerate case
    /// and emit nothing.
    pub fn intersect_segment(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
    ) -> Option<(f64, Point3<f64>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        if denom.abs() < f64::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start + direction * t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xz_plane_at(height: f64) -> Plane3D {
        Plane3D::new(Vector3::new(0.0, 1.0, 0.0), height)
    }

    #[test]
    fn new_normalizes() {
        let plane = Plane3D::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert!((plane.normal().norm() - 1.0).abs() < 1e-12);
        assert!((plane.offset() - 2.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn zero_normal_is_fatal() {
        Plane3D::new(Vector3::zeros(), 0.0);
    }

    #[test]
    fn signed_distance_signs() {
        let plane = xz_plane_at(1.0);
        assert!(plane.signed_distance(Point3::new(0.0, 3.0, 0.0)) > 0.0);
        assert!(plane.signed_distance(Point3::new(0.0, -3.0, 0.0)) < 0.0);
        assert!(plane.signed_distance(Point3::new(5.0, 1.0, -2.0)).abs() < 1e-12);
    }

    #[test]
    fn classify_point_uses_epsilon() {
        let plane = xz_plane_at(0.0);
        assert_eq!(
            plane.classify_point(Point3::new(0.0, 1e-12, 0.0)),
            PlaneSide::OnPlane
        );
        assert_eq!(
            plane.classify_point(Point3::new(0.0, 1e-3, 0.0)),
            PlaneSide::Front
        );
        assert_eq!(
            plane.classify_point(Point3::new(0.0, -1e-3, 0.0)),
            PlaneSide::Back
        );
    }

    #[test]
    fn from_three_points_right_hand_rule() {
        let plane = Plane3D::from_three_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!((plane.normal() - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn flipped_swaps_sides() {
        let plane = xz_plane_at(0.0);
        let point = Point3::new(0.0, 2.0, 0.0);
        assert_eq!(plane.classify_point(point), PlaneSide::Front);
        assert_eq!(plane.flipped().classify_point(point), PlaneSide::Back);
    }

    #[test]
    fn project_point_lands_on_plane() {
        let plane = xz_plane_at(1.0);
        let projected = plane.project_point(Point3::new(2.0, 5.0, -3.0));
        assert!((projected - Point3::new(2.0, 1.0, -3.0)).norm() < 1e-12);
    }

    #[test]
    fn intersect_segment_midpoint() {
        let plane = xz_plane_at(0.0);
        let (t, point) = plane
            .intersect_segment(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0))
            .unwrap();
        assert!((t - 0.5).abs() < 1e-12);
        assert!((point - Point3::origin()).norm() < 1e-12);
    }

    #[test]
    fn intersect_segment_parallel_is_none() {
        let plane = xz_plane_at(0.0);
        let hit = plane.intersect_segment(Point3::new(0.0, 1.0, 0.0), Point3::new(5.0, 1.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn intersect_segment_outside_range_is_none() {
        let plane = xz_plane_at(0.0);
        let hit = plane.intersect_segment(Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 2.0, 0.0));
        assert!(hit.is_none());
    }
}
