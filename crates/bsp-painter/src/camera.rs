//! Observer state and the perspective-projection pipeline.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point2, Point3, Vector3};

use crate::{Plane3D, Polygon, ScreenPolygon};

/// A perspective camera projecting 3D polygons onto a pixel image plane.
///
/// The orientation state is a *view vector* (look direction scaled by
/// the near-clip distance, so the image plane sits at its tip) and an
/// up vector that every mutation re-orthogonalizes against it. From
/// those, the image dimensions, and the horizontal field of view, the
/// camera derives a screen basis: the screen center point and two
/// screen-extent vectors whose lengths encode FOV and aspect ratio.
/// The basis is recomputed after every mutation, never accumulated, so
/// continuous rotation and movement stay numerically stable.
///
/// All angles are radians except where a name says degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    position: Point3<f64>,
    /// Look direction scaled by the near-clip distance.
    view: Vector3<f64>,
    up: Vector3<f64>,
    /// Horizontal field of view, radians.
    h_fov: f64,

    // Derived screen basis, recomputed by `update`.
    screen_center: Point3<f64>,
    h_screen: Vector3<f64>,
    v_screen: Vector3<f64>,
}

impl Camera {
    pub const DEFAULT_NEAR_CLIP: f64 = 0.01;
    pub const DEFAULT_FOV_DEGREES: f64 = 75.0;

    /// Creates a camera at the origin looking along +x with +z up.
    ///
    /// # Panics
    /// Panics if either image dimension is zero.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        assert!(
            image_width > 0 && image_height > 0,
            "image dimensions cannot be zero"
        );
        let mut camera = Self {
            image_width,
            image_height,
            position: Point3::origin(),
            view: Vector3::new(Self::DEFAULT_NEAR_CLIP, 0.0, 0.0),
            up: Vector3::new(0.0, 0.0, 1.0),
            h_fov: Self::DEFAULT_FOV_DEGREES.to_radians(),
            screen_center: Point3::origin(),
            h_screen: Vector3::zeros(),
            v_screen: Vector3::zeros(),
        };
        camera.update();
        camera
    }

    /// Image dimensions in pixels, `(width, height)`.
    #[inline]
    pub fn image_dimensions(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// # Panics
    /// Panics if either dimension is zero.
    pub fn set_image_dimensions(&mut self, width: u32, height: u32) {
        assert!(width > 0 && height > 0, "image dimensions cannot be zero");
        self.image_width = width;
        self.image_height = height;
        self.update();
    }

    #[inline]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
        self.update();
    }

    /// Unit look direction.
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.view.normalize()
    }

    /// Points the camera along `direction`, preserving the current
    /// near-clip distance.
    ///
    /// # Panics
    /// Panics if `direction` has zero length.
    pub fn set_direction(&mut self, direction: Vector3<f64>) {
        assert!(
            direction.norm() > f64::EPSILON,
            "view direction cannot be zero"
        );
        let near_clip = self.near_clip_distance();
        self.view = direction;
        self.set_near_clip_distance(near_clip);
    }

    /// Distance from the camera position to its image plane.
    #[inline]
    pub fn near_clip_distance(&self) -> f64 {
        self.view.norm()
    }

    /// Rescales the view vector to the given length, preserving its
    /// direction.
    pub fn set_near_clip_distance(&mut self, distance: f64) {
        self.view = self.view.normalize() * distance;
        self.update();
    }

    /// Horizontal field of view in degrees.
    #[inline]
    pub fn fov_degrees(&self) -> f64 {
        self.h_fov.to_degrees()
    }

    /// Sets the horizontal field of view from degrees (stored in
    /// radians). Values are clamped to the open interval (0°, 90°),
    /// where the screen-extent tangent stays finite and positive.
    pub fn set_fov_degrees(&mut self, degrees: f64) {
        self.h_fov = degrees.to_radians().clamp(1e-3, FRAC_PI_2 - 1e-3);
        self.update();
    }

    /// Rotates the view up or down about the camera's horizontal axis.
    /// `angle` is radians.
    pub fn pitch(&mut self, angle: f64) {
        let axis = self.view.cross(&self.up);
        self.up = rotate_about(self.up, axis, angle);
        self.view = rotate_about(self.view, axis, angle);
        self.update();
    }

    /// Rotates the view left or right about the up vector. `angle` is
    /// radians.
    pub fn yaw(&mut self, angle: f64) {
        self.view = rotate_about(self.view, self.up, angle);
        self.update();
    }

    /// Rotates the up vector about the view direction. `angle` is
    /// radians.
    pub fn roll(&mut self, angle: f64) {
        self.up = rotate_about(self.up, self.view, angle);
        self.update();
    }

    /// Moves the camera in its own frame: `delta.x` along the
    /// horizontal axis (`view × up`), `delta.y` along up, `delta.z`
    /// along the look direction. Each axis is normalized before
    /// scaling, so the components are world-space distances.
    pub fn translate(&mut self, delta: Vector3<f64>) {
        let horizontal = self.view.cross(&self.up).normalize();
        let vertical = self.up.normalize();
        let forward = self.view.normalize();
        self.position += delta.x * horizontal + delta.y * vertical + delta.z * forward;
        self.update();
    }

    /// Projects a 3D point to pixel coordinates (y grows downward).
    ///
    /// The point is scaled onto the image plane (`alpha` is the ratio of
    /// the plane distance to the point's depth along the view vector)
    /// and the in-plane offset is measured against the screen-extent
    /// vectors. A point with zero depth divides by zero and yields
    /// non-finite output; polygon projection clips against the near
    /// plane first so that case never reaches it.
    pub fn project_point(&self, point: Point3<f64>) -> Point2<f64> {
        let to_point = point - self.position;
        let alpha = self.view.dot(&self.view) / self.view.dot(&to_point);
        let c = to_point * alpha - self.view;

        let x = (self.image_width as f64 / 2.0)
            * (1.0 + c.dot(&self.h_screen) / self.h_screen.dot(&self.h_screen));
        let y = (self.image_height as f64 / 2.0)
            * (1.0 - c.dot(&self.v_screen) / self.v_screen.dot(&self.v_screen));
        Point2::new(x, y)
    }

    /// Clips a polygon against the near plane and projects the
    /// remainder to screen space, carrying the color through.
    ///
    /// Geometry behind (or on) the image plane is cut away first, so the
    /// per-point division is always safe; a polygon entirely behind the
    /// plane projects to an empty [`ScreenPolygon`].
    pub fn project_polygon(&self, polygon: &Polygon) -> ScreenPolygon {
        let near_plane = Plane3D::from_point_and_normal(self.screen_center, self.view);
        let clipped = polygon.clip(&near_plane);

        let vertices = clipped
            .vertices()
            .iter()
            .map(|v| self.project_point(*v))
            .collect();
        ScreenPolygon::new(vertices, clipped.color())
    }

    /// Recomputes the derived screen basis from the primary state.
    ///
    /// The up vector is re-orthogonalized against the view vector by a
    /// double cross product, the screen center is the view vector's tip,
    /// and the screen-extent vectors get their lengths from the FOV
    /// tangent and the image aspect ratio.
    fn update(&mut self) {
        let u = self.view.cross(&self.up);
        let w = u.cross(&self.view);
        self.up = w.normalize();

        self.screen_center = self.position + self.view;
        self.h_screen = u.normalize() * self.view.norm() * self.h_fov.tan();
        self.v_screen =
            w.normalize() * self.h_screen.norm() * self.image_height as f64
                / self.image_width as f64;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Rodrigues' rotation of `vector` about `axis` by `angle` radians.
fn rotate_about(vector: Vector3<f64>, axis: Vector3<f64>, angle: f64) -> Vector3<f64> {
    let k = axis.normalize();
    let (sin, cos) = angle.sin_cos();
    vector * cos + k.cross(&vector) * sin + k * (k.dot(&vector) * (1.0 - cos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    const CENTER_X: f64 = 400.0;
    const CENTER_Y: f64 = 300.0;

    fn camera() -> Camera {
        Camera::new(800, 600)
    }

    #[test]
    fn on_axis_point_hits_image_center() {
        let cam = camera();
        for distance in [0.02, 1.0, 50.0, 4000.0] {
            let point = cam.position() + cam.direction() * distance;
            let projected = cam.project_point(point);
            assert!((projected.x - CENTER_X).abs() < 1e-9);
            assert!((projected.y - CENTER_Y).abs() < 1e-9);
        }
    }

    #[test]
    fn on_axis_point_stays_centered_after_rotation() {
        let mut cam = camera();
        cam.set_position(Point3::new(2.0, -1.0, 0.5));
        cam.yaw(0.7);
        cam.pitch(-0.3);
        cam.roll(1.1);

        let point = cam.position() + cam.direction() * 3.0;
        let projected = cam.project_point(point);
        assert!((projected.x - CENTER_X).abs() < 1e-6);
        assert!((projected.y - CENTER_Y).abs() < 1e-6);
    }

    #[test]
    fn widening_fov_pulls_points_toward_center() {
        let off_axis = Point3::new(5.0, 1.0, 0.4);
        let mut previous = f64::INFINITY;

        for fov in [40.0, 60.0, 75.0, 85.0] {
            let mut cam = camera();
            cam.set_fov_degrees(fov);
            let projected = cam.project_point(off_axis);
            let offset = (projected - Point2::new(CENTER_X, CENTER_Y)).norm();
            assert!(
                offset < previous,
                "fov {fov}: offset {offset} did not shrink from {previous}"
            );
            previous = offset;
        }
    }

    #[test]
    fn four_small_yaws_compose_to_one_large() {
        let mut stepped = camera();
        for _ in 0..4 {
            stepped.yaw(30f64.to_radians());
        }
        let mut direct = camera();
        direct.yaw(120f64.to_radians());

        assert!((stepped.direction() - direct.direction()).norm() < 1e-9);
    }

    #[test]
    fn rotations_keep_up_orthonormal() {
        let mut cam = camera();
        cam.pitch(0.4);
        cam.yaw(-1.2);
        cam.roll(0.9);

        let up = cam.up;
        assert!((up.norm() - 1.0).abs() < 1e-9);
        assert!(up.dot(&cam.view).abs() < 1e-9);
    }

    #[test]
    fn set_direction_preserves_near_clip() {
        let mut cam = camera();
        cam.set_direction(Vector3::new(0.0, 7.0, 0.0));
        assert!((cam.near_clip_distance() - Camera::DEFAULT_NEAR_CLIP).abs() < 1e-12);
        assert!((cam.direction() - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn set_near_clip_preserves_direction() {
        let mut cam = camera();
        cam.set_near_clip_distance(0.5);
        assert!((cam.near_clip_distance() - 0.5).abs() < 1e-12);
        assert!((cam.direction() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn fov_round_trips_through_degrees() {
        let mut cam = camera();
        cam.set_fov_degrees(60.0);
        assert!((cam.fov_degrees() - 60.0).abs() < 1e-12);
    }

    #[test]
    fn translate_moves_along_local_axes() {
        // Default frame: forward +x, up +z, horizontal axis view x up = -y.
        let mut cam = camera();
        cam.translate(Vector3::new(0.0, 0.0, 2.0));
        assert!((cam.position() - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);

        cam.translate(Vector3::new(1.0, 0.0, 0.0));
        assert!((cam.position() - Point3::new(2.0, -1.0, 0.0)).norm() < 1e-12);

        cam.translate(Vector3::new(0.0, -0.5, 0.0));
        assert!((cam.position() - Point3::new(2.0, -1.0, -0.5)).norm() < 1e-12);
    }

    #[test]
    fn polygon_behind_camera_projects_to_nothing() {
        let cam = camera();
        let behind = Polygon::new(
            vec![
                Point3::new(-5.0, 0.0, 0.0),
                Point3::new(-5.0, 1.0, 0.0),
                Point3::new(-5.0, 0.0, 1.0),
            ],
            Color::rgb(9, 9, 9),
        );

        let projected = cam.project_polygon(&behind);
        assert!(projected.is_empty());
        assert_eq!(projected.color(), behind.color());
    }

    #[test]
    fn polygon_straddling_near_plane_is_clipped_then_projected() {
        let cam = camera();
        // Quad crossing the image plane at x = 0.01.
        let straddling = Polygon::new(
            vec![
                Point3::new(-1.0, -0.5, -0.5),
                Point3::new(1.0, -0.5, -0.5),
                Point3::new(1.0, -0.5, 0.5),
                Point3::new(-1.0, -0.5, 0.5),
            ],
            Color::WHITE,
        );

        let projected = cam.project_polygon(&straddling);
        assert!(!projected.is_empty());
        assert!(projected.vertices().iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    }

    #[test]
    fn projection_carries_color_through() {
        let cam = camera();
        let color = Color::rgb(12, 200, 77);
        let in_front = Polygon::new(
            vec![
                Point3::new(3.0, -0.5, -0.5),
                Point3::new(3.0, 0.5, -0.5),
                Point3::new(3.0, 0.0, 0.5),
            ],
            color,
        );

        let projected = cam.project_polygon(&in_front);
        assert_eq!(projected.len(), 3);
        assert_eq!(projected.color(), color);
    }
}
