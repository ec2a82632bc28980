//! Per-frame keyboard/mouse input mapped onto camera deltas.

use bsp_painter::Camera;
use macroquad::prelude::*;
use nalgebra::Vector3;

/// Free-flight camera controls.
///
/// WASD moves in the camera's horizontal plane, Space/LeftShift up and
/// down, Q/E rolls. Dragging with the left mouse button looks around,
/// and the scroll wheel zooms by changing the field of view. All
/// speeds are per frame, applied once before rendering.
pub struct FlightControls {
    /// World units of movement per frame per held key.
    pub movement_speed: f64,
    /// Radians of roll per frame per held key.
    pub roll_speed: f64,
    /// Radians of yaw/pitch per unit of mouse drag.
    pub look_sensitivity: f64,
    /// Degrees of FOV per scroll-wheel step.
    pub zoom_sensitivity: f64,
}

impl Default for FlightControls {
    fn default() -> Self {
        Self {
            movement_speed: 0.05,
            roll_speed: 0.02,
            look_sensitivity: 1.5,
            zoom_sensitivity: 2.0,
        }
    }
}

impl FlightControls {
    /// Polls input and applies the requested deltas to the camera.
    pub fn apply(&self, camera: &mut Camera) {
        let mut movement = Vector3::zeros();
        if is_key_down(KeyCode::W) {
            movement.z += self.movement_speed;
        }
        if is_key_down(KeyCode::S) {
            movement.z -= self.movement_speed;
        }
        if is_key_down(KeyCode::D) {
            movement.x += self.movement_speed;
        }
        if is_key_down(KeyCode::A) {
            movement.x -= self.movement_speed;
        }
        if is_key_down(KeyCode::Space) {
            movement.y += self.movement_speed;
        }
        if is_key_down(KeyCode::LeftShift) {
            movement.y -= self.movement_speed;
        }
        if movement != Vector3::zeros() {
            camera.translate(movement);
        }

        if is_key_down(KeyCode::Q) {
            camera.roll(self.roll_speed);
        }
        if is_key_down(KeyCode::E) {
            camera.roll(-self.roll_speed);
        }

        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            camera.yaw(delta.x as f64 * self.look_sensitivity);
            camera.pitch(-delta.y as f64 * self.look_sensitivity);
        }

        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            let fov = camera.fov_degrees() - scroll.signum() as f64 * self.zoom_sensitivity;
            camera.set_fov_degrees(fov);
        }
    }
}
