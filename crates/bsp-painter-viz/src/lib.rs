//! Shared drawing and scene-building utilities for the interactive
//! demos: rasterization of the engine's 2D output, deterministic
//! coloring, and simple shape generators standing in for a model
//! loader.

use std::hash::{Hash, Hasher};

use bsp_painter::{Color, Polygon, ScreenPolygon};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

pub mod controls;
pub use controls::FlightControls;

/// Converts the engine's color tag to a macroquad color.
pub fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::from_rgba(color.r, color.g, color.b, color.a)
}

/// Fills a projected polygon by fan triangulation from its first
/// vertex. Empty and degenerate shapes are skipped, as the engine's
/// contract requires.
pub fn draw_screen_polygon(shape: &ScreenPolygon) {
    let verts = shape.vertices();
    if verts.len() < 3 {
        return;
    }

    let color = to_macroquad_color(shape.color());
    for i in 1..verts.len() - 1 {
        draw_triangle(
            vec2(verts[0].x as f32, verts[0].y as f32),
            vec2(verts[i].x as f32, verts[i].y as f32),
            vec2(verts[i + 1].x as f32, verts[i + 1].y as f32),
            color,
        );
    }
}

/// Derives a deterministic color from a polygon's vertex data, so the
/// same face keeps its color across frames and across BSP splits of its
/// neighbors.
pub fn polygon_hash_color(polygon: &Polygon) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in polygon.vertices() {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
        v.z.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Keep a minimum brightness so no face disappears into the
    // background.
    Color::rgb(r.max(40), g.max(40), b.max(40))
}

/// Maps an emission index to a blue-to-red ramp, for visualizing the
/// painter's draw order: the farthest polygon of a frame comes out
/// blue, the nearest red.
pub fn draw_order_color(index: usize, total: usize) -> Color {
    let value = (index + 1) as f64 / total.max(1) as f64;
    let scale = |x: f64| (255.0 * x.clamp(0.0, 1.0)) as u8;

    if value < 0.25 {
        Color::rgb(0, scale(4.0 * value), 255)
    } else if value < 0.5 {
        Color::rgb(0, 255, scale(1.0 - 4.0 * (value - 0.25)))
    } else if value < 0.75 {
        Color::rgb(scale(4.0 * (value - 0.5)), 255, 0)
    } else {
        Color::rgb(255, scale(1.0 - 4.0 * (value - 0.75)), 0)
    }
}

/// The 6 face quads of an axis-aligned cube, wound outward.
pub fn cube_polygons(center: Point3<f64>, size: f64) -> Vec<Polygon> {
    let half = size / 2.0;

    let corners = [
        center + Vector3::new(-half, -half, -half),
        center + Vector3::new(half, -half, -half),
        center + Vector3::new(half, half, -half),
        center + Vector3::new(-half, half, -half),
        center + Vector3::new(-half, -half, half),
        center + Vector3::new(half, -half, half),
        center + Vector3::new(half, half, half),
        center + Vector3::new(-half, half, half),
    ];

    let faces: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // +z
        [1, 0, 3, 2], // -z
        [0, 4, 7, 3], // -x
        [5, 1, 2, 6], // +x
        [7, 6, 2, 3], // +y
        [0, 1, 5, 4], // -y
    ];

    faces
        .iter()
        .map(|indices| {
            Polygon::new(
                vec![
                    corners[indices[0]],
                    corners[indices[1]],
                    corners[indices[2]],
                    corners[indices[3]],
                ],
                Color::WHITE,
            )
        })
        .collect()
}

/// The 4 face triangles of a tetrahedron inscribed in a cube of the
/// given size.
pub fn tetrahedron_polygons(center: Point3<f64>, size: f64) -> Vec<Polygon> {
    let half = size / 2.0;

    let a = center + Vector3::new(half, half, half);
    let b = center + Vector3::new(half, -half, -half);
    let c = center + Vector3::new(-half, half, -half);
    let d = center + Vector3::new(-half, -half, half);

    [[a, b, c], [a, c, d], [a, d, b], [b, d, c]]
        .iter()
        .map(|face| Polygon::new(face.to_vec(), Color::WHITE))
        .collect()
}

/// Builds a scene object's polygons with per-face hash colors applied.
pub fn hash_colored(polygons: Vec<Polygon>) -> Vec<Polygon> {
    polygons
        .into_iter()
        .map(|mut polygon| {
            let color = polygon_hash_color(&polygon);
            polygon.set_color(color);
            polygon
        })
        .collect()
}
