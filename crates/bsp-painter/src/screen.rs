//! The engine's 2D output unit.

use nalgebra::Point2;

use crate::Color;

/// A polygon projected onto the image plane: screen-space vertices in
/// pixels (y grows downward) plus the color carried over from the source
/// polygon.
///
/// An empty `ScreenPolygon` means the source polygon was clipped away
/// entirely by the near plane; renderers must skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPolygon {
    vertices: Vec<Point2<f64>>,
    color: Color,
}

impl ScreenPolygon {
    pub fn new(vertices: Vec<Point2<f64>>, color: Color) -> Self {
        Self { vertices, color }
    }

    /// Screen-space vertices, preserving the source winding.
    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when nothing survived clipping; skip drawing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
