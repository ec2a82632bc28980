//! Draw-order debugging view: recolors each frame's polygons by their
//! position in the painter's sequence, blue (drawn first, farthest)
//! through red (drawn last, nearest).
//!
//! Drives the tree and camera directly instead of going through
//! `Scene`, since the recoloring needs the sorted sequence itself.

use bsp_painter::{BspTree, Camera};
use bsp_painter_viz::{FlightControls, cube_polygons, draw_order_color, draw_screen_polygon, tetrahedron_polygons};
use macroquad::prelude::*;
use nalgebra::Point3;

#[macroquad::main("bsp-painter draw order")]
async fn main() {
    let mut polygons = cube_polygons(Point3::new(4.0, 0.0, 0.0), 1.0);
    polygons.extend(cube_polygons(Point3::new(3.0, 1.8, -0.2), 0.6));
    polygons.extend(tetrahedron_polygons(Point3::new(3.2, -1.5, 0.3), 0.8));
    let tree = BspTree::from_polygons(polygons);

    let mut camera = Camera::new(800, 600);
    let controls = FlightControls::default();

    loop {
        clear_background(BLACK);

        let width = screen_width().max(1.0) as u32;
        let height = screen_height().max(1.0) as u32;
        camera.set_image_dimensions(width, height);
        controls.apply(&mut camera);

        let sorted = tree.depth_sorted_polygons(camera.position());
        let total = sorted.len();
        for (index, polygon) in sorted.into_iter().enumerate() {
            let mut recolored = polygon.clone();
            recolored.set_color(draw_order_color(index, total));
            draw_screen_polygon(&camera.project_polygon(&recolored));
        }

        draw_text(
            &format!("{total} polygons, blue drawn first"),
            10.0,
            20.0,
            18.0,
            WHITE,
        );

        next_frame().await
    }
}
