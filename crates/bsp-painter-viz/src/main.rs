//! Interactive walkthrough of a small polygon scene.

use bsp_painter::{Camera, Scene, SceneObject};
use bsp_painter_viz::{
    FlightControls, cube_polygons, draw_screen_polygon, hash_colored, tetrahedron_polygons,
};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

fn build_scene() -> Scene {
    let mut scene = Scene::new(Camera::new(800, 600));

    // The camera starts at the origin looking along +x; place the
    // furniture ahead of it.
    scene.add_object(SceneObject::from_polygons(hash_colored(cube_polygons(
        Point3::new(4.0, 0.0, 0.0),
        1.0,
    ))));

    let mut small_cube = SceneObject::from_polygons(hash_colored(cube_polygons(
        Point3::origin(),
        0.6,
    )));
    small_cube.set_origin(Vector3::new(3.0, 1.8, -0.2));
    scene.add_object(small_cube);

    scene.add_object(SceneObject::from_polygons(hash_colored(
        tetrahedron_polygons(Point3::new(3.2, -1.5, 0.3), 0.8),
    )));

    scene
}

#[macroquad::main("bsp-painter")]
async fn main() {
    let mut scene = build_scene();
    let controls = FlightControls::default();

    loop {
        clear_background(BLACK);

        let width = screen_width().max(1.0) as u32;
        let height = screen_height().max(1.0) as u32;
        scene.camera_mut().set_image_dimensions(width, height);
        controls.apply(scene.camera_mut());

        for shape in scene.render() {
            draw_screen_polygon(&shape);
        }

        let position = scene.camera().position();
        draw_text(
            &format!(
                "pos ({:.2}, {:.2}, {:.2})  fov {:.0}",
                position.x,
                position.y,
                position.z,
                scene.camera().fov_degrees()
            ),
            10.0,
            20.0,
            18.0,
            WHITE,
        );
        draw_text(
            "WASD move | Space/Shift up/down | Q/E roll | drag to look | scroll to zoom",
            10.0,
            40.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
