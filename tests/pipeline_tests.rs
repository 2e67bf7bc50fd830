//! End-to-end checks of the 3D path: mesh -> transform -> culling -> raster

use approx::assert_relative_eq;
use rasterlab::rasterizer::{
    back_face_cam, draw_scene, Color, Framebuffer, Mesh, Pipeline, ProjectedMesh, RasterSettings,
    Texture, Vec2, Vec3, Vertex, ViewParams,
};
use rasterlab::scene::Scene;

fn front_view(distance: f32) -> ViewParams {
    ViewParams {
        rot_x: 0.0,
        rot_y: 0.0,
        distance,
        ..ViewParams::default()
    }
}

#[test]
fn cylinder_side_culling_splits_near_and_far_halves() {
    let slices = 16;
    let mesh = Mesh::cylinder(slices);
    let pipeline = Pipeline::new(&front_view(6.0), 320, 320);
    let projected = ProjectedMesh::new(&mesh, &pipeline);

    // Side triangles come first: two per slice
    let mut checked_far = 0;
    let mut checked_near = 0;
    for tri in &mesh.triangles[..2 * slices] {
        let [a, b, c] = tri.indices();
        let centroid_z =
            (mesh.vertices[a].pos.z + mesh.vertices[b].pos.z + mesh.vertices[c].pos.z) / 3.0;
        let culled = back_face_cam(&projected.camera[a], &projected.camera[b], &projected.camera[c]);

        if centroid_z < -0.05 {
            assert!(culled, "far-side triangle {:?} was kept", tri.indices());
            checked_far += 1;
        } else if centroid_z > 0.5 {
            assert!(!culled, "near-side triangle {:?} was culled", tri.indices());
            checked_near += 1;
        }
    }
    assert!(checked_far >= slices / 2);
    assert!(checked_near > 0);
}

#[test]
fn tilted_view_shows_top_cap_only() {
    // Looking slightly down onto the cylinder shows the top cap and hides the bottom
    let slices = 12;
    let mesh = Mesh::cylinder(slices);
    let params = ViewParams {
        rot_x: 30.0,
        rot_y: 0.0,
        ..ViewParams::default()
    };
    let pipeline = Pipeline::new(&params, 200, 200);
    let projected = ProjectedMesh::new(&mesh, &pipeline);

    let caps = &mesh.triangles[2 * slices..];
    let (top, bottom) = caps.split_at(slices);
    let culled = |tri: &rasterlab::rasterizer::Triangle| {
        let [a, b, c] = tri.indices();
        back_face_cam(&projected.camera[a], &projected.camera[b], &projected.camera[c])
    };
    assert!(top.iter().all(|t| !culled(t)));
    assert!(bottom.iter().all(culled));
}

#[test]
fn origin_projects_to_center_of_square_canvas() {
    let pipeline = Pipeline::new(&front_view(5.0), 300, 300);
    let f = pipeline.project_vertex(&Vertex::new(Vec3::ZERO, Vec2::new(0.0, 0.0)));
    assert_relative_eq!(f.x, 149.5, epsilon = 1e-3);
    assert_relative_eq!(f.y, 149.5, epsilon = 1e-3);
}

#[test]
fn small_cylinder_counts_and_topology() {
    let mesh = Mesh::cylinder(4);
    assert_eq!(mesh.vertex_count(), 20);
    assert_eq!(mesh.triangle_count(), 16);
    assert!(mesh.validate().is_ok());
}

#[test]
fn culling_off_draws_every_triangle() {
    let mesh = Mesh::cylinder(20);
    let texture = Texture::solid(4, 4, Color::RED);
    let params = ViewParams::default();

    let mut fb = Framebuffer::new(160, 120);
    let culled = draw_scene(&mut fb, &mesh, &texture, &params, &RasterSettings::default());

    let mut fb = Framebuffer::new(160, 120);
    let all = draw_scene(
        &mut fb,
        &mesh,
        &texture,
        &params,
        &RasterSettings {
            backface_cull: false,
            ..RasterSettings::default()
        },
    );

    assert_eq!(all.drawn, mesh.triangle_count());
    assert_eq!(all.culled, 0);
    assert!(culled.culled > 0);
    assert_eq!(culled.drawn + culled.culled, mesh.triangle_count());
}

#[test]
fn wireframe_frame_has_no_texture_color() {
    let mut scene = Scene::default();
    scene.set_texture(Texture::solid(1, 1, Color::RED));

    let mut filled = Framebuffer::new(160, 120);
    scene.render(&mut filled);
    assert!(filled.pixels.contains(&Color::RED));

    scene.set_wireframe(true);
    let mut wire = Framebuffer::new(160, 120);
    let stats = scene.render(&mut wire);
    assert!(stats.drawn > 0);
    assert!(!wire.pixels.contains(&Color::RED));
    // Wu edges blend toward the black wire color
    assert!(wire.pixels.iter().any(|p| p.r < 64));
}

#[test]
fn camera_inside_mesh_is_near_clipped() {
    // Distance is not clamped at this level; a camera inside the cube must not blow up
    let mesh = Mesh::cube();
    let params = ViewParams {
        distance: 0.5,
        ..ViewParams::default()
    };
    let mut fb = Framebuffer::new(64, 64);
    let stats = draw_scene(
        &mut fb,
        &mesh,
        &Texture::solid(1, 1, Color::BLUE),
        &params,
        &RasterSettings::default(),
    );
    assert!(stats.clipped > 0);
    assert_eq!(stats.drawn + stats.culled + stats.clipped, mesh.triangle_count());
}
