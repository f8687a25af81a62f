//! Frame orchestration: world and camera in, pixels out.
//!
//! Every render call runs the same stages:
//!
//! 1. Frustum cull whole meshes by bounding sphere
//! 2. Transform to world space, backface test and shade
//! 3. Transform to view space and clip against near/far
//! 4. Project to pixels and clip against the viewport edges
//! 5. Sort farthest first and rasterize
//!
//! Sort depth is the smallest view-space z of a primitive, so ascending
//! order draws from the back.

use super::framebuffer::FrameBuffer;
use super::grid::CoordinateGrid;
use super::rasterizer::{draw_line, DepthMode, PixelVertex, Rasterizer, RasterizerDispatcher};
use crate::camera::Camera;
use crate::clipper::{screen_space, view_space};
use crate::clipper::{DepthRange, ScreenLine, ScreenTriangle, ViewLine, ViewTriangle, Viewport};
use crate::lighting::{faces_camera, shade_triangle, Surface};
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::world::World;

/// Switches for the render stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub depth_mode: DepthMode,
    pub backface_culling: bool,
    pub frustum_culling: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth_mode: DepthMode::default(),
            backface_culling: true,
            frustum_culling: true,
        }
    }
}

/// Counters from the most recent render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub meshes_culled: usize,
    pub triangles_backfaced: usize,
    /// Primitives handed to the near/far clipper.
    pub primitives_submitted: usize,
    /// Primitives that survived clipping and were rasterized.
    pub primitives_drawn: usize,
}

pub struct Renderer {
    options: RenderOptions,
    rasterizer: RasterizerDispatcher,
    stats: RenderStats,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            rasterizer: RasterizerDispatcher::new(options.depth_mode),
            options,
            stats: RenderStats::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_depth_mode(&mut self, depth_mode: DepthMode) {
        self.options.depth_mode = depth_mode;
        self.rasterizer.set_mode(depth_mode);
    }

    pub fn depth_mode(&self) -> DepthMode {
        self.rasterizer.mode()
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.options.backface_culling = enabled;
    }

    pub fn set_frustum_culling(&mut self, enabled: bool) {
        self.options.frustum_culling = enabled;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Draws every front-facing triangle as a flat, lit polygon.
    ///
    /// In [`DepthMode::ZBuffer`] the depth buffer is cleared first and each
    /// pixel is depth tested; triangles are sorted in both modes.
    pub fn render_solid(&mut self, world: &World, camera: &Camera, buffer: &mut FrameBuffer) {
        let mut stats = RenderStats::default();
        let camera_position = camera.position();
        let mut view_triangles = Vec::with_capacity(world.triangle_count());

        for mesh in &world.meshes {
            if !self.is_visible(mesh, camera) {
                stats.meshes_culled += 1;
                continue;
            }

            let world_vertices = mesh.world_vertices();
            let view_vertices = Mesh::view_vertices(&world_vertices, camera.view_matrix());

            for (indices, &color) in mesh.triangles().iter().zip(mesh.colors()) {
                let surface = Surface::from_triangle(indices.map(|i| world_vertices[i].to_vec3()), color);

                if self.options.backface_culling
                    && !faces_camera(surface.normal, surface.position, camera_position)
                {
                    stats.triangles_backfaced += 1;
                    continue;
                }

                view_triangles.push(ViewTriangle {
                    vertices: indices.map(|i| view_vertices[i]),
                    color: shade_triangle(world, &surface, camera_position),
                });
            }
        }
        stats.primitives_submitted = view_triangles.len();

        let range = DepthRange::new(camera.near_z(), camera.far_z());
        let viewport = buffer.viewport();
        let projection = camera.projection_matrix();

        let mut screen_triangles: Vec<ScreenTriangle> = view_space::clip_triangles(&view_triangles, &range)
            .iter()
            .filter_map(|t| project_triangle(t, projection, &viewport))
            .flat_map(|t| screen_space::clip_triangle(&t, &viewport))
            .collect();
        screen_triangles.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        if self.rasterizer.mode() == DepthMode::ZBuffer {
            buffer.clear_depth();
        }
        for triangle in &screen_triangles {
            self.rasterizer.fill_triangle(triangle, buffer);
        }

        stats.primitives_drawn = screen_triangles.len();
        self.finish("solid", stats);
    }

    /// Draws the three edges of every front-facing triangle in its lit
    /// color.
    pub fn render_wireframe(&mut self, world: &World, camera: &Camera, buffer: &mut FrameBuffer) {
        let mut stats = RenderStats::default();
        let camera_position = camera.position();
        let mut view_lines = Vec::with_capacity(world.triangle_count() * 3);

        for mesh in &world.meshes {
            if !self.is_visible(mesh, camera) {
                stats.meshes_culled += 1;
                continue;
            }

            let world_vertices = mesh.world_vertices();
            let view_vertices = Mesh::view_vertices(&world_vertices, camera.view_matrix());

            for (&indices, &color) in mesh.triangles().iter().zip(mesh.colors()) {
                let surface = Surface::from_triangle(indices.map(|i| world_vertices[i].to_vec3()), color);

                if self.options.backface_culling
                    && !faces_camera(surface.normal, surface.position, camera_position)
                {
                    stats.triangles_backfaced += 1;
                    continue;
                }

                let color = shade_triangle(world, &surface, camera_position);
                let [a, b, c] = indices;
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    view_lines.push(ViewLine {
                        vertices: [view_vertices[from], view_vertices[to]],
                        color,
                    });
                }
            }
        }

        let range = DepthRange::new(camera.near_z(), camera.far_z());
        stats.primitives_submitted = view_lines.len();
        stats.primitives_drawn = draw_view_lines(&view_lines, &range, camera.projection_matrix(), buffer);
        self.finish("wireframe", stats);
    }

    /// Draws the grid overlay. Grid lines are never cut by the far plane.
    pub fn render_grid(&mut self, grid: &CoordinateGrid, camera: &Camera, buffer: &mut FrameBuffer) {
        let view = camera.view_matrix();
        let view_lines: Vec<ViewLine> = grid
            .lines()
            .iter()
            .map(|line| ViewLine {
                vertices: [*view * Vec4::from(line.start), *view * Vec4::from(line.end)],
                color: line.color,
            })
            .collect();

        let range = DepthRange::new(camera.near_z(), camera.far_z()).near_only();
        let stats = RenderStats {
            primitives_submitted: view_lines.len(),
            primitives_drawn: draw_view_lines(&view_lines, &range, camera.projection_matrix(), buffer),
            ..RenderStats::default()
        };
        self.finish("grid", stats);
    }

    fn is_visible(&self, mesh: &Mesh, camera: &Camera) -> bool {
        !self.options.frustum_culling
            || camera
                .frustum()
                .sphere_is_inside(mesh.transform.position(), mesh.world_bounding_radius())
    }

    fn finish(&mut self, pass: &str, stats: RenderStats) {
        log::trace!("{pass} pass: {stats:?}");
        self.stats = stats;
    }
}

fn min_z(vertices: &[Vec4]) -> f64 {
    vertices.iter().map(|v| v.z).fold(f64::INFINITY, f64::min)
}

fn project_triangle(triangle: &ViewTriangle, projection: &Mat4, viewport: &Viewport) -> Option<ScreenTriangle> {
    let [a, b, c] = triangle.vertices;
    Some(ScreenTriangle {
        vertices: [
            viewport.project(*projection * a)?,
            viewport.project(*projection * b)?,
            viewport.project(*projection * c)?,
        ],
        color: triangle.color,
        depth: min_z(&triangle.vertices),
    })
}

fn project_line(line: &ViewLine, projection: &Mat4, viewport: &Viewport) -> Option<ScreenLine> {
    let [a, b] = line.vertices;
    Some(ScreenLine {
        vertices: [viewport.project(*projection * a)?, viewport.project(*projection * b)?],
        color: line.color,
        depth: min_z(&line.vertices),
    })
}

/// Clips, projects, sorts and draws lines. Returns how many were drawn.
fn draw_view_lines(lines: &[ViewLine], range: &DepthRange, projection: &Mat4, buffer: &mut FrameBuffer) -> usize {
    let viewport = buffer.viewport();

    let mut screen_lines: Vec<ScreenLine> = view_space::clip_lines(lines, range)
        .iter()
        .filter_map(|l| project_line(l, projection, &viewport))
        .filter_map(|l| screen_space::clip_line(&l, &viewport))
        .collect();
    screen_lines.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for line in &screen_lines {
        let [start, end] = line.vertices.map(PixelVertex::from);
        draw_line(buffer, start.x, start.y, end.x, end.y, line.color.packed());
    }

    screen_lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::euler_angle::EulerAngle;
    use crate::math::vec3::Vec3;

    const WIDTH: usize = 64;
    const HEIGHT: usize = 48;

    fn camera_at(position: Vec3) -> Camera {
        let mut camera = Camera::new(90.0, WIDTH as f64 / HEIGHT as f64, 0.1, 100.0).unwrap();
        camera.set_position(position);
        camera
    }

    fn lit_pixels(buffer: &FrameBuffer) -> usize {
        let black = Color::BLACK.packed();
        buffer.pixels().iter().filter(|&&p| p != black).count()
    }

    fn centre(buffer: &FrameBuffer) -> Color {
        let p = buffer.get_pixel(WIDTH as i32 / 2, HEIGHT as i32 / 2).unwrap();
        Color::from_packed(p)
    }

    #[test]
    fn cube_in_front_of_camera_is_drawn() {
        let world = World::new(vec![Mesh::cube(Color::WHITE)]);
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        let mut renderer = Renderer::default();

        renderer.render_solid(&world, &camera_at(Vec3::new(0.0, 0.0, 5.0)), &mut buffer);

        let stats = renderer.stats();
        assert_eq!(stats.meshes_culled, 0);
        // Only the face toward +Z is visible from straight ahead.
        assert_eq!(stats.triangles_backfaced, 10);
        assert_eq!(stats.primitives_drawn, 2);
        assert!(centre(&buffer).r() > 0.0);
    }

    #[test]
    fn mesh_behind_camera_is_culled() {
        let mut cube = Mesh::cube(Color::WHITE);
        cube.transform.set_position_xyz(0.0, 0.0, 50.0);
        let world = World::new(vec![cube]);
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        let mut renderer = Renderer::default();

        renderer.render_solid(&world, &camera_at(Vec3::new(0.0, 0.0, 5.0)), &mut buffer);

        assert_eq!(renderer.stats().meshes_culled, 1);
        assert_eq!(lit_pixels(&buffer), 0);
    }

    #[test]
    fn nearer_cube_covers_farther_one() {
        let near = Mesh::cube(Color::RED);
        let mut far = Mesh::cube(Color::GREEN);
        far.transform.set_position_xyz(0.0, 0.0, -10.0).set_scale_uniform(4.0);

        for mode in [DepthMode::PainterSort, DepthMode::ZBuffer] {
            let world = World::new(vec![near.clone(), far.clone()]);
            let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
            let mut renderer = Renderer::default();
            renderer.set_depth_mode(mode);

            renderer.render_solid(&world, &camera_at(Vec3::new(0.0, 0.0, 5.0)), &mut buffer);

            let c = centre(&buffer);
            assert!(c.r() > 0.0, "{mode}");
            assert_eq!(c.g(), 0.0, "{mode}");
            // The far cube still shows around the near one.
            assert!(buffer.pixels().iter().any(|&p| Color::from_packed(p).g() > 0.0), "{mode}");
        }
    }

    #[test]
    fn camera_inside_mesh_sees_nothing_with_culling() {
        let world = World::new(vec![Mesh::cube(Color::WHITE)]);
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        let mut renderer = Renderer::default();

        renderer.render_solid(&world, &camera_at(Vec3::ZERO), &mut buffer);
        assert_eq!(lit_pixels(&buffer), 0);

        renderer.set_backface_culling(false);
        renderer.render_solid(&world, &camera_at(Vec3::ZERO), &mut buffer);
        assert!(lit_pixels(&buffer) > 0);
    }

    #[test]
    fn wireframe_draws_front_faces_in_lit_color() {
        let world = World::new(vec![Mesh::cube(Color::WHITE)]);
        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut renderer = Renderer::default();

        let mut solid = FrameBuffer::new(WIDTH, HEIGHT);
        renderer.render_solid(&world, &camera, &mut solid);
        let lit = centre(&solid).packed();
        assert_ne!(lit, Color::WHITE.packed());

        let mut wire = FrameBuffer::new(WIDTH, HEIGHT);
        renderer.render_wireframe(&world, &camera, &mut wire);

        // Two front triangles, three edges each.
        let stats = renderer.stats();
        assert_eq!(stats.triangles_backfaced, 10);
        assert_eq!(stats.primitives_submitted, 6);
        assert!(wire.pixels().contains(&lit));
        assert!(!wire.pixels().contains(&Color::WHITE.packed()));

        renderer.set_backface_culling(false);
        renderer.render_wireframe(&world, &camera, &mut wire);
        assert_eq!(renderer.stats().primitives_submitted, 36);
    }

    #[test]
    fn grid_is_visible_from_above() {
        let mut camera = camera_at(Vec3::new(0.0, 5.0, 5.0));
        camera.set_orientation(EulerAngle::new(-45.0, 0.0, 0.0));
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        let mut renderer = Renderer::default();

        renderer.render_grid(&CoordinateGrid::new(), &camera, &mut buffer);

        assert!(renderer.stats().primitives_drawn > 0);
        assert!(buffer.pixels().contains(&Color::GRAY.packed()));
    }
}
