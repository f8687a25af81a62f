//! Flat per-triangle lighting: ambient + diffuse + specular.
//!
//! All inputs are in world space. A triangle's shading point is its first
//! vertex and its normal is the normalized cross product of its edges, so
//! winding decides which side is lit.

use crate::color::{Color, LightColor};
use crate::math::vec3::Vec3;
use crate::world::World;

/// Unit normal of a counter-clockwise triangle. Degenerate triangles give
/// [`Vec3::ZERO`].
pub fn triangle_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize()
}

/// True when the front side of the surface at `position` faces the camera.
pub fn faces_camera(normal: Vec3, position: Vec3, camera_position: Vec3) -> bool {
    normal.dot(camera_position - position) > 0.0
}

/// Shading input for one world-space triangle.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Color,
}

impl Surface {
    pub fn from_triangle(vertices: [Vec3; 3], color: Color) -> Self {
        Self {
            position: vertices[0],
            normal: triangle_normal(vertices[0], vertices[1], vertices[2]),
            color,
        }
    }
}

/// Sum of all enabled light contributions at `surface`, before it is
/// multiplied into the surface color.
pub fn light_at(world: &World, surface: &Surface, camera_position: Vec3) -> LightColor {
    let n = surface.normal;
    let mut total = LightColor::NONE;

    if world.ambient_light_enabled {
        total = total + world.ambient_light.radiance();
    }

    if world.diffuse_lights_enabled {
        for light in &world.diffuse_lights {
            let l = light.source.direction_to_light(surface.position);
            let lambert = l.dot(n).clamp(0.0, 1.0);
            total = total + light.radiance() * lambert;
        }
    }

    if world.specular_lights_enabled {
        let v = (camera_position - surface.position).normalize();
        for light in &world.specular_lights {
            let l = light.source.direction_to_light(surface.position);
            let l_dot_n = l.dot(n);
            if l_dot_n <= 0.0 {
                continue;
            }
            let r = n * (2.0 * l_dot_n) - l;
            let highlight = v.dot(r).clamp(0.0, 1.0).powf(light.shininess);
            total = total + light.radiance() * highlight;
        }
    }

    total
}

/// Final flat color of a triangle, clamped into range.
pub fn shade_triangle(world: &World, surface: &Surface, camera_position: Vec3) -> Color {
    light_at(world, surface, camera_position).modulate(surface.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euler_angle::EulerAngle;
    use crate::light::{AmbientLight, Light};
    use approx::assert_relative_eq;

    fn floor_surface() -> Surface {
        Surface::from_triangle(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, -1.0),
            ],
            Color::WHITE,
        )
    }

    fn dark_world() -> World {
        let mut world = World::default();
        world.ambient_light_enabled = false;
        world
    }

    #[test]
    fn normal_follows_winding() {
        let s = floor_surface();
        assert_eq!(s.normal, Vec3::UP);
        assert!(faces_camera(s.normal, s.position, Vec3::new(0.0, 5.0, 0.0)));
        assert!(!faces_camera(s.normal, s.position, Vec3::new(0.0, -5.0, 0.0)));
        // Edge-on counts as facing away.
        assert!(!faces_camera(s.normal, s.position, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let n = triangle_normal(Vec3::ONE, Vec3::ONE * 2.0, Vec3::ONE * 3.0);
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn ambient_only() {
        let mut world = World::default();
        world.ambient_light = AmbientLight::new(Color::WHITE, 0.5);

        let c = shade_triangle(&world, &floor_surface(), Vec3::UP);
        assert_relative_eq!(c.r(), 0.5);
        assert_relative_eq!(c.a(), 1.0);
    }

    #[test]
    fn diffuse_follows_lambert() {
        let mut world = dark_world();
        // Light from 60 degrees above the horizon, so cos(30) to the normal.
        world.diffuse_lights.push(Light::directional(
            EulerAngle::new(-60.0, 0.0, 0.0),
            Color::WHITE,
            1.0,
        ));

        let c = shade_triangle(&world, &floor_surface(), Vec3::UP);
        assert_relative_eq!(c.g(), 60.0_f64.to_radians().sin(), epsilon = 1e-12);
    }

    #[test]
    fn light_from_below_contributes_nothing() {
        let mut world = dark_world();
        world.diffuse_lights.push(Light::positional(
            Vec3::new(0.0, -10.0, 0.0),
            Color::WHITE,
            1.0,
        ));
        world
            .specular_lights
            .push(Light::positional(Vec3::new(0.0, -10.0, 0.0), Color::WHITE, 1.0));

        let c = shade_triangle(&world, &floor_surface(), Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(c.to_int(), (0, 0, 0, 255));
    }

    #[test]
    fn specular_peaks_on_mirror_direction() {
        let mut world = dark_world();
        world.specular_lights.push(
            Light::positional(Vec3::new(-5.0, 5.0, 0.0), Color::WHITE, 1.0).with_shininess(8.0),
        );

        // Camera on the mirrored side gets the full highlight.
        let c = shade_triangle(&world, &floor_surface(), Vec3::new(5.0, 5.0, 0.0));
        assert_relative_eq!(c.b(), 1.0, epsilon = 1e-12);

        // Looking from straight above falls off with the shininess power.
        let c = shade_triangle(&world, &floor_surface(), Vec3::new(0.0, 5.0, 0.0));
        let expected = 45.0_f64.to_radians().cos().powf(8.0);
        assert_relative_eq!(c.b(), expected, epsilon = 1e-12);
    }

    #[test]
    fn disabled_categories_are_skipped() {
        let mut world = World::default();
        world.diffuse_lights.push(Light::directional(
            EulerAngle::new(-90.0, 0.0, 0.0),
            Color::WHITE,
            1.0,
        ));
        world.ambient_light_enabled = false;
        world.diffuse_lights_enabled = false;

        let c = shade_triangle(&world, &floor_surface(), Vec3::UP);
        assert_eq!(c.to_int(), (0, 0, 0, 255));
    }

    #[test]
    fn result_is_clamped() {
        let mut world = World::default();
        world.ambient_light = AmbientLight::new(Color::WHITE, 3.0);
        let c = shade_triangle(&world, &floor_surface(), Vec3::UP);
        assert_eq!(c, Color::WHITE);
    }
}
