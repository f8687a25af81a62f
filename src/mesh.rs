//! Triangle meshes: vertices, one color per triangle, and a transform.
//!
//! Per-frame vertex lists (world and view space) are returned by value from
//! [`Mesh::world_vertices`] and [`Mesh::view_vertices`]; nothing transient is
//! stored on the mesh.

use std::path::Path;

use thiserror::Error;

use crate::color::Color;
use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};
use crate::transform::Transform;

/// Errors from building or loading a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("mesh has {triangles} triangles but {colors} colors")]
    ColorCountMismatch { triangles: usize, colors: usize },

    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// Set of cube faces, used to build cubes with hidden faces left out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CubeFaces(u8);

impl CubeFaces {
    pub const NONE: CubeFaces = CubeFaces(0);
    pub const TOP: CubeFaces = CubeFaces(1);
    pub const BOTTOM: CubeFaces = CubeFaces(2);
    pub const LEFT: CubeFaces = CubeFaces(4);
    pub const RIGHT: CubeFaces = CubeFaces(8);
    pub const FRONT: CubeFaces = CubeFaces(16);
    pub const BACK: CubeFaces = CubeFaces(32);
    pub const ALL: CubeFaces = CubeFaces(63);

    pub fn contains(self, other: CubeFaces) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CubeFaces) {
        self.0 |= other.0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for CubeFaces {
    type Output = CubeFaces;

    fn bitor(self, rhs: CubeFaces) -> Self::Output {
        CubeFaces(self.0 | rhs.0)
    }
}

// Unit cube corners: bottom ring (y=-1) then top ring (y=+1), front (+Z) first.
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
];

/// Two counter-clockwise triangles per face.
const CUBE_FACE_TRIANGLES: [(CubeFaces, [[usize; 3]; 2]); 6] = [
    (CubeFaces::FRONT, [[0, 1, 5], [0, 5, 4]]),
    (CubeFaces::RIGHT, [[1, 2, 6], [1, 6, 5]]),
    (CubeFaces::BACK, [[2, 3, 7], [2, 7, 6]]),
    (CubeFaces::LEFT, [[7, 3, 0], [7, 0, 4]]),
    (CubeFaces::TOP, [[4, 5, 6], [4, 6, 7]]),
    (CubeFaces::BOTTOM, [[3, 2, 1], [3, 1, 0]]),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec4>,
    colors: Vec<Color>,
    triangles: Vec<[usize; 3]>,
    bounding_radius: f64,
    pub transform: Transform,
}

impl Mesh {
    /// Builds a mesh from model-space vertices and per-triangle colors.
    ///
    /// Every index must address a vertex, and there must be exactly one
    /// color per triangle.
    pub fn new(
        vertices: Vec<Vec3>,
        triangles: Vec<[usize; 3]>,
        colors: Vec<Color>,
    ) -> Result<Self, MeshError> {
        if colors.len() != triangles.len() {
            return Err(MeshError::ColorCountMismatch {
                triangles: triangles.len(),
                colors: colors.len(),
            });
        }

        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self::from_trusted_parts(&vertices, triangles, colors))
    }

    /// A 2x2x2 cube centred on the origin with every face in `color`.
    pub fn cube(color: Color) -> Self {
        Self::partial_cube(color, CubeFaces::ALL)
    }

    /// A cube containing only the requested faces.
    pub fn partial_cube(color: Color, faces: CubeFaces) -> Self {
        let triangles: Vec<[usize; 3]> = CUBE_FACE_TRIANGLES
            .iter()
            .filter(|(face, _)| faces.contains(*face))
            .flat_map(|(_, pair)| pair.iter().copied())
            .collect();

        Self::from_cube_triangles(triangles.len(), triangles, |_| color)
    }

    /// A cube with a different color on each face pair: red front, green
    /// right, blue back, yellow left, cyan top, white bottom.
    pub fn multicolor_cube() -> Self {
        const FACE_COLORS: [(u8, u8, u8); 6] = [
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 0),
            (0, 255, 255),
            (255, 255, 255),
        ];

        let triangles: Vec<[usize; 3]> = CUBE_FACE_TRIANGLES
            .iter()
            .flat_map(|(_, pair)| pair.iter().copied())
            .collect();

        Self::from_cube_triangles(triangles.len(), triangles, |i| {
            let (r, g, b) = FACE_COLORS[i / 2];
            Color::from_int(r, g, b, 255)
        })
    }

    /// An upward-facing quad at y = 0 spanning `[0, width]` along X and
    /// `[-depth, 0]` along Z.
    pub fn floor(width: f64, depth: f64, color: Color) -> Self {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(width, 0.0, -depth),
            Vec3::new(0.0, 0.0, -depth),
        ];
        Self::from_trusted_parts(&vertices, vec![[0, 1, 2], [0, 2, 3]], vec![color; 2])
    }

    fn from_cube_triangles(
        count: usize,
        triangles: Vec<[usize; 3]>,
        color_of: impl Fn(usize) -> Color,
    ) -> Self {
        let colors = (0..count).map(color_of).collect();
        Self::from_trusted_parts(&CUBE_VERTICES, triangles, colors)
    }

    /// Skips validation; callers pass constant, consistent geometry.
    fn from_trusted_parts(
        vertices: &[Vec3],
        triangles: Vec<[usize; 3]>,
        colors: Vec<Color>,
    ) -> Self {
        Self {
            vertices: vertices.iter().copied().map(Vec4::from).collect(),
            colors,
            triangles,
            bounding_radius: bounding_radius(vertices),
            transform: Transform::default(),
        }
    }

    /// Loads every model in an OBJ file into one mesh, painting all
    /// triangles with `color`. Faces are triangulated on load.
    pub fn from_obj(path: impl AsRef<Path>, color: Color) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut vertices = Vec::new();
        let mut triangles = Vec::new();
        for model in &models {
            let base = vertices.len();
            vertices.extend(model.mesh.positions.chunks_exact(3).map(|p| {
                Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
            }));
            triangles.extend(model.mesh.indices.chunks_exact(3).map(|t| {
                [
                    base + t[0] as usize,
                    base + t[1] as usize,
                    base + t[2] as usize,
                ]
            }));
        }

        log::debug!(
            "loaded {} ({} models, {} vertices, {} triangles)",
            path.display(),
            models.len(),
            vertices.len(),
            triangles.len()
        );

        let colors = vec![color; triangles.len()];
        Self::new(vertices, triangles, colors)
    }

    // ============ Accessors ============

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Distance from the model-space origin to the farthest vertex.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    /// Bounding radius after the transform's scale is applied.
    pub fn world_bounding_radius(&self) -> f64 {
        self.bounding_radius * self.transform.max_scale()
    }

    // ============ Per-frame transforms ============

    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    pub fn world_vertices(&self) -> Vec<Vec4> {
        let world = self.world_matrix();
        self.vertices.iter().map(|&v| world * v).collect()
    }

    /// Transforms already-computed world vertices into view space.
    pub fn view_vertices(world_vertices: &[Vec4], view: &Mat4) -> Vec<Vec4> {
        world_vertices.iter().map(|&v| *view * v).collect()
    }
}

fn bounding_radius(vertices: &[Vec3]) -> f64 {
    vertices.iter().map(|v| v.magnitude()).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn face_normal(mesh: &Mesh, triangle: [usize; 3]) -> Vec3 {
        let v = |i: usize| mesh.vertices()[i].to_vec3();
        (v(triangle[1]) - v(triangle[0]))
            .cross(v(triangle[2]) - v(triangle[0]))
            .normalize()
    }

    #[test]
    fn cube_faces_wind_outward() {
        let cube = Mesh::cube(Color::WHITE);
        assert_eq!(cube.triangles().len(), 12);

        for &triangle in cube.triangles() {
            let normal = face_normal(&cube, triangle);
            let centroid = triangle
                .iter()
                .map(|&i| cube.vertices()[i].to_vec3())
                .fold(Vec3::ZERO, |acc, v| acc + v)
                / 3.0;
            assert!(normal.dot(centroid) > 0.0, "{triangle:?} winds inward");
        }
    }

    #[test]
    fn partial_cube_keeps_requested_faces() {
        let mesh = Mesh::partial_cube(Color::RED, CubeFaces::TOP | CubeFaces::LEFT);
        assert_eq!(mesh.triangles().len(), 4);
        assert_eq!(mesh.colors().len(), 4);

        let top = face_normal(&mesh, mesh.triangles()[2]);
        assert_relative_eq!(top.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn multicolor_cube_colors_face_pairs() {
        let mesh = Mesh::multicolor_cube();
        assert_eq!(mesh.colors()[0], mesh.colors()[1]);
        assert_eq!(mesh.colors()[0].to_int(), (255, 0, 0, 255));
        assert_eq!(mesh.colors()[11].to_int(), (255, 255, 255, 255));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let result = Mesh::new(
            vec![Vec3::ZERO, Vec3::ONE, Vec3::UP],
            vec![[0, 1, 3]],
            vec![Color::WHITE],
        );
        assert!(matches!(
            result,
            Err(MeshError::IndexOutOfRange { triangle: 0, index: 3, vertex_count: 3 })
        ));
    }

    #[test]
    fn rejects_color_count_mismatch() {
        let result = Mesh::new(
            vec![Vec3::ZERO, Vec3::ONE, Vec3::UP],
            vec![[0, 1, 2]],
            vec![],
        );
        assert!(matches!(
            result,
            Err(MeshError::ColorCountMismatch { triangles: 1, colors: 0 })
        ));
    }

    #[test]
    fn floor_faces_up() {
        let floor = Mesh::floor(4.0, 3.0, Color::GRAY);
        for &triangle in floor.triangles() {
            assert_relative_eq!(face_normal(&floor, triangle).y, 1.0);
        }
        assert_relative_eq!(floor.bounding_radius(), 5.0);
    }

    #[test]
    fn obj_models_share_one_index_space() {
        let path = std::env::temp_dir().join(format!("mazing-two-models-{}.obj", std::process::id()));
        std::fs::write(
            &path,
            "o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
             o quad\nv 0 0 1\nv 1 0 1\nv 1 1 1\nv 0 1 1\nf 4 5 6 7\n",
        )
        .unwrap();

        let mesh = Mesh::from_obj(&path, Color::GREEN);
        std::fs::remove_file(&path).unwrap();
        let mesh = mesh.unwrap();

        assert_eq!(mesh.vertices().len(), 7);
        assert_eq!(mesh.triangles().len(), 3);
        assert_eq!(mesh.triangles()[0], [0, 1, 2]);
        assert!(mesh.colors().iter().all(|&c| c == Color::GREEN));

        // The quad's indices are offset past the first model's vertices.
        for triangle in &mesh.triangles()[1..] {
            for &i in triangle {
                assert!((3..7).contains(&i), "{triangle:?}");
                assert_relative_eq!(mesh.vertices()[i].z, 1.0);
            }
        }
    }

    #[test]
    fn missing_obj_file_is_an_obj_error() {
        let path = std::env::temp_dir().join("mazing-does-not-exist.obj");
        assert!(matches!(
            Mesh::from_obj(&path, Color::WHITE),
            Err(MeshError::Obj(_))
        ));
    }

    #[test]
    fn bounding_radius_scales_with_transform() {
        let mut cube = Mesh::cube(Color::WHITE);
        assert_relative_eq!(cube.bounding_radius(), 3.0_f64.sqrt());

        cube.transform.set_scale_uniform(0.5);
        assert_relative_eq!(cube.world_bounding_radius(), 3.0_f64.sqrt() / 2.0);
    }

    #[test]
    fn world_vertices_follow_transform() {
        let mut cube = Mesh::cube(Color::WHITE);
        cube.transform
            .set_scale_uniform(0.5)
            .set_position_xyz(0.5, 0.5, -0.5);

        let world = cube.world_vertices();
        assert_eq!(world[0], Vec4::point(0.0, 0.0, 0.0));
        assert_eq!(world[6], Vec4::point(1.0, 1.0, -1.0));
    }
}
