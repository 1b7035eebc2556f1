//! Mesh generation from points
//!
//! Two meshers are provided:
//!
//! - [`build_tube_mesh`] sweeps a polygonal tube along a polyline, for drawing
//!   strokes as solid geometry
//! - [`build_point_cloud_mesh`] places a small cube at every sample of a point
//!   cloud
//!
//! Both return `None` when there is nothing to draw, and otherwise produce a
//! [`Mesh`] tagged with a caller-provided material.  The material is never
//! interpreted; it's passed through so that the renderer knows how to shade
//! the result.
//!
//! Meshing is a pure function of its inputs: building twice from the same
//! points produces identical meshes, so renderers may diff successive meshes
//! and update GPU buffers in place.
use nalgebra::{Vector2, Vector3};

mod builder;
mod cloud;
mod output;
mod tube;

use builder::MeshBuilder;

pub use cloud::{CloudSettings, ThreadCount, build_point_cloud_mesh};
pub use tube::{NUMBER_OF_SIDES, TubeSettings, build_tube_mesh};

/// A single mesh vertex
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Position in world units
    pub pos: Vector3<f32>,
    /// Unit-length normal
    pub normal: Vector3<f32>,
    /// Texture coordinate
    pub uv: Vector2<f32>,
}

/// An indexed 3D mesh with a single material
///
/// Triangles are wound counter-clockwise when seen from their front face.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh<M> {
    /// Vertex buffer
    pub vertices: Vec<Vertex>,
    /// Triangles, as indices into [`Mesh::vertices`]
    pub triangles: Vec<Vector3<usize>>,
    /// Material handle, passed through from the caller
    pub material: M,
}

impl<M> Mesh<M> {
    /// Returns a flat index buffer, three indices per triangle
    ///
    /// Indices are narrowed to `u32` for GPU upload.
    ///
    /// # Panics
    /// If any index is larger than `u32::MAX`
    pub fn indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|t| t.iter())
            .map(|i| {
                assert!(*i <= u32::MAX as usize, "index {i} overflows u32");
                *i as u32
            })
            .collect()
    }

    /// Computes the (non-normalized) geometric normal of a triangle from its
    /// winding
    pub fn face_normal(&self, tri: &Vector3<usize>) -> Vector3<f32> {
        let a = self.vertices[tri.x].pos;
        let b = self.vertices[tri.y].pos;
        let c = self.vertices[tri.z].pos;
        (b - a).cross(&(c - a))
    }

    /// Replaces the material, keeping the geometry
    pub fn with_material<N>(self, material: N) -> Mesh<N> {
        Mesh {
            vertices: self.vertices,
            triangles: self.triangles,
            material,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks that every triangle faces the same way as its vertex normals
    pub(crate) fn check_winding<M>(mesh: &Mesh<M>) {
        for (i, t) in mesh.triangles.iter().enumerate() {
            let n = mesh.face_normal(t);
            assert!(n.norm() > 0.0, "triangle {i} is degenerate");
            for v in t.iter() {
                let normal = mesh.vertices[*v].normal;
                assert!(
                    n.dot(&normal) > 0.0,
                    "triangle {i} ({t:?}) faces {n:?}, \
                     but vertex {v} has normal {normal:?}"
                );
            }
        }
    }

    fn triangle() -> Mesh<()> {
        let v = |x: f32, y: f32| Vertex {
            pos: Vector3::new(x, y, 0.0),
            normal: Vector3::z(),
            uv: Vector2::new(x, y),
        };
        Mesh {
            vertices: vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
            triangles: vec![Vector3::new(0, 1, 2)],
            material: (),
        }
    }

    #[test]
    fn flat_indices() {
        let mut mesh = triangle();
        mesh.triangles.push(Vector3::new(2, 1, 0));
        assert_eq!(mesh.indices(), vec![0, 1, 2, 2, 1, 0]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "overflows u32")]
    fn oversized_index() {
        let mut mesh = triangle();
        mesh.triangles.push(Vector3::new(0, 1, u32::MAX as usize + 1));
        mesh.indices();
    }

    #[test]
    fn face_normal_follows_winding() {
        let mesh = triangle();
        assert_eq!(mesh.face_normal(&mesh.triangles[0]), Vector3::z());
        check_winding(&mesh);
    }

    #[test]
    fn swap_material() {
        let mesh = triangle().with_material("red");
        assert_eq!(mesh.material, "red");
        assert_eq!(mesh.vertices.len(), 3);
    }
}
