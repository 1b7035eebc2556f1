use super::{Mesh, Vertex};

/// Container used during construction of a [`Mesh`]
///
/// Vertices are appended in order and addressed by their index; triangles
/// refer to those indices.
#[derive(Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    triangles: Vec<nalgebra::Vector3<usize>>,
}

impl MeshBuilder {
    /// Builds an empty builder with room for the given number of vertices and
    /// triangles
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Appends a vertex, returning its index
    pub fn vertex(&mut self, v: Vertex) -> usize {
        let i = self.vertices.len();
        self.vertices.push(v);
        i
    }

    /// Appends every vertex from the iterator
    pub fn extend<I: IntoIterator<Item = Vertex>>(&mut self, vs: I) {
        self.vertices.extend(vs)
    }

    /// Looks up a previously-pushed vertex
    pub fn get(&self, i: usize) -> &Vertex {
        &self.vertices[i]
    }

    pub fn push(&mut self, tri: nalgebra::Vector3<usize>) {
        debug_assert!(tri.iter().all(|i| *i < self.vertices.len()));
        self.triangles.push(tri)
    }

    pub fn take<M>(self, material: M) -> Mesh<M> {
        Mesh {
            vertices: self.vertices,
            triangles: self.triangles,
            material,
        }
    }
}
