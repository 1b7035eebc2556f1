//! Cuboid meshes for point clouds
use super::{Mesh, MeshBuilder, Vertex};
use crate::Point3;
use log::{debug, warn};
use nalgebra::{Vector2, Vector3};

/// Number of floats per sample: `x, y, z, confidence`
const STRIDE: usize = 4;

/// Vertices per cuboid (4 per face, unshared so that faces are flat-shaded)
const CUBE_VERTS: usize = 24;

/// Each face lists its outward normal and four corners, given as signs of the
/// half-extent
///
/// Corners are ordered so that triangles `(3, 1, 0)` and `(3, 2, 1)` are wound
/// counter-clockwise as seen from outside the cube.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // -Y
    (
        [0.0, -1.0, 0.0],
        [
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0],
        ],
    ),
    // -X
    (
        [-1.0, 0.0, 0.0],
        [
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, -1.0, -1.0],
        ],
    ),
    // +Z
    (
        [0.0, 0.0, 1.0],
        [
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
            [-1.0, -1.0, 1.0],
        ],
    ),
    // -Z
    (
        [0.0, 0.0, -1.0],
        [
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
        ],
    ),
    // +X
    (
        [1.0, 0.0, 0.0],
        [
            [1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
        ],
    ),
    // +Y
    (
        [0.0, 1.0, 0.0],
        [
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ],
    ),
];

/// Texture coordinates for the four corners of every face
const FACE_UVS: [[f32; 2]; 4] =
    [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Threading mode for point cloud meshing
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ThreadCount {
    /// Build every cube on the calling thread
    #[default]
    One,

    /// Build cubes on a dedicated pool with this many workers
    #[cfg(feature = "rayon")]
    Many(std::num::NonZeroUsize),
}

/// A single worker is the same as [`ThreadCount::One`]
#[cfg(feature = "rayon")]
impl From<std::num::NonZeroUsize> for ThreadCount {
    fn from(n: std::num::NonZeroUsize) -> Self {
        if n.get() == 1 {
            Self::One
        } else {
            Self::Many(n)
        }
    }
}

/// Settings for point cloud meshing
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CloudSettings {
    /// Half the edge length of each cube, in world units
    pub half_extent: f32,

    /// Threads used to generate vertices
    pub threads: ThreadCount,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            half_extent: 0.0025,
            threads: ThreadCount::One,
        }
    }
}

/// Builds a mesh with one small cube per sample, using default settings
///
/// `buffer` is a flat list of `x, y, z, confidence` samples.  Returns `None`
/// if it holds no complete samples.
pub fn build_point_cloud_mesh<M>(
    buffer: &[f32],
    material: M,
) -> Option<Mesh<M>> {
    CloudSettings::default().build(buffer, material)
}

impl CloudSettings {
    /// Builds a mesh with one cube per sample of `buffer`
    ///
    /// `buffer` is a flat list of `x, y, z, confidence` samples; confidence is
    /// currently ignored, and a trailing partial sample is dropped.  Returns
    /// `None` if the buffer holds no complete samples.
    pub fn build<M>(&self, buffer: &[f32], material: M) -> Option<Mesh<M>> {
        if buffer.len() % STRIDE != 0 {
            warn!(
                "point cloud buffer length {} is not a multiple of {STRIDE}",
                buffer.len()
            );
        }
        let count = buffer.len() / STRIDE;
        if count == 0 {
            return None;
        }

        let mut out =
            MeshBuilder::with_capacity(count * CUBE_VERTS, count * 12);
        out.extend(self.vertices(&buffer[..count * STRIDE]));
        for i in 0..count {
            for face in 0..FACES.len() {
                let base = i * CUBE_VERTS + face * 4;
                out.push(Vector3::new(base + 3, base + 1, base));
                out.push(Vector3::new(base + 3, base + 2, base + 1));
            }
        }

        let mesh = out.take(material);
        debug!(
            "built point cloud with {count} points, {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangles.len()
        );
        Some(mesh)
    }

    /// Generates the vertices of every cube, in sample order
    fn vertices(&self, buffer: &[f32]) -> Vec<Vertex> {
        let e = self.half_extent;
        match self.threads {
            ThreadCount::One => buffer
                .chunks_exact(STRIDE)
                .flat_map(|s| cuboid(Vector3::new(s[0], s[1], s[2]), e))
                .collect(),
            #[cfg(feature = "rayon")]
            ThreadCount::Many(n) => {
                use rayon::prelude::*;
                let run = || {
                    buffer
                        .par_chunks_exact(STRIDE)
                        .flat_map_iter(|s| {
                            cuboid(Vector3::new(s[0], s[1], s[2]), e)
                        })
                        .collect::<Vec<_>>()
                };
                match rayon::ThreadPoolBuilder::new()
                    .num_threads(n.get())
                    .build()
                {
                    Ok(pool) => pool.install(run),
                    Err(err) => {
                        warn!("could not build thread pool ({err}), using one");
                        run()
                    }
                }
            }
        }
    }
}

/// Returns the 24 vertices of a cube centered at `center`
fn cuboid(center: Point3, half_extent: f32) -> [Vertex; CUBE_VERTS] {
    std::array::from_fn(|i| {
        let (normal, corners) = &FACES[i / 4];
        let uv = FACE_UVS[i % 4];
        Vertex {
            pos: center + Vector3::from(corners[i % 4]) * half_extent,
            normal: Vector3::from(*normal),
            uv: Vector2::from(uv),
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::test::check_winding;

    fn cloud(n: usize) -> Vec<f32> {
        (0..n)
            .flat_map(|i| {
                let t = i as f32;
                [t * 0.1, (t * 0.7).sin(), -t * 0.05, 0.5]
            })
            .collect()
    }

    #[test]
    fn empty() {
        assert!(build_point_cloud_mesh(&[], ()).is_none());
        assert!(build_point_cloud_mesh(&[1.0, 2.0, 3.0], ()).is_none());
    }

    #[test]
    fn three_points() {
        let mesh = build_point_cloud_mesh(&cloud(3), ()).unwrap();
        assert_eq!(mesh.vertices.len(), 72);
        assert_eq!(mesh.indices().len(), 108);
    }

    #[test]
    fn partial_sample_ignored() {
        let mut buf = cloud(2);
        buf.extend([9.0, 9.0]);
        let mesh = build_point_cloud_mesh(&buf, ()).unwrap();
        assert_eq!(mesh.vertices.len(), 48);
    }

    #[test]
    fn cubes_surround_samples() {
        let buf = cloud(5);
        let mesh = build_point_cloud_mesh(&buf, ()).unwrap();
        for (i, s) in buf.chunks_exact(4).enumerate() {
            let center = Vector3::new(s[0], s[1], s[2]);
            let verts = &mesh.vertices[i * CUBE_VERTS..(i + 1) * CUBE_VERTS];
            for v in verts {
                let d = v.pos - center;
                assert!(d.iter().all(|c| (c.abs() - 0.0025).abs() < 1e-6));
                assert_eq!(v.normal.norm(), 1.0);
                // Every vertex lies on the face that its normal points out of
                assert!((d.dot(&v.normal) - 0.0025).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn winding() {
        let settings = CloudSettings {
            half_extent: 0.5,
            ..Default::default()
        };
        let mesh = settings.build(&cloud(4), ()).unwrap();
        check_winding(&mesh);
    }

    #[test]
    fn confidence_ignored() {
        let mut a = cloud(3);
        let b = build_point_cloud_mesh(&a, ()).unwrap();
        for s in a.chunks_exact_mut(4) {
            s[3] = 0.0;
        }
        assert_eq!(build_point_cloud_mesh(&a, ()).unwrap(), b);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn threaded_matches() {
        let buf = cloud(1000);
        let one = CloudSettings::default().build(&buf, ()).unwrap();
        let many = CloudSettings {
            threads: std::num::NonZeroUsize::new(4).unwrap().into(),
            ..Default::default()
        }
        .build(&buf, ())
        .unwrap();
        assert_eq!(one, many);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn thread_count_from() {
        let n = |v| std::num::NonZeroUsize::new(v).unwrap();
        assert_eq!(ThreadCount::from(n(1)), ThreadCount::One);
        assert_eq!(ThreadCount::from(n(3)), ThreadCount::Many(n(3)));
    }
}
