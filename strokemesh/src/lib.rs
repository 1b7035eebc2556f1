//! Strokemesh is a library for turning streams of 3D points into renderable
//! triangle meshes.
//!
//! It is built for interactive drawing: a user drags a cursor (or a tracked
//! device) through space, the points arrive one at a time, and every frame the
//! stroke is rebuilt as solid geometry that a renderer uploads to the GPU.
//!
//! The library has three parts:
//!
//! - A [`LineSimplifier`](crate::simplify::LineSimplifier), which rejects
//!   jittery near-duplicate samples and compresses the tail of the stroke with
//!   the Ramer–Douglas–Peucker algorithm
//! - A tube mesher ([`mesh::build_tube_mesh`]), which extrudes a polygonal
//!   tube around the polyline with end caps, normals, and UV coordinates
//! - A point cloud mesher ([`mesh::build_point_cloud_mesh`]), which draws one
//!   small cube per sample of a `(x, y, z, confidence)` buffer
//!
//! # Drawing a stroke
//! Points are streamed into the simplifier, then meshed:
//! ```
//! use strokemesh::{mesh::build_tube_mesh, simplify::LineSimplifier};
//! use nalgebra::Vector3;
//!
//! let mut line = LineSimplifier::new();
//! for i in 0..20 {
//!     let t = i as f32 * 0.01;
//!     line.append(Vector3::new(t, t.sin(), 0.0));
//! }
//! let mesh = build_tube_mesh(0.005, line.points(), "chalk").unwrap();
//! assert_eq!(mesh.material, "chalk");
//! assert!(!mesh.triangles.is_empty());
//! ```
//!
//! [`Stroke`](crate::stroke::Stroke) bundles the two steps, along with the
//! tube settings and material.
//!
//! A stroke with fewer than two points has no mesh; this is normal on the
//! first frame of a new stroke, and is reported as `None` rather than an
//! error:
//! ```
//! use strokemesh::mesh::build_tube_mesh;
//! use nalgebra::Vector3;
//!
//! assert!(build_tube_mesh(0.005, &[Vector3::zeros()], ()).is_none());
//! ```
//!
//! # Point clouds
//! ```
//! use strokemesh::mesh::build_point_cloud_mesh;
//!
//! let buffer = [0.0, 0.0, 0.0, 0.9, 1.0, 0.0, 0.0, 0.4];
//! let mesh = build_point_cloud_mesh(&buffer, ()).unwrap();
//! assert_eq!(mesh.vertices.len(), 48);
//! ```
//!
//! # Feature flags
#![doc = document_features::document_features!()]
#![warn(missing_docs)]

mod error;
pub use error::Error;

pub mod math;
pub mod mesh;
pub mod points;
pub mod simplify;
pub mod stroke;

/// A point in 3D space
pub type Point3 = nalgebra::Vector3<f32>;
