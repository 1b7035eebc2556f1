//! Tube meshes swept along a polyline
//!
//! The tube has one ring of vertices per path point.  Each segment gets an
//! orientation frame whose up axis is seeded from the previous segment's, which
//! keeps the tube from twisting as the path curves.  Rings at interior points
//! are shared by the two segments that meet there, and use the frame halfway
//! between them so that joints don't show a sharp crease.
//!
//! Vertex layout, with `S` sides and `N` points:
//!
//! - `N` rings of `S + 1` vertices each; the last vertex of a ring duplicates
//!   the first, so that the `u` texture coordinate can run from 0 to 1
//! - A start cap: one center vertex followed by `S + 1` rim vertices
//! - An end cap, laid out the same way
use super::{Mesh, MeshBuilder, Vertex};
use crate::{Point3, math};
use log::debug;
use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// Default number of sides around the tube
pub const NUMBER_OF_SIDES: usize = 8;

/// Settings for tube meshing
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TubeSettings {
    /// Tube radius, in world units
    pub radius: f32,

    /// Number of sides around the tube
    ///
    /// This must be at least 3.
    pub sides: usize,
}

impl Default for TubeSettings {
    fn default() -> Self {
        Self {
            radius: 0.005,
            sides: NUMBER_OF_SIDES,
        }
    }
}

/// Which end of the tube a cap closes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cap {
    Start,
    End,
}

/// Builds a tube of the given radius around `points`, with
/// [`NUMBER_OF_SIDES`] sides
///
/// Returns `None` if there are fewer than two points.
pub fn build_tube_mesh<M>(
    radius: f32,
    points: &[Point3],
    material: M,
) -> Option<Mesh<M>> {
    TubeSettings {
        radius,
        sides: NUMBER_OF_SIDES,
    }
    .build(points, material)
}

impl TubeSettings {
    /// Builds a tube around `points`
    ///
    /// Returns `None` if there are fewer than two points.  Consecutive points
    /// must be distinct, which [`LineSimplifier`] guarantees.
    ///
    /// [`LineSimplifier`]: crate::simplify::LineSimplifier
    pub fn build<M>(&self, points: &[Point3], material: M) -> Option<Mesh<M>> {
        if points.len() < 2 {
            return None;
        }
        debug_assert!(self.sides >= 3);
        let stride = self.sides + 1;
        let segments = points.len() - 1;

        let mut out = MeshBuilder::with_capacity(
            points.len() * stride + 2 * (stride + 1),
            2 * segments * self.sides + 2 * self.sides,
        );

        // (cos θ, sin θ) around the ring; the closing vertex reuses angle 0
        let angles: Vec<(f32, f32)> = (0..=self.sides)
            .map(|k| {
                let theta = std::f32::consts::TAU * (k % self.sides) as f32
                    / self.sides as f32;
                (theta.cos(), theta.sin())
            })
            .collect();

        let frames = segment_frames(points);
        let mut v = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                v += (p - points[i - 1]).norm();
            }
            let frame = ring_frame(&frames, i);
            let right = math::right(&frame);
            let up = math::up(&frame);
            out.extend(angles.iter().enumerate().map(|(k, (c, s))| {
                let radial = right * *c + up * *s;
                Vertex {
                    pos: p + radial * self.radius,
                    normal: radial.normalize(),
                    uv: Vector2::new(k as f32 / self.sides as f32, v),
                }
            }));
        }

        for segment in 0..segments {
            let top = segment * stride;
            let bottom = top + stride;
            for side in 0..self.sides {
                let top_left = top + side;
                let top_right = top_left + 1;
                let bottom_left = bottom + side;
                let bottom_right = bottom_left + 1;
                out.push(Vector3::new(top_left, bottom_right, top_right));
                out.push(Vector3::new(top_left, bottom_left, bottom_right));
            }
        }

        self.push_cap(&mut out, points, &angles, Cap::Start);
        self.push_cap(&mut out, points, &angles, Cap::End);

        let mesh = out.take(material);
        debug!(
            "built tube with {} points, {} vertices, {} triangles",
            points.len(),
            mesh.vertices.len(),
            mesh.triangles.len()
        );
        Some(mesh)
    }

    /// Adds a triangle fan closing one end of the tube
    fn push_cap(
        &self,
        out: &mut MeshBuilder,
        points: &[Point3],
        angles: &[(f32, f32)],
        cap: Cap,
    ) {
        let (ring, inner) = match cap {
            Cap::Start => (0, 1),
            Cap::End => (points.len() - 1, points.len() - 2),
        };
        let normal = (points[ring] - points[inner]).normalize();
        let center = out.vertex(Vertex {
            pos: points[ring],
            normal,
            uv: Vector2::new(0.5, 0.5),
        });

        let rim = ring * (self.sides + 1);
        for (k, (c, s)) in angles.iter().enumerate() {
            let pos = out.get(rim + k).pos;
            out.vertex(Vertex {
                pos,
                normal,
                uv: Vector2::new((c + 1.0) / 2.0, (s + 1.0) / 2.0),
            });
        }
        for k in 0..self.sides {
            let a = center + k + 1;
            let b = center + k + 2;
            out.push(match cap {
                Cap::Start => Vector3::new(center, a, b),
                Cap::End => Vector3::new(center, b, a),
            });
        }
    }
}

/// Builds one orientation frame per segment, left to right
///
/// Each frame looks along its segment, using the previous frame's up axis as
/// the up hint (world `+Y` for the first).  If the path turns straight into
/// that up axis, the hint is instead carried through the turn from the
/// previous frame.  Frames are kept in the same quaternion hemisphere as their
/// predecessor, so that interpolating between neighbors takes the short way
/// around.
pub(crate) fn segment_frames(points: &[Point3]) -> Vec<UnitQuaternion<f32>> {
    points
        .windows(2)
        .scan(
            (Vector3::y(), None::<UnitQuaternion<f32>>),
            |(up, prev), w| {
                let dir = w[1] - w[0];
                let hint = match prev {
                    Some(p) if math::is_parallel(&dir, up) => {
                        math::transport(&math::forward(p), &dir, up)
                    }
                    _ => *up,
                };
                let q = math::look_rotation(&dir, &hint);
                let q = match prev {
                    Some(p) => math::align_hemisphere(p, q),
                    None => q,
                };
                *up = math::up(&q);
                *prev = Some(q);
                Some(q)
            },
        )
        .collect()
}

/// Returns the frame for the ring at point `i`
///
/// End rings use their segment's frame; interior rings are shared between two
/// segments and use the frame halfway between them.
fn ring_frame(
    frames: &[UnitQuaternion<f32>],
    i: usize,
) -> UnitQuaternion<f32> {
    if i == 0 {
        frames[0]
    } else if i == frames.len() {
        frames[i - 1]
    } else {
        math::halfway(&frames[i - 1], &frames[i])
    }
}
