//! Orientation frames for sweeping geometry along a path
//!
//! Frames are stored as unit quaternions.  The local basis follows the usual
//! renderer convention: right is `+X`, up is `+Y`, and forward is `-Z`, so
//! `right × up = -forward`.
use crate::Point3;
use nalgebra::{UnitQuaternion, Vector3};

/// Below this cross-product norm, a direction and an up hint are treated as
/// parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// Builds a rotation whose forward axis is `forward` and whose up axis is as
/// close to `up` as possible
///
/// `forward` must be non-zero.  If `up` is parallel to `forward`, world `-Z`
/// and then world `+X` are tried as hints instead, so the result is always a
/// valid rotation.
pub fn look_rotation(forward: &Point3, up: &Point3) -> UnitQuaternion<f32> {
    let forward = forward.normalize();
    let hint = [*up, -Vector3::z(), Vector3::x()]
        .into_iter()
        .find(|h| !is_parallel(&forward, h))
        .unwrap_or_else(Vector3::y);
    // `face_towards` maps local +Z onto its argument, and forward is -Z
    UnitQuaternion::face_towards(&-forward, &hint)
}

/// Checks whether two vectors are parallel (or anti-parallel)
///
/// A zero vector is parallel to everything.
pub fn is_parallel(a: &Point3, b: &Point3) -> bool {
    a.cross(b).norm() <= PARALLEL_EPSILON * a.norm() * b.norm()
}

/// Carries `v` through the smallest rotation that takes direction `from` to
/// direction `to`
///
/// If `from` and `to` point in opposite directions, the rotation is ambiguous
/// and `v` is returned unchanged.
pub fn transport(from: &Point3, to: &Point3, v: &Point3) -> Point3 {
    UnitQuaternion::rotation_between(from, to)
        .map(|r| r * v)
        .unwrap_or(*v)
}

/// Returns the frame's right axis in world space
pub fn right(q: &UnitQuaternion<f32>) -> Point3 {
    q * Vector3::x()
}

/// Returns the frame's up axis in world space
pub fn up(q: &UnitQuaternion<f32>) -> Point3 {
    q * Vector3::y()
}

/// Returns the frame's forward axis in world space
pub fn forward(q: &UnitQuaternion<f32>) -> Point3 {
    q * -Vector3::z()
}

/// Returns `q`, negated if needed so that it lies in the same hemisphere as
/// `prev`
///
/// `q` and `-q` are the same rotation, but interpolating between quaternions
/// in opposite hemispheres takes the long way around.
pub fn align_hemisphere(
    prev: &UnitQuaternion<f32>,
    q: UnitQuaternion<f32>,
) -> UnitQuaternion<f32> {
    if prev.coords.dot(&q.coords) < 0.0 {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        q
    }
}

/// Returns the rotation halfway between `a` and `b`
///
/// At `t = 0.5`, normalized linear interpolation is identical to spherical
/// interpolation.  The inputs should already share a hemisphere (see
/// [`align_hemisphere`]).
pub fn halfway(
    a: &UnitQuaternion<f32>,
    b: &UnitQuaternion<f32>,
) -> UnitQuaternion<f32> {
    a.nlerp(b, 0.5)
}
