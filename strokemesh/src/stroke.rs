//! Drawing strokes
//!
//! A [`Stroke`] ties a [`LineSimplifier`] to tube settings and a material, so
//! that the caller can append points as they arrive and ask for a fresh mesh
//! every frame.
//! ```
//! use strokemesh::{mesh::TubeSettings, stroke::Stroke};
//! use nalgebra::Vector3;
//!
//! let mut stroke = Stroke::new(TubeSettings::default(), "ink");
//! stroke.append(Vector3::new(0.0, 0.0, 0.0));
//! assert!(stroke.mesh().is_none()); // not yet drawable
//!
//! stroke.append(Vector3::new(0.0, 0.1, 0.0));
//! let mesh = stroke.mesh().unwrap();
//! assert_eq!(mesh.material, "ink");
//! ```
use crate::{
    Point3,
    mesh::{Mesh, TubeSettings},
    simplify::{LineSimplifier, SimplifierSettings},
};

/// A stroke being drawn, with its material
#[derive(Clone, Debug)]
pub struct Stroke<M> {
    line: LineSimplifier,
    tube: TubeSettings,
    material: M,
}

impl<M: Clone> Stroke<M> {
    /// Starts an empty stroke with default simplifier settings
    pub fn new(tube: TubeSettings, material: M) -> Self {
        Self::with_simplifier(SimplifierSettings::default(), tube, material)
    }

    /// Starts an empty stroke with custom simplifier settings
    pub fn with_simplifier(
        settings: SimplifierSettings,
        tube: TubeSettings,
        material: M,
    ) -> Self {
        Self {
            line: LineSimplifier::with_settings(settings),
            tube,
            material,
        }
    }

    /// Adds a point to the end of the stroke
    pub fn append(&mut self, p: Point3) {
        self.line.append(p)
    }

    /// Simplifies the last few points; call this when the stroke is done
    pub fn finish(&mut self) {
        self.line.finish()
    }

    /// Returns the stroke's current polyline
    pub fn points(&self) -> &[Point3] {
        self.line.points()
    }

    /// Checks whether the stroke has enough points to be meshed
    ///
    /// Strokes which are never drawable (e.g. a single tap) should be
    /// discarded by the caller.
    pub fn is_drawable(&self) -> bool {
        self.line.len() >= 2
    }

    /// Returns the stroke's material
    pub fn material(&self) -> &M {
        &self.material
    }

    /// Changes the material used by future meshes
    pub fn set_material(&mut self, material: M) {
        self.material = material;
    }

    /// Builds a mesh for the stroke's current polyline
    pub fn mesh(&self) -> Option<Mesh<M>> {
        self.tube.build(self.line.points(), self.material.clone())
    }
}
