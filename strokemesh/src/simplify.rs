//! Incremental polyline simplification
//!
//! Hand-drawn strokes arrive as a dense stream of jittery samples.  The
//! [`LineSimplifier`] keeps the stroke sparse in two ways: samples which are
//! too close to the previous point are dropped outright, and every time a
//! window of new points has accumulated, that window is compressed with the
//! [Ramer–Douglas–Peucker](https://en.wikipedia.org/wiki/Ramer%E2%80%93Douglas%E2%80%93Peucker_algorithm)
//! algorithm.
use crate::Point3;
use log::{debug, trace};

/// Tuning parameters for a [`LineSimplifier`]
///
/// Distances are in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimplifierSettings {
    /// Points closer than this to the previous point are dropped
    pub min_distance: f32,

    /// Maximum distance between a dropped point and the simplified line
    pub tolerance: f32,

    /// Number of new points collected before the tail is simplified
    pub window: usize,
}

impl Default for SimplifierSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.001,
            tolerance: 0.005,
            window: 5,
        }
    }
}

/// Accumulates a stroke, simplifying it as it grows
///
/// Points before the *anchor* have already been simplified and are never
/// touched again; the anchor itself is the first point of the next window.
#[derive(Clone, Debug, Default)]
pub struct LineSimplifier {
    points: Vec<Point3>,
    anchor: usize,
    settings: SimplifierSettings,
}

impl LineSimplifier {
    /// Builds an empty simplifier with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an empty simplifier with the given settings
    pub fn with_settings(settings: SimplifierSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Returns the settings used by this simplifier
    pub fn settings(&self) -> &SimplifierSettings {
        &self.settings
    }

    /// Returns the current best polyline
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of points in the polyline
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Checks whether the polyline is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point to the stroke
    ///
    /// The point is ignored if it is within
    /// [`min_distance`](SimplifierSettings::min_distance) of the last point.
    /// Once more than [`window`](SimplifierSettings::window) points follow the
    /// anchor, the trailing run is simplified in place.
    pub fn append(&mut self, point: Point3) {
        if let Some(last) = self.points.last() {
            let d = (point - last).norm();
            if d < self.settings.min_distance {
                trace!("dropping point {point:?} ({d} from previous)");
                return;
            }
        }
        self.points.push(point);
        if self.points.len() - self.anchor > self.settings.window {
            self.simplify_tail();
        }
    }

    /// Simplifies any points collected since the last full window
    ///
    /// This should be called when the stroke is complete; calling it again
    /// without appending more points has no effect.
    pub fn finish(&mut self) {
        if self.points.len() > self.anchor + 2 {
            self.simplify_tail();
        }
    }

    /// Removes every point, keeping the settings
    pub fn clear(&mut self) {
        self.points.clear();
        self.anchor = 0;
    }

    fn simplify_tail(&mut self) {
        let tail = &self.points[self.anchor..];
        let simplified = simplify(tail, self.settings.tolerance);

        // Collapsing a tiny loop could leave two nearly-coincident points,
        // which would break the spacing invariant enforced by `append`
        let min = self.settings.min_distance;
        if simplified.len() == tail.len()
            || simplified.windows(2).any(|w| (w[1] - w[0]).norm() < min)
        {
            self.anchor = self.points.len() - 1;
            return;
        }
        debug!(
            "simplified {} trailing points to {}",
            tail.len(),
            simplified.len()
        );

        let mut points = Vec::with_capacity(self.anchor + simplified.len());
        points.extend_from_slice(&self.points[..self.anchor]);
        points.extend(simplified);
        self.points = points;
        self.anchor = self.points.len() - 1;
    }
}

/// Returns the distance from `p` to the infinite line through `start` and
/// `end`
///
/// If `start` and `end` coincide, this is the distance from `p` to `start`.
pub fn perpendicular_distance(
    start: &Point3,
    end: &Point3,
    p: &Point3,
) -> f32 {
    let chord = (end - start).norm();
    if chord <= f32::EPSILON {
        (p - start).norm()
    } else {
        (p - start).cross(&(p - end)).norm() / chord
    }
}

/// Simplifies a polyline with the Ramer–Douglas–Peucker algorithm
///
/// The endpoints are always kept.  Interior points are kept only where
/// dropping them would move the line by more than `tolerance`.
pub fn simplify(points: &[Point3], tolerance: f32) -> Vec<Point3> {
    let mut out = Vec::with_capacity(points.len());
    if let Some(first) = points.first() {
        out.push(*first);
        simplify_into(points, tolerance, &mut out);
    }
    out
}

/// Pushes every kept point of `points` except the first
fn simplify_into(points: &[Point3], tolerance: f32, out: &mut Vec<Point3>) {
    let (start, end) = match points {
        [] | [_] => return,
        [start, .., end] => (start, end),
    };
    let farthest = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, perpendicular_distance(start, end, p)))
        .max_by(|a, b| a.1.total_cmp(&b.1));
    match farthest {
        Some((i, d)) if d > tolerance => {
            simplify_into(&points[..=i], tolerance, out);
            simplify_into(&points[i..], tolerance, out);
        }
        _ => out.push(*end),
    }
}
