use crate::geom::{wrap_distance, Float3};

use super::control::ControlPoints;
use super::distance::DistanceTable;
use super::error::{Result, TrackError};

/// A point evaluated on the closed spline.
/// `up` is present only when every control point carries an up-vector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplePoint {
    pub position: Float3,
    pub up: Option<Float3>,
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2`, `t` in `[0, 1]`.
pub fn catmull_rom(p0: Float3, p1: Float3, p2: Float3, p3: Float3, t: f32) -> Float3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = p1;
    let b = (p2 - p0) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * 0.5;

    a + b * t + c * t2 + d * t3
}

/// Evaluates the closed spline through `points` at arc length `distance`.
///
/// Distances past the loop length wrap around any number of times. Negative
/// or non-finite distances are rejected.
pub fn sample(points: &ControlPoints, table: &DistanceTable, distance: f32) -> Result<SamplePoint> {
    if !distance.is_finite()
        || distance < 0.0
        || points.is_empty()
        || table.len() != points.len() + 1
    {
        return Err(TrackError::OutOfRange { distance });
    }

    let total = table.total_length();
    if total <= 0.0 {
        // Every point coincides; the loop is a single position
        return Ok(SamplePoint {
            position: points.positions()[0],
            up: points
                .has_up_vectors()
                .then(|| points.up_vectors()[0].normalize()),
        });
    }

    let arc = wrap_distance(distance, total);
    let j = table
        .find_segment(arc)
        .ok_or(TrackError::SegmentNotFound { distance })?;
    let t = (arc - table.entries()[j]) / table.segment_length(j);

    let [i0, i1, i2, i3] = points.segment_indices(j);
    let p = points.positions();
    let position = catmull_rom(p[i0], p[i1], p[i2], p[i3], t);

    let up = points.has_up_vectors().then(|| {
        let u = points.up_vectors();
        catmull_rom(u[i0], u[i1], u[i2], u[i3], t).normalize()
    });

    log::trace!("sample d={distance} arc={arc} segment={j} t={t}");

    Ok(SamplePoint { position, up })
}
