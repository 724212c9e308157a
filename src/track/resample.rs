use crate::geom::{Float3, MAX_SAMPLE_COUNT};

use super::control::ControlPoints;
use super::distance::DistanceTable;
use super::error::{Result, TrackError};
use super::sampler::sample;

/// Output of [`resample_uniform`].
#[derive(Debug, Clone)]
pub struct Resampled {
    /// First-pass points; they replace the original control polygon.
    pub control: ControlPoints,
    /// Distance table over `control`.
    pub distances: DistanceTable,
    /// Second-pass positions, near-equidistant along the loop.
    pub positions: Vec<Float3>,
    /// Second-pass up-vectors; empty when the control points carry none.
    pub up_vectors: Vec<Float3>,
}

/// Samples the spline `count` times at equal arc-length steps of the
/// control polygon.
fn sample_pass(
    points: &ControlPoints,
    table: &DistanceTable,
    count: usize,
) -> Result<(Vec<Float3>, Vec<Float3>)> {
    let spacing = table.total_length() / count as f32;

    let mut positions = Vec::with_capacity(count);
    let mut up_vectors = Vec::with_capacity(if points.has_up_vectors() { count } else { 0 });

    for i in 0..count {
        let s = sample(points, table, i as f32 * spacing)?;
        positions.push(s.position);
        if let Some(up) = s.up {
            up_vectors.push(up);
        }
    }

    Ok((positions, up_vectors))
}

/// Resamples a closed control polygon into `count` near-equidistant points.
///
/// Spacing is measured along the control polygon, not the curve, so one pass
/// leaves the points uneven wherever the polygon is coarse. The first pass
/// output becomes the control polygon for a second pass with the same count,
/// whose polygon hugs the curve closely enough for even spacing.
pub fn resample_uniform(points: &ControlPoints, count: usize) -> Result<Resampled> {
    if count == 0 {
        return Err(TrackError::InvalidInput("sample count must be positive".into()));
    }
    if count > MAX_SAMPLE_COUNT {
        return Err(TrackError::InvalidInput(format!(
            "sample count {count} exceeds {MAX_SAMPLE_COUNT}"
        )));
    }

    let table = DistanceTable::compute(points.positions())?;
    let (first_positions, first_ups) = sample_pass(points, &table, count)?;
    log::trace!(
        "first resampling pass: {} points over {:.3}",
        first_positions.len(),
        table.total_length()
    );

    let control = ControlPoints::new(first_positions, first_ups)?;
    let distances = DistanceTable::compute(control.positions())?;
    let (positions, up_vectors) = sample_pass(&control, &distances, count)?;

    Ok(Resampled {
        control,
        distances,
        positions,
        up_vectors,
    })
}
