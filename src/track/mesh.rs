use bytemuck::{Pod, Zeroable};

use crate::geom::{Float2, Float3};

use super::error::{Result, TrackError};
use super::offset::OffsetCurves;

/// Interleaved vertex for the track surface.
/// Matches the position/texcoord/normal attribute layout of the renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TrackVertex {
    pub position: Float3,
    pub uv: Float2,
    pub normal: Float3,
}

impl TrackVertex {
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    pub const fn new(position: Float3, uv: Float2, normal: Float3) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }

    /// Untextured vertex, used for point and line overlays.
    pub const fn plain(position: Float3, normal: Float3) -> Self {
        Self::new(position, Float2::ZERO, normal)
    }
}

/// Builds the triangle-strip vertex stream for the track surface.
///
/// Emits `left[i], right[i]` per rail index, so every consecutive
/// left/right quad forms two strip triangles. U is 0 on the left rail and 1
/// on the right; V advances by `1 / texture_repeat_length` per step.
pub fn build_track_vertices(
    curves: &OffsetCurves,
    up: Float3,
    texture_repeat_length: f32,
) -> Result<Vec<TrackVertex>> {
    if curves.is_empty() {
        return Err(TrackError::InconsistentState("offset curves not built"));
    }
    if !(texture_repeat_length > 0.0) {
        return Err(TrackError::InvalidInput(format!(
            "texture repeat length {texture_repeat_length} must be positive"
        )));
    }

    let mut vertices = Vec::with_capacity(curves.len() * 2);
    for (i, (&l, &r)) in curves.left.iter().zip(&curves.right).enumerate() {
        let v = i as f32 / texture_repeat_length;
        vertices.push(TrackVertex::new(l, Float2::new(0.0, v), up));
        vertices.push(TrackVertex::new(r, Float2::new(1.0, v), up));
    }

    Ok(vertices)
}

/// Wraps positions as untextured vertices for point/line rendering.
pub fn plain_vertices(points: &[Float3], up: Float3) -> Vec<TrackVertex> {
    points.iter().map(|&p| TrackVertex::plain(p, up)).collect()
}
