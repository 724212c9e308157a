use crate::geom::Float3;

use super::error::{Result, TrackError};

/// Ordered waypoints of a closed loop, with optional per-point up-vectors.
///
/// The last point connects back to the first. Up-vectors are either absent
/// or present for every point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPoints {
    positions: Vec<Float3>,
    up_vectors: Vec<Float3>,
}

impl ControlPoints {
    /// Validates and stores a control polygon.
    ///
    /// `up_vectors` must be empty or match `positions` one to one. Every
    /// coordinate must be finite.
    pub fn new(positions: Vec<Float3>, up_vectors: Vec<Float3>) -> Result<Self> {
        if positions.is_empty() {
            return Err(TrackError::InvalidInput("no control points".into()));
        }
        if !up_vectors.is_empty() && up_vectors.len() != positions.len() {
            return Err(TrackError::InvalidInput(format!(
                "{} up-vectors for {} control points",
                up_vectors.len(),
                positions.len()
            )));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::InvalidInput(format!(
                "control point {i} is not finite"
            )));
        }
        if let Some(i) = up_vectors.iter().position(|u| !u.is_finite()) {
            return Err(TrackError::InvalidInput(format!("up-vector {i} is not finite")));
        }

        Ok(Self {
            positions,
            up_vectors,
        })
    }

    pub fn positions(&self) -> &[Float3] {
        &self.positions
    }

    pub fn up_vectors(&self) -> &[Float3] {
        &self.up_vectors
    }

    pub fn has_up_vectors(&self) -> bool {
        !self.up_vectors.is_empty() && self.up_vectors.len() == self.positions.len()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices of the four points that shape segment `j`, wrapping at both ends.
    pub fn segment_indices(&self, j: usize) -> [usize; 4] {
        let n = self.positions.len();
        [(j + n - 1) % n, j % n, (j + 1) % n, (j + 2) % n]
    }
}
