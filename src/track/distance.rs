use crate::geom::Float3;

use super::error::{Result, TrackError};

/// Cumulative arc length along a closed control polygon.
///
/// Holds one entry per control point plus a closing entry, so
/// `len() == points + 1`, `entries[0] == 0` and the last entry is the total
/// loop length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    entries: Vec<f32>,
}

impl DistanceTable {
    /// Tabulates distances along `points`, including the wrap-around
    /// segment from the last point back to the first.
    pub fn compute(points: &[Float3]) -> Result<Self> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(TrackError::InvalidInput("no control points".into())),
        };

        let mut entries = Vec::with_capacity(points.len() + 1);
        let mut accumulated = 0.0f32;
        entries.push(accumulated);
        for pair in points.windows(2) {
            accumulated += pair[0].distance(pair[1]);
            entries.push(accumulated);
        }

        accumulated += last.distance(first);
        entries.push(accumulated);

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[f32] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.entries.last().copied().unwrap_or(0.0)
    }

    /// Finds segment `j` with `entries[j] <= arc < entries[j + 1]`.
    ///
    /// Zero-length segments can never satisfy the bracket and are skipped.
    pub fn find_segment(&self, arc: f32) -> Option<usize> {
        if self.entries.len() < 2 {
            return None;
        }
        let last = self.entries.len() - 1;
        if !arc.is_finite() || arc < self.entries[0] || arc >= self.entries[last] {
            return None;
        }

        // Binary search for the last entry <= arc
        let mut lo = 0usize;
        let mut hi = last;
        while lo < hi - 1 {
            let mid = (lo + hi) / 2;
            if self.entries[mid] <= arc {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Some(lo)
    }

    /// Length of segment `j`.
    pub fn segment_length(&self, j: usize) -> f32 {
        self.entries[j + 1] - self.entries[j]
    }
}
