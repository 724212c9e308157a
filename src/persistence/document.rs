//! Owned track document: everything needed to rebuild a track.

use crate::config::TrackConfig;
use crate::geom::Float3;
use crate::track::{Result, TrackGenerator};

/// Control points plus the config they are built with.
///
/// Derived geometry is not stored; it is regenerated on load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackDocument {
    pub control_points: Vec<Float3>,
    pub up_vectors: Vec<Float3>,
    pub config: TrackConfig,
}

impl TrackDocument {
    pub fn new(control_points: Vec<Float3>, up_vectors: Vec<Float3>, config: TrackConfig) -> Self {
        Self {
            control_points,
            up_vectors,
            config,
        }
    }

    /// Rebuilds the full pipeline from the stored points and config.
    pub fn to_generator(&self) -> Result<TrackGenerator> {
        TrackGenerator::from_config(
            self.control_points.clone(),
            self.up_vectors.clone(),
            &self.config,
        )
    }
}
