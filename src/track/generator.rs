use crate::config::TrackConfig;
use crate::geom::{Float3, WORLD_UP};

use super::control::ControlPoints;
use super::distance::DistanceTable;
use super::error::{Result, TrackError};
use super::mesh::{build_track_vertices, TrackVertex};
use super::offset::{build_offset_curves, OffsetCurves};
use super::resample::resample_uniform;
use super::sampler::{sample, SamplePoint};

/// Owns a closed spline and every sequence derived from it.
///
/// Stages run in order: [`configure`](Self::configure),
/// [`build_centreline`](Self::build_centreline),
/// [`build_offset_curves`](Self::build_offset_curves),
/// [`build_track_vertices`](Self::build_track_vertices). Rebuilding a stage
/// clears every stage after it. A failing call leaves all state untouched.
#[derive(Debug, Clone)]
pub struct TrackGenerator {
    control: ControlPoints,
    distances: DistanceTable,
    centreline: Vec<Float3>,
    centreline_up_vectors: Vec<Float3>,
    offsets: OffsetCurves,
    vertices: Vec<TrackVertex>,
    world_up: Float3,
    texture_repeat_length: f32,
}

impl TrackGenerator {
    pub fn new() -> Self {
        let defaults = TrackConfig::default();
        Self {
            control: ControlPoints::default(),
            distances: DistanceTable::default(),
            centreline: Vec::new(),
            centreline_up_vectors: Vec::new(),
            offsets: OffsetCurves::default(),
            vertices: Vec::new(),
            world_up: WORLD_UP,
            texture_repeat_length: defaults.texture_repeat_length,
        }
    }

    /// Runs the whole pipeline for `control_points` with `config`.
    pub fn from_config(
        control_points: Vec<Float3>,
        up_vectors: Vec<Float3>,
        config: &TrackConfig,
    ) -> Result<Self> {
        let mut generator = Self::new();
        generator.configure(control_points, up_vectors)?;
        generator.build(config)?;
        Ok(generator)
    }

    /// Installs a new control polygon and tabulates its arc lengths.
    ///
    /// `up_vectors` is either empty or one per control point. All derived
    /// sequences are cleared.
    pub fn configure(
        &mut self,
        control_points: Vec<Float3>,
        up_vectors: Vec<Float3>,
    ) -> Result<()> {
        let control = ControlPoints::new(control_points, up_vectors)?;
        let distances = DistanceTable::compute(control.positions())?;

        if distances.total_length() <= 0.0 {
            log::warn!("control polygon has zero length; the loop collapses to one point");
        }
        log::debug!(
            "configured {} control points, loop length {:.3}",
            control.len(),
            distances.total_length()
        );

        self.control = control;
        self.distances = distances;
        self.centreline.clear();
        self.centreline_up_vectors.clear();
        self.offsets = OffsetCurves::default();
        self.vertices.clear();
        Ok(())
    }

    /// Resamples the spline into `sample_count` near-equidistant points.
    ///
    /// The first resampling pass replaces the control polygon, so later
    /// [`sample`](Self::sample) calls follow the resampled loop.
    pub fn build_centreline(&mut self, sample_count: usize) -> Result<&[Float3]> {
        if self.control.is_empty() {
            return Err(TrackError::InconsistentState("control points not configured"));
        }

        let resampled = resample_uniform(&self.control, sample_count)?;
        log::debug!(
            "built centreline: {} points, loop length {:.3}",
            resampled.positions.len(),
            resampled.distances.total_length()
        );

        self.control = resampled.control;
        self.distances = resampled.distances;
        self.centreline = resampled.positions;
        self.centreline_up_vectors = resampled.up_vectors;
        self.offsets = OffsetCurves::default();
        self.vertices.clear();
        Ok(&self.centreline)
    }

    /// Builds the left and right rails `half_width` from the centreline.
    pub fn build_offset_curves(&mut self, half_width: f32) -> Result<(&[Float3], &[Float3])> {
        let offsets = build_offset_curves(&self.centreline, half_width, self.world_up)?;
        log::debug!("built offset curves: {} points per rail", offsets.len());

        self.offsets = offsets;
        self.vertices.clear();
        Ok((&self.offsets.left, &self.offsets.right))
    }

    /// Builds the triangle-strip vertex stream from the rails.
    pub fn build_track_vertices(&mut self) -> Result<&[TrackVertex]> {
        let vertices =
            build_track_vertices(&self.offsets, self.world_up, self.texture_repeat_length)?;
        log::debug!("built track mesh: {} strip vertices", vertices.len());

        self.vertices = vertices;
        Ok(&self.vertices)
    }

    /// Runs the centreline, offset and mesh stages with `config`.
    pub fn build(&mut self, config: &TrackConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| TrackError::InvalidInput(e.to_string()))?;

        let mut staged = self.clone();
        staged.world_up = config.world_up.normalize();
        staged.texture_repeat_length = config.texture_repeat_length;
        staged.build_centreline(config.sample_count)?;
        staged.build_offset_curves(config.half_width())?;
        staged.build_track_vertices()?;

        *self = staged;
        Ok(())
    }

    /// Position (and up-vector, if configured) at arc length `distance`.
    pub fn sample(&self, distance: f32) -> Result<SamplePoint> {
        sample(&self.control, &self.distances, distance)
    }

    /// Completed laps after travelling `distance`.
    pub fn current_lap(&self, distance: f32) -> Result<u32> {
        let total = self.total_length();
        if !distance.is_finite() || distance < 0.0 || self.distances.is_empty() {
            return Err(TrackError::OutOfRange { distance });
        }
        if total <= 0.0 {
            return Ok(0);
        }
        Ok((distance / total).floor() as u32)
    }

    /// Rail points interleaved left/right; empty before the rails are built.
    pub fn track_rail_points(&self) -> Vec<Float3> {
        self.offsets.interleaved()
    }

    pub fn control_points(&self) -> &[Float3] {
        self.control.positions()
    }

    pub fn control_up_vectors(&self) -> &[Float3] {
        self.control.up_vectors()
    }

    pub fn distances(&self) -> &[f32] {
        self.distances.entries()
    }

    pub fn total_length(&self) -> f32 {
        self.distances.total_length()
    }

    pub fn centreline(&self) -> &[Float3] {
        &self.centreline
    }

    pub fn centreline_up_vectors(&self) -> &[Float3] {
        &self.centreline_up_vectors
    }

    pub fn left_offset_points(&self) -> &[Float3] {
        &self.offsets.left
    }

    pub fn right_offset_points(&self) -> &[Float3] {
        &self.offsets.right
    }

    pub fn track_vertices(&self) -> &[TrackVertex] {
        &self.vertices
    }

    pub fn world_up(&self) -> Float3 {
        self.world_up
    }
}

impl Default for TrackGenerator {
    fn default() -> Self {
        Self::new()
    }
}
