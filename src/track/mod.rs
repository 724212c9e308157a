//! Closed Catmull-Rom track generation.
//!
//! Pipeline: control points -> distance table -> two-pass uniform
//! resampling -> left/right offset curves -> triangle-strip track mesh.
//! [`TrackGenerator`] owns every stage; the free functions are the stages
//! themselves and work on borrowed data.

mod control;
mod distance;
mod error;
mod follow;
mod generator;
mod mesh;
mod offset;
pub mod presets;
mod resample;
mod sampler;

pub use control::ControlPoints;
pub use distance::DistanceTable;
pub use error::{Result, TrackError};
pub use follow::{CameraMode, CameraRig, FollowPose, TrackFollower};
pub use generator::TrackGenerator;
pub use mesh::{build_track_vertices, plain_vertices, TrackVertex};
pub use offset::{build_offset_curves, OffsetCurves};
pub use resample::{resample_uniform, Resampled};
pub use sampler::{catmull_rom, sample, SamplePoint};
