//! splinetrack - closed Catmull-Rom race track generation.
//!
//! # Architecture
//!
//! Layered modules with inward-only dependencies:
//!
//! - **geom**: Math primitives (Float3, Float2, Frame) and constants
//! - **config**: Serde-backed track and follower parameters
//! - **track**: Spline sampling, uniform resampling, offset rails, strip mesh, path following
//! - **render**: Backend-agnostic upload/draw of track geometry
//! - **session**: Race state (player, pickups, obstacles, score)
//! - **persistence**: TRKD binary documents
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use splinetrack::{presets, TrackConfig, TrackGenerator};
//!
//! let config = TrackConfig::default();
//! let track = TrackGenerator::from_config(presets::default_circuit(), Vec::new(), &config)?;
//! let pos = track.sample(250.0)?.position;
//! ```
//!
//! For C hosts, link the cdylib and use the `track_*` FFI functions.

pub mod config;
pub mod geom;
pub mod persistence;
pub mod render;
pub mod session;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use config::{ConfigError, FollowConfig, TrackConfig};
pub use geom::{Float2, Float3, Frame};
pub use session::{RaceInput, RaceSession};
pub use track::{presets, Result, SamplePoint, TrackError, TrackGenerator, TrackVertex};
