//! Vector math, tangent frames and shared constants.
//!
//! Zero-dependency core types apart from the `bytemuck`/`serde` derives that
//! let them travel into vertex buffers and configuration files.

mod consts;
mod frame;
mod math;

pub use consts::{
    wrap_distance, DEFAULT_SAMPLE_COUNT, DEFAULT_TEXTURE_REPEAT, DEFAULT_TRACK_WIDTH, EPSILON,
    MAX_SAMPLE_COUNT, WORLD_UP,
};
pub use frame::Frame;
pub use math::{Float2, Float3};
