use thiserror::Error;

/// Errors raised by the track generation pipeline.
///
/// Every error is fatal to the call that produced it only: the generator
/// keeps whatever it held before the failing call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("distance {distance} is out of range")]
    OutOfRange { distance: f32 },
    #[error("inconsistent state: {0}")]
    InconsistentState(&'static str),
    #[error("no segment brackets distance {distance}")]
    SegmentNotFound { distance: f32 },
}

pub type Result<T, E = TrackError> = std::result::Result<T, E>;
