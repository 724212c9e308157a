//! Tunable parameters for track generation and the path follower.
//!
//! Both structs deserialize from JSON with every field optional; missing
//! fields fall back to the values the game ships with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{
    Float3, DEFAULT_SAMPLE_COUNT, DEFAULT_TEXTURE_REPEAT, DEFAULT_TRACK_WIDTH, MAX_SAMPLE_COUNT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub sample_count: usize,
    pub track_width: f32,
    pub world_up: Float3,
    pub texture_repeat_length: f32,
}

impl TrackConfig {
    pub fn half_width(&self) -> f32 {
        self.track_width * 0.5
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid("sample_count must be positive".into()));
        }
        if self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "sample_count {} exceeds {MAX_SAMPLE_COUNT}",
                self.sample_count
            )));
        }
        if !self.track_width.is_finite() || self.track_width < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "track_width {} must be finite and non-negative",
                self.track_width
            )));
        }
        if !self.world_up.is_finite() || self.world_up.normalize() == Float3::ZERO {
            return Err(ConfigError::Invalid("world_up must be a non-zero vector".into()));
        }
        if !(self.texture_repeat_length > 0.0) || !self.texture_repeat_length.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "texture_repeat_length {} must be positive",
                self.texture_repeat_length
            )));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            track_width: DEFAULT_TRACK_WIDTH,
            world_up: Float3::UP,
            texture_repeat_length: DEFAULT_TEXTURE_REPEAT,
        }
    }
}

/// Movement and camera parameters for [`crate::track::TrackFollower`].
///
/// Rates are per millisecond of frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    pub speed: f32,
    pub look_ahead: f32,
    pub strafe_rate: f32,
    pub strafe_limit: f32,
    pub top_down_height: f32,
    pub chase_height: f32,
    pub chase_distance: f32,
    pub look_at_distance: f32,
}

impl FollowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("speed", self.speed),
            ("look_ahead", self.look_ahead),
            ("strafe_rate", self.strafe_rate),
            ("strafe_limit", self.strafe_limit),
            ("look_at_distance", self.look_at_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} must be finite and non-negative"
                )));
            }
        }
        if self.look_ahead == 0.0 {
            return Err(ConfigError::Invalid("look_ahead must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            look_ahead: 1.0,
            strafe_rate: 0.1,
            strafe_limit: DEFAULT_TRACK_WIDTH * 0.5,
            top_down_height: 300.0,
            chase_height: 20.0,
            chase_distance: 100.0,
            look_at_distance: 10.0,
        }
    }
}
