use crate::config::FollowConfig;
use crate::geom::{Float3, Frame};

use super::error::{Result, TrackError};
use super::generator::TrackGenerator;

/// How the camera frames the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// High overhead view following the player.
    #[default]
    TopDown,
    /// Low view from behind the player.
    Chase,
}

/// Eye, target and up vector for a look-at camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub eye: Float3,
    pub look_at: Float3,
    pub up: Float3,
}

/// Where the follower sits on the track this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FollowPose {
    /// Distance travelled since the start, not wrapped.
    pub distance: f32,
    /// Spline point at `distance`.
    pub centre: Float3,
    /// `centre` shifted sideways by the strafe offset.
    pub position: Float3,
    pub frame: Frame,
    pub lap: u32,
}

/// Moves a player along the track at a constant rate with sideways strafing.
#[derive(Debug, Clone)]
pub struct TrackFollower {
    config: FollowConfig,
    distance: f32,
    strafe: f32,
}

impl TrackFollower {
    /// Fails with `InvalidInput` when `config` does not validate.
    pub fn new(config: FollowConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TrackError::InvalidInput(e.to_string()))?;
        Ok(Self {
            config,
            distance: 0.0,
            strafe: 0.0,
        })
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn strafe_offset(&self) -> f32 {
        self.strafe
    }

    /// Advances along the track by `speed * dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) {
        if dt_ms > 0.0 {
            self.distance += self.config.speed * dt_ms;
        }
    }

    /// Strafes right for positive `direction`, left for negative.
    pub fn strafe(&mut self, direction: f32, dt_ms: f32) {
        let limit = self.config.strafe_limit;
        let step = direction * self.config.strafe_rate * dt_ms;
        self.strafe = (self.strafe + step).clamp(-limit, limit);
    }

    pub fn reset(&mut self) {
        self.distance = 0.0;
        self.strafe = 0.0;
    }

    /// Samples the track at the current distance and one look-ahead step
    /// further to orient the player.
    pub fn pose(&self, track: &TrackGenerator) -> Result<FollowPose> {
        let centre = track.sample(self.distance)?.position;
        let ahead = track.sample(self.distance + self.config.look_ahead)?.position;

        let mut frame = Frame::from_points(centre, ahead, track.world_up());
        if frame.is_degenerate() {
            log::warn!("degenerate follow frame at distance {}", self.distance);
            frame = Frame::DEFAULT;
        }

        // Strafing stays in the ground plane
        let position = Float3::new(
            centre.x + self.strafe * frame.normal.x,
            centre.y,
            centre.z + self.strafe * frame.normal.z,
        );

        Ok(FollowPose {
            distance: self.distance,
            centre,
            position,
            frame,
            lap: track.current_lap(self.distance)?,
        })
    }

    /// Camera placement for `pose`.
    ///
    /// The chase camera sits behind the player along z, on whichever side
    /// the track is heading away from.
    pub fn camera_rig(&self, pose: &FollowPose, mode: CameraMode) -> CameraRig {
        let c = pose.centre;
        let look_at = c + pose.frame.tangent * self.config.look_at_distance;

        let eye = match mode {
            CameraMode::TopDown => Float3::new(c.x, self.config.top_down_height, c.z),
            CameraMode::Chase => {
                let behind = if pose.frame.tangent.z > 0.0 {
                    -self.config.chase_distance
                } else {
                    self.config.chase_distance
                };
                Float3::new(c.x, self.config.chase_height, c.z + behind)
            }
        };

        CameraRig {
            eye,
            look_at,
            up: Float3::UP,
        }
    }
}

impl Default for TrackFollower {
    fn default() -> Self {
        Self {
            config: FollowConfig::default(),
            distance: 0.0,
            strafe: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-3;

    /// Large ring heading -z at the start (counter-clockwise seen from above).
    fn ring_track() -> TrackGenerator {
        let points = (0..24)
            .map(|i| {
                let a = i as f32 / 24.0 * std::f32::consts::TAU;
                Float3::new(300.0 * a.cos(), 1.0, -300.0 * a.sin())
            })
            .collect();
        let mut track = TrackGenerator::new();
        track.configure(points, Vec::new()).unwrap();
        track.build_centreline(240).unwrap();
        track
    }

    #[test]
    fn advance_scales_with_frame_time() {
        let mut f = TrackFollower::default();
        f.advance(16.0);
        assert_relative_eq!(f.distance(), 1.6, epsilon = 1e-6);
        f.advance(-5.0);
        assert_relative_eq!(f.distance(), 1.6, epsilon = 1e-6);
    }

    #[test]
    fn strafe_is_clamped() {
        let mut f = TrackFollower::default();
        f.strafe(1.0, 10_000.0);
        assert_relative_eq!(f.strafe_offset(), 50.0, epsilon = 1e-6);
        f.strafe(-1.0, 100_000.0);
        assert_relative_eq!(f.strafe_offset(), -50.0, epsilon = 1e-6);
    }

    #[test]
    fn invalid_config_rejected() {
        for strafe_limit in [-1.0, f32::NAN] {
            let config = FollowConfig {
                strafe_limit,
                ..FollowConfig::default()
            };
            let err = TrackFollower::new(config).unwrap_err();
            assert!(matches!(err, TrackError::InvalidInput(_)));
        }

        let f = TrackFollower::new(FollowConfig::default()).unwrap();
        assert_eq!(f.config(), &FollowConfig::default());
    }

    #[test]
    fn pose_follows_spline() {
        let track = ring_track();
        let mut f = TrackFollower::default();
        f.advance(1000.0);

        let pose = f.pose(&track).unwrap();
        let expected = track.sample(100.0).unwrap().position;
        assert_relative_eq!(pose.centre.x, expected.x, epsilon = TOLERANCE);
        assert_relative_eq!(pose.centre.z, expected.z, epsilon = TOLERANCE);
        assert_eq!(pose.position, pose.centre);
        assert_eq!(pose.lap, 0);
        assert_relative_eq!(pose.frame.tangent.magnitude(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn strafe_moves_along_frame_normal() {
        let track = ring_track();
        let mut f = TrackFollower::default();
        f.strafe(1.0, 100.0);

        let pose = f.pose(&track).unwrap();
        assert_relative_eq!(pose.position.distance(pose.centre), 10.0, epsilon = TOLERANCE);
        // Heading -z at the start, so strafing right moves towards +x
        assert!(pose.position.x > pose.centre.x);
    }

    #[test]
    fn lap_counts_after_full_loop() {
        let track = ring_track();
        let mut f = TrackFollower::default();
        let total = track.total_length();
        f.advance((total + 5.0) / f.config().speed);
        assert_eq!(f.pose(&track).unwrap().lap, 1);
    }

    #[test]
    fn top_down_camera_hovers_over_player() {
        let track = ring_track();
        let f = TrackFollower::default();
        let pose = f.pose(&track).unwrap();
        let rig = f.camera_rig(&pose, CameraMode::TopDown);
        assert_relative_eq!(rig.eye.y, 300.0, epsilon = TOLERANCE);
        assert_relative_eq!(rig.eye.x, pose.centre.x, epsilon = TOLERANCE);
        assert_relative_eq!(rig.look_at.distance(pose.centre), 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn chase_camera_sits_behind() {
        let track = ring_track();
        let f = TrackFollower::default();
        let pose = f.pose(&track).unwrap();
        assert!(pose.frame.tangent.z < 0.0);

        let rig = f.camera_rig(&pose, CameraMode::Chase);
        assert_relative_eq!(rig.eye.y, 20.0, epsilon = TOLERANCE);
        assert_relative_eq!(rig.eye.z, pose.centre.z + 100.0, epsilon = TOLERANCE);
    }

    #[test]
    fn pose_before_configure_fails() {
        let f = TrackFollower::default();
        assert!(f.pose(&TrackGenerator::new()).is_err());
    }
}
