//! Race state: the track, the player following it, pickups and score.
//!
//! `RaceSession` owns every subsystem by value; the host loop calls
//! [`RaceSession::update`] once per frame and reads the camera back.

use crate::config::FollowConfig;
use crate::geom::Float3;
use crate::track::{
    CameraMode, CameraRig, FollowPose, Result, TrackError, TrackFollower, TrackGenerator,
};

/// Horizontal distance within which a pickup or obstacle is touched.
pub const DEFAULT_CONTACT_RADIUS: f32 = 5.0;

/// Pickups collected in order; after the last one the route starts over.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupRoute {
    points: Vec<Float3>,
    current: usize,
}

impl PickupRoute {
    pub fn new(points: Vec<Float3>) -> Self {
        Self { points, current: 0 }
    }

    /// The pickup currently on display.
    pub fn active(&self) -> Option<Float3> {
        self.points.get(self.current).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    fn collect(&mut self) {
        if !self.points.is_empty() {
            self.current = (self.current + 1) % self.points.len();
        }
    }
}

/// Per-frame player input.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RaceInput {
    /// -1 strafes left, 1 strafes right, 0 holds the line.
    pub strafe: f32,
}

/// What happened during one update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RaceFrame {
    pub pose: FollowPose,
    pub collected: u32,
    pub obstacles_hit: u32,
}

#[derive(Debug, Clone)]
pub struct RaceSession {
    track: TrackGenerator,
    follower: TrackFollower,
    routes: Vec<PickupRoute>,
    obstacles: Vec<Float3>,
    touching: Vec<bool>,
    contact_radius: f32,
    camera_mode: CameraMode,
    score: u32,
    last_pose: Option<FollowPose>,
}

impl RaceSession {
    /// Starts a race on a fully built track.
    pub fn new(track: TrackGenerator, follow: FollowConfig) -> Result<Self> {
        if track.track_vertices().is_empty() {
            return Err(TrackError::InconsistentState("track mesh not built"));
        }
        let follower = TrackFollower::new(follow)?;

        Ok(Self {
            track,
            follower,
            routes: Vec::new(),
            obstacles: Vec::new(),
            touching: Vec::new(),
            contact_radius: DEFAULT_CONTACT_RADIUS,
            camera_mode: CameraMode::default(),
            score: 0,
            last_pose: None,
        })
    }

    pub fn with_contact_radius(mut self, radius: f32) -> Self {
        self.contact_radius = radius;
        self
    }

    pub fn add_route(&mut self, points: Vec<Float3>) {
        self.routes.push(PickupRoute::new(points));
    }

    /// Places an obstacle at every `stride`-th rail pair, starting on the
    /// left rail and alternating sides.
    pub fn place_obstacles_on_rails(&mut self, stride: usize) {
        if stride == 0 {
            return;
        }
        // Interleaved as left, right per pair
        let rails = self.track.track_rail_points();
        self.obstacles = (0..rails.len() / 2)
            .step_by(stride)
            .enumerate()
            .map(|(k, pair)| rails[2 * pair + k % 2])
            .collect();
        self.touching = vec![false; self.obstacles.len()];
        log::debug!("placed {} obstacles", self.obstacles.len());
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
    }

    pub fn track(&self) -> &TrackGenerator {
        &self.track
    }

    pub fn routes(&self) -> &[PickupRoute] {
        &self.routes
    }

    pub fn obstacles(&self) -> &[Float3] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn follower(&self) -> &TrackFollower {
        &self.follower
    }

    /// Advances the player by `dt_ms`, then scores pickups and obstacles.
    ///
    /// A pickup scores one point. An obstacle costs one point when the
    /// player first touches it, not on every frame of contact.
    pub fn update(&mut self, dt_ms: f32, input: RaceInput) -> Result<RaceFrame> {
        self.follower.advance(dt_ms);
        if input.strafe != 0.0 {
            self.follower.strafe(input.strafe.clamp(-1.0, 1.0), dt_ms);
        }
        let pose = self.follower.pose(&self.track)?;
        let player = pose.position;

        let mut collected = 0;
        for route in &mut self.routes {
            if let Some(pickup) = route.active() {
                if pickup.horizontal_distance(player) <= self.contact_radius {
                    route.collect();
                    collected += 1;
                }
            }
        }

        let mut obstacles_hit = 0;
        for (obstacle, touching) in self.obstacles.iter().zip(&mut self.touching) {
            let inside = obstacle.horizontal_distance(player) <= self.contact_radius;
            if inside && !*touching {
                obstacles_hit += 1;
            }
            *touching = inside;
        }

        self.score = (self.score + collected).saturating_sub(obstacles_hit);
        if collected > 0 || obstacles_hit > 0 {
            log::debug!(
                "score {} (+{collected} pickups, -{obstacles_hit} obstacles)",
                self.score
            );
        }

        self.last_pose = Some(pose);
        Ok(RaceFrame {
            pose,
            collected,
            obstacles_hit,
        })
    }

    /// Camera for the most recent update, if any.
    pub fn camera(&self) -> Option<CameraRig> {
        self.last_pose
            .as_ref()
            .map(|pose| self.follower.camera_rig(pose, self.camera_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackConfig;

    fn ring_track() -> TrackGenerator {
        let points = (0..24)
            .map(|i| {
                let a = i as f32 / 24.0 * std::f32::consts::TAU;
                Float3::new(300.0 * a.cos(), 1.0, -300.0 * a.sin())
            })
            .collect();
        let config = TrackConfig {
            sample_count: 240,
            track_width: 40.0,
            ..TrackConfig::default()
        };
        TrackGenerator::from_config(points, Vec::new(), &config).unwrap()
    }

    #[test]
    fn unbuilt_track_rejected() {
        let err = RaceSession::new(TrackGenerator::new(), FollowConfig::default()).unwrap_err();
        assert!(matches!(err, TrackError::InconsistentState(_)));
    }

    #[test]
    fn pickups_on_the_line_are_collected_in_order() {
        let track = ring_track();
        let first = track.sample(20.0).unwrap().position;
        let second = track.sample(60.0).unwrap().position;

        let mut session = RaceSession::new(track, FollowConfig::default()).unwrap();
        session.add_route(vec![first, second]);

        // 10ms steps move 1 unit each
        let mut total = 0;
        for _ in 0..70 {
            total += session.update(10.0, RaceInput::default()).unwrap().collected;
        }
        assert_eq!(total, 2);
        assert_eq!(session.score(), 2);
        // Route wrapped back to the first pickup
        assert_eq!(session.routes()[0].current_index(), 0);
    }

    #[test]
    fn obstacle_costs_one_point_per_contact() {
        let track = ring_track();
        let pickup = track.sample(10.0).unwrap().position;
        let obstacle = track.sample(30.0).unwrap().position;

        let mut session = RaceSession::new(track, FollowConfig::default()).unwrap();
        session.add_route(vec![pickup]);
        session.obstacles = vec![obstacle];
        session.touching = vec![false];

        let mut hits = 0;
        for _ in 0..28 {
            hits += session.update(10.0, RaceInput::default()).unwrap().obstacles_hit;
        }
        assert_eq!(hits, 1);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn strafing_steers_around_pickup() {
        let track = ring_track();
        let pickup = track.sample(40.0).unwrap().position;
        let mut session = RaceSession::new(track, FollowConfig::default()).unwrap();
        session.add_route(vec![pickup]);

        let steer = RaceInput { strafe: 1.0 };
        for _ in 0..45 {
            session.update(10.0, steer).unwrap();
        }
        assert_eq!(session.score(), 0);
        assert!(session.follower().strafe_offset() > DEFAULT_CONTACT_RADIUS);
    }

    #[test]
    fn obstacles_alternate_rails() {
        let mut session = RaceSession::new(ring_track(), FollowConfig::default()).unwrap();
        session.place_obstacles_on_rails(20);
        let left = session.track().left_offset_points();
        let right = session.track().right_offset_points();

        assert_eq!(session.obstacles().len(), left.len().div_ceil(20));
        for (k, obstacle) in session.obstacles().iter().enumerate() {
            let side = if k % 2 == 0 { left } else { right };
            assert_eq!(*obstacle, side[k * 20]);
        }
    }

    #[test]
    fn camera_available_after_update() {
        let mut session = RaceSession::new(ring_track(), FollowConfig::default()).unwrap();
        assert!(session.camera().is_none());
        session.update(16.0, RaceInput::default()).unwrap();
        session.set_camera_mode(CameraMode::Chase);
        let rig = session.camera().unwrap();
        assert_eq!(rig.eye.y, 20.0);
    }
}
