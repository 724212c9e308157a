//! Track-wide constants shared by the generator, follower and session.

use super::math::Float3;

pub const EPSILON: f32 = 1.192_093e-7;

/// World up used to seed offset frames and as the constant mesh normal.
pub const WORLD_UP: Float3 = Float3::UP;

/// Centreline resolution used by the game.
pub const DEFAULT_SAMPLE_COUNT: usize = 600;

/// Upper bound on centreline samples; keeps counts within a u32 on disk.
pub const MAX_SAMPLE_COUNT: usize = 1 << 20;

/// Full road width; each rail sits half of this from the centreline.
pub const DEFAULT_TRACK_WIDTH: f32 = 100.0;

/// Number of strip steps covered by one repeat of the road texture.
pub const DEFAULT_TEXTURE_REPEAT: f32 = 100.0;

/// Folds `distance` into `[0, total)`.
///
/// `total` must be positive. Round-off in the division can land the result a
/// hair outside the range; those cases are pulled back in.
pub fn wrap_distance(distance: f32, total: f32) -> f32 {
    let wrapped = distance - (distance / total).floor() * total;
    if wrapped < 0.0 {
        (wrapped + total).min(next_down(total))
    } else if wrapped >= total {
        0.0
    } else {
        wrapped
    }
}

fn next_down(value: f32) -> f32 {
    f32::from_bits(value.to_bits() - 1)
}
