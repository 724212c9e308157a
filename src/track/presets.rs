//! Built-in control polygons.

use crate::geom::Float3;

/// The fifteen-waypoint circuit the game ships with.
///
/// A long figure running north, over a small crest around z = -1200, round
/// the far hairpin and back down the west side.
pub fn default_circuit() -> Vec<Float3> {
    [
        [0.0, 1.0, 0.0],
        [250.0, 1.0, -71.0],
        [300.0, 1.0, -200.0],
        [350.0, 1.0, -400.0],
        [0.0, 1.0, -800.0],
        [0.0, 10.0, -1000.0],
        [0.0, 20.0, -1200.0],
        [0.0, 10.0, -1400.0],
        [0.0, 1.0, -1600.0],
        [-250.0, 1.0, -1400.0],
        [-300.0, 1.0, -1200.0],
        [-325.0, 1.0, -1000.0],
        [-350.0, 1.0, -800.0],
        [-300.0, 1.0, -400.0],
        [-350.0, 1.0, -200.0],
    ]
    .into_iter()
    .map(Float3::from)
    .collect()
}

/// Unit square loop in the XZ plane, four units long.
pub fn unit_square() -> Vec<Float3> {
    vec![
        Float3::new(0.0, 0.0, 0.0),
        Float3::new(1.0, 0.0, 0.0),
        Float3::new(1.0, 0.0, 1.0),
        Float3::new(0.0, 0.0, 1.0),
    ]
}

/// The two pickup routes laid around [`default_circuit`].
pub fn pickup_routes() -> [Vec<Float3>; 2] {
    let route = |points: &[[f32; 3]]| -> Vec<Float3> {
        points.iter().copied().map(Float3::from).collect()
    };
    [
        route(&[
            [125.0, 7.0, -20.0],
            [320.0, 7.0, -430.0],
            [0.0, 7.0, -820.0],
            [40.0, 12.0, -1500.0],
            [-320.0, 7.0, -1000.0],
            [-320.0, 7.0, -200.0],
        ]),
        route(&[
            [290.0, 7.0, -240.0],
            [100.0, 7.0, -680.0],
            [0.0, 12.0, -990.0],
            [-150.0, 7.0, -1500.0],
            [-320.0, 7.0, -600.0],
        ]),
    ]
}
