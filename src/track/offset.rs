use crate::geom::{Float3, Frame};

use super::error::{Result, TrackError};

/// Left and right rail curves derived from a centreline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetCurves {
    pub left: Vec<Float3>,
    pub right: Vec<Float3>,
}

impl OffsetCurves {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Rail points interleaved as `left[0], right[0], left[1], right[1], ...`.
    pub fn interleaved(&self) -> Vec<Float3> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .collect()
    }
}

/// Offsets each centreline point sideways by `half_width` on both sides.
///
/// The frame at point `i` looks towards point `i + 1`, so the last point has
/// no pair and both rails come out one shorter than the centreline. A
/// degenerate frame (coincident points, vertical tangent) reuses the previous
/// normal; degenerate frames at the start take the first usable normal, and
/// a centreline with none at all falls back to [`Frame::DEFAULT`].
pub fn build_offset_curves(
    centreline: &[Float3],
    half_width: f32,
    world_up: Float3,
) -> Result<OffsetCurves> {
    if centreline.is_empty() {
        return Err(TrackError::InconsistentState("centreline not built"));
    }
    if !half_width.is_finite() || half_width < 0.0 {
        return Err(TrackError::InvalidInput(format!(
            "half width {half_width} must be finite and non-negative"
        )));
    }

    let normals: Vec<Option<Float3>> = centreline
        .windows(2)
        .map(|pair| {
            let frame = Frame::from_points(pair[0], pair[1], world_up);
            (!frame.is_degenerate()).then_some(frame.normal)
        })
        .collect();
    let mut last_normal = normals
        .iter()
        .flatten()
        .next()
        .copied()
        .unwrap_or(Frame::DEFAULT.normal);

    let mut left = Vec::with_capacity(normals.len());
    let mut right = Vec::with_capacity(normals.len());

    for (i, (&p, normal)) in centreline.iter().zip(&normals).enumerate() {
        let normal = match normal {
            Some(n) => *n,
            None => {
                log::warn!("degenerate offset frame at centreline point {i}");
                last_normal
            }
        };
        last_normal = normal;

        left.push(p - normal * half_width);
        right.push(p + normal * half_width);
    }

    Ok(OffsetCurves { left, right })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn circle(count: usize, radius: f32) -> Vec<Float3> {
        (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * std::f32::consts::TAU;
                Float3::new(radius * a.cos(), 1.0, radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn empty_centreline_is_inconsistent() {
        let err = build_offset_curves(&[], 5.0, Float3::UP).unwrap_err();
        assert_eq!(err, TrackError::InconsistentState("centreline not built"));
    }

    #[test]
    fn negative_width_rejected() {
        let err = build_offset_curves(&circle(8, 10.0), -1.0, Float3::UP).unwrap_err();
        assert!(matches!(err, TrackError::InvalidInput(_)));
    }

    #[test]
    fn output_is_one_shorter_than_centreline() {
        let centreline = circle(64, 100.0);
        let curves = build_offset_curves(&centreline, 10.0, Float3::UP).unwrap();
        assert_eq!(curves.left.len(), centreline.len() - 1);
        assert_eq!(curves.right.len(), centreline.len() - 1);
    }

    #[test]
    fn single_point_yields_no_rails() {
        let curves = build_offset_curves(&[Float3::UP], 10.0, Float3::UP).unwrap();
        assert!(curves.is_empty());
    }

    #[test]
    fn rails_are_equidistant_along_normal() {
        let centreline = circle(64, 100.0);
        let half = 12.5;
        let curves = build_offset_curves(&centreline, half, Float3::UP).unwrap();

        for i in 0..curves.len() {
            let p = centreline[i];
            let l = curves.left[i];
            let r = curves.right[i];
            assert_relative_eq!(p.distance(l), half, epsilon = TOLERANCE);
            assert_relative_eq!(p.distance(r), half, epsilon = TOLERANCE);

            // Displacement is perpendicular to the local tangent and level
            let t = (centreline[i + 1] - p).normalize();
            assert_relative_eq!((r - p).dot(t), 0.0, epsilon = 1e-3);
            assert_relative_eq!(r.y, p.y, epsilon = TOLERANCE);

            // Centreline point sits midway between the rails
            let mid = l.lerp(r, 0.5);
            assert_relative_eq!(mid.x, p.x, epsilon = TOLERANCE);
            assert_relative_eq!(mid.z, p.z, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn right_rail_is_on_the_right() {
        // Heading -z with +y up, right is +x
        let centreline = [Float3::ZERO, Float3::new(0.0, 0.0, -1.0)];
        let curves = build_offset_curves(&centreline, 2.0, Float3::UP).unwrap();
        assert_relative_eq!(curves.right[0].x, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(curves.left[0].x, -2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn degenerate_frame_reuses_previous_normal() {
        let centreline = [
            Float3::ZERO,
            Float3::new(0.0, 0.0, -1.0),
            Float3::new(0.0, 0.0, -1.0),
            Float3::new(0.0, 0.0, -2.0),
        ];
        let curves = build_offset_curves(&centreline, 1.0, Float3::UP).unwrap();
        assert_relative_eq!(curves.right[1].x, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn degenerate_first_frame_takes_first_usable_normal() {
        // Straight up first, then heading -z
        let centreline = [
            Float3::ZERO,
            Float3::new(0.0, 5.0, 0.0),
            Float3::new(0.0, 5.0, -1.0),
        ];
        let curves = build_offset_curves(&centreline, 2.0, Float3::UP).unwrap();

        assert_relative_eq!(centreline[0].distance(curves.left[0]), 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(centreline[0].distance(curves.right[0]), 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(curves.right[0].x, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(curves.left[0].x, -2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn all_degenerate_frames_fall_back_to_default_normal() {
        let centreline = [Float3::ZERO, Float3::ZERO, Float3::new(0.0, 3.0, 0.0)];
        let curves = build_offset_curves(&centreline, 1.5, Float3::UP).unwrap();

        for i in 0..curves.len() {
            let offset = curves.right[i] - centreline[i];
            assert_eq!(offset, Frame::DEFAULT.normal * 1.5);
        }
    }

    #[test]
    fn interleaved_alternates_rails() {
        let curves = OffsetCurves {
            left: vec![Float3::new(-1.0, 0.0, 0.0), Float3::new(-1.0, 0.0, 1.0)],
            right: vec![Float3::new(1.0, 0.0, 0.0), Float3::new(1.0, 0.0, 1.0)],
        };
        let rails = curves.interleaved();
        assert_eq!(rails.len(), 4);
        assert_eq!(rails[0], curves.left[0]);
        assert_eq!(rails[1], curves.right[0]);
        assert_eq!(rails[2], curves.left[1]);
        assert_eq!(rails[3], curves.right[1]);
    }
}
