use super::math::Float3;

/// Orthonormal tangent frame along the track.
///
/// - `tangent`: direction of travel (T)
/// - `normal`: sideways direction, `T x up` (N); rails are offset along it
/// - `binormal`: local up, `N x T` (B)
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Float3,
    pub normal: Float3,
    pub binormal: Float3,
}

impl Frame {
    pub const fn new(tangent: Float3, normal: Float3, binormal: Float3) -> Self {
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Builds the frame looking from `p` towards `p_next`, seeded with `world_up`.
    ///
    /// Coincident points, or a tangent parallel to `world_up`, yield zero
    /// vectors; check with [`Frame::is_degenerate`].
    pub fn from_points(p: Float3, p_next: Float3, world_up: Float3) -> Self {
        let tangent = (p_next - p).normalize();
        let normal = tangent.cross(world_up).normalize();
        let binormal = normal.cross(tangent).normalize();
        Self::new(tangent, normal, binormal)
    }

    pub fn is_degenerate(&self) -> bool {
        self.tangent == Float3::ZERO || self.normal == Float3::ZERO
    }

    /// Re-orthonormalizes the frame using the Gram-Schmidt process.
    ///
    /// Preserves the tangent exactly, orthogonalizes the normal against it,
    /// then recomputes the binormal.
    pub fn reorthonormalize(self) -> Self {
        let t = self.tangent.normalize();
        let n = (self.normal - t * t.dot(self.normal)).normalize();
        let b = n.cross(t).normalize();
        Self::new(t, n, b)
    }

    pub const DEFAULT: Self = Self::new(Float3::FORWARD, Float3::RIGHT, Float3::UP);
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}
