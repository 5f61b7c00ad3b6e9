//! Coordinate mapping between image pyramid levels.
//!
//! Level `0` is the full-resolution image and level `L` is the image
//! downsampled by `2^L` along each axis. Coordinates move between level `0`
//! and level `L` with [`to_level`] and [`from_level`]:
//!
//! * `f64` values are scaled exactly by `2^L`, so a round trip through any
//!   level returns the original value.
//! * `i32` values use bit shifts. Going down a level is an arithmetic right
//!   shift (rounding toward negative infinity), which drops the low `L` bits;
//!   going back up does not restore them. `13` at level `2` becomes `3`, and
//!   `3` brought back to level `0` is `12`. Pipelines built on integer pixel
//!   coordinates rely on this truncation.
//!
//! Vectors are mapped component-wise. Levels are unsigned so negative levels
//! cannot be expressed. Every `u32` level is accepted: at `level >= 32` an
//! `i32` goes down to `0` (or `-1` when negative) and comes back up as `0`,
//! and `f64` scaling saturates once `2^level` leaves the `f64` range.
//!
//! ```rust
//! use nalgebra::Vector2;
//! use vision_tools::pyramid::{from_level, to_level};
//!
//! assert_eq!(to_level(Vector2::new(13.0, -6.0), 2), Vector2::new(3.25, -1.5));
//! assert_eq!(to_level(Vector2::new(13, -6), 2), Vector2::new(3, -2));
//! assert_eq!(from_level(3, 2), 12);
//! ```

use nalgebra::{Scalar, Vector2, Vector3};

/// The linear scale factor `2^level` between level `0` and `level`.
///
/// Saturates to `f64::INFINITY` for levels beyond the `f64` exponent range.
pub fn scale_factor(level: u32) -> f64 {
    2f64.powi(level.min(i32::MAX as u32) as i32)
}

/// A coordinate that can be moved between pyramid levels.
pub trait PyramidCoordinate: Sized {
    /// Maps a level `0` coordinate to `level`.
    fn to_level(self, level: u32) -> Self;

    /// Maps a coordinate at `level` back to level `0`.
    fn from_level(self, level: u32) -> Self;
}

impl PyramidCoordinate for f64 {
    fn to_level(self, level: u32) -> Self {
        self / scale_factor(level)
    }

    fn from_level(self, level: u32) -> Self {
        self * scale_factor(level)
    }
}

impl PyramidCoordinate for i32 {
    /// Arithmetic right shift; shifting out every bit leaves the sign.
    fn to_level(self, level: u32) -> Self {
        self.checked_shr(level).unwrap_or(if self < 0 { -1 } else { 0 })
    }

    /// Left shift; shifting out every bit leaves `0`.
    fn from_level(self, level: u32) -> Self {
        self.checked_shl(level).unwrap_or(0)
    }
}

impl<T: PyramidCoordinate + Scalar> PyramidCoordinate for Vector2<T> {
    fn to_level(self, level: u32) -> Self {
        self.map(|x| x.to_level(level))
    }

    fn from_level(self, level: u32) -> Self {
        self.map(|x| x.from_level(level))
    }
}

impl<T: PyramidCoordinate + Scalar> PyramidCoordinate for Vector3<T> {
    fn to_level(self, level: u32) -> Self {
        self.map(|x| x.to_level(level))
    }

    fn from_level(self, level: u32) -> Self {
        self.map(|x| x.from_level(level))
    }
}

/// Maps a level `0` coordinate to pyramid `level`.
pub fn to_level<T: PyramidCoordinate>(x_zero: T, level: u32) -> T {
    x_zero.to_level(level)
}

/// Maps a coordinate at pyramid `level` back to level `0`.
pub fn from_level<T: PyramidCoordinate>(x_level: T, level: u32) -> T {
    x_level.from_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(0), 1.0);
        assert_eq!(scale_factor(1), 2.0);
        assert_eq!(scale_factor(5), 32.0);
        assert_eq!(scale_factor(40), (1u64 << 40) as f64);
    }

    #[test]
    fn test_double_round_trip_is_exact() {
        for level in 0..12 {
            assert_eq!(to_level(from_level(3.5, level), level), 3.5);
            for x in [0.0, 1.0, -1.0, 3.5, 0.1, -123.456, 1e-300, 6.02e23] {
                assert_eq!(from_level(to_level(x, level), level), x);
                assert_eq!(to_level(from_level(x, level), level), x);
            }
        }
    }

    #[test]
    fn test_double_scaling() {
        assert_eq!(to_level(640.0, 1), 320.0);
        assert_eq!(to_level(13.0, 2), 3.25);
        assert_eq!(from_level(3.25, 2), 13.0);
        assert_eq!(to_level(-5.0, 1), -2.5);
    }

    #[test]
    fn test_integer_round_trip_truncates() {
        assert_eq!(to_level(13, 2), 3);
        assert_eq!(from_level(3, 2), 12);
        assert_ne!(from_level(to_level(13, 2), 2), 13);

        // Exact when the low bits are clear.
        assert_eq!(from_level(to_level(12, 2), 2), 12);
        assert_eq!(from_level(to_level(640, 3), 3), 640);
    }

    #[test]
    fn test_integer_negative_values_round_down() {
        assert_eq!(to_level(-1, 1), -1);
        assert_eq!(to_level(-5, 1), -3);
        assert_eq!(to_level(-13, 2), -4);
        assert_eq!(from_level(-4, 2), -16);
    }

    #[test]
    fn test_integer_levels_past_bit_width() {
        assert_eq!(to_level(-13, 32), -1);
        assert_eq!(to_level(1000, 33), 0);
        assert_eq!(to_level(i32::MAX, 31), 0);
        assert_eq!(to_level(i32::MIN, 31), -1);
        assert_eq!(to_level(0, u32::MAX), 0);
        assert_eq!(to_level(-1, u32::MAX), -1);

        assert_eq!(from_level(1, 31), i32::MIN);
        assert_eq!(from_level(7, 32), 0);
        assert_eq!(from_level(-7, u32::MAX), 0);

        assert_eq!(to_level(Vector2::new(-13, 13), 40), Vector2::new(-1, 0));
    }

    #[test]
    fn test_double_levels_past_exponent_range() {
        assert_eq!(scale_factor(1023), 2f64.powi(1023));
        assert_eq!(scale_factor(1024), f64::INFINITY);
        assert_eq!(scale_factor(1u32 << 31), f64::INFINITY);
        assert_eq!(scale_factor(u32::MAX), f64::INFINITY);

        assert_eq!(to_level(1000.0, 1u32 << 31), 0.0);
        assert_eq!(to_level(1000.0, u32::MAX), 0.0);
        assert_eq!(to_level(-1000.0, 2000), 0.0);
        assert_eq!(from_level(1.0, 1u32 << 31), f64::INFINITY);
    }

    #[test]
    fn test_level_zero_is_identity() {
        assert_eq!(to_level(7.25, 0), 7.25);
        assert_eq!(from_level(7.25, 0), 7.25);
        assert_eq!(to_level(-13, 0), -13);
        assert_eq!(from_level(-13, 0), -13);

        let v2d = Vector2::new(1.5, -2.5);
        let v2i = Vector2::new(13, -7);
        let v3d = Vector3::new(1.5, -2.5, 9.75);
        let v3i = Vector3::new(13, -7, 0);
        assert_eq!(to_level(v2d, 0), v2d);
        assert_eq!(from_level(v2d, 0), v2d);
        assert_eq!(to_level(v2i, 0), v2i);
        assert_eq!(from_level(v2i, 0), v2i);
        assert_eq!(to_level(v3d, 0), v3d);
        assert_eq!(from_level(v3d, 0), v3d);
        assert_eq!(to_level(v3i, 0), v3i);
        assert_eq!(from_level(v3i, 0), v3i);
    }

    #[test]
    fn test_vectors_are_component_wise() {
        assert_eq!(
            to_level(Vector2::new(640.0, 480.0), 2),
            Vector2::new(160.0, 120.0)
        );
        assert_eq!(
            from_level(Vector2::new(160.0, 120.0), 2),
            Vector2::new(640.0, 480.0)
        );
        assert_eq!(to_level(Vector2::new(13, 14), 2), Vector2::new(3, 3));
        assert_eq!(from_level(Vector2::new(3, 3), 2), Vector2::new(12, 12));
        assert_eq!(
            to_level(Vector3::new(8.0, -4.0, 1.0), 3),
            Vector3::new(1.0, -0.5, 0.125)
        );
        assert_eq!(
            from_level(Vector3::new(1, -1, 5), 3),
            Vector3::new(8, -8, 40)
        );
        assert_eq!(to_level(Vector3::new(15, -15, 16), 3), Vector3::new(1, -2, 2));
    }
}
