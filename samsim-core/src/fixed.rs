//! Fixed-point arithmetic for deterministic effect computation.
//!
//! Every value that feeds a score, cost or probability uses this type.
//! Floats (f32/f64) are banned in rule logic due to platform rounding
//! differences; `from_f32` exists only for the table-parse boundary.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Fixed-point value with scale 10000.
///
/// Represents decimal values as integers: 0.25 → 2500, 1.0 → 10000.
/// All arithmetic stays in the integer domain.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Fixed(pub i64);

impl Fixed {
    /// Scale factor: 10000 = 1.0
    pub const SCALE: i64 = 10_000;

    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(10_000);
    pub const HALF: Fixed = Fixed(5_000);

    /// Create from raw scaled value (e.g. a `samdata::defines` myriad const).
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Fixed(raw)
    }

    /// Raw scaled value.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Create from integer (e.g., 5 → 50_000).
    #[inline]
    pub const fn from_int(v: i64) -> Self {
        Fixed(v * Self::SCALE)
    }

    /// Convert from f32 (table-parse layer only, never in rule logic).
    ///
    /// Uses `.round()` for cross-platform determinism; NaN/Inf collapse
    /// to zero.
    #[inline]
    pub fn from_f32(v: f32) -> Self {
        if !v.is_finite() {
            return Fixed::ZERO;
        }
        let scaled = (v * Self::SCALE as f32).round();
        if scaled >= i64::MAX as f32 {
            return Fixed(i64::MAX);
        }
        if scaled <= i64::MIN as f32 {
            return Fixed(i64::MIN);
        }
        Fixed(scaled as i64)
    }

    /// Lossy conversion for display/logging only.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Whole units, rounded toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i64 {
        self.0.div_euclid(Self::SCALE)
    }

    /// Fixed-point multiply (truncating), with i128 intermediates so large
    /// scores cannot overflow.
    #[inline]
    pub fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i128 * rhs.0 as i128) / Self::SCALE as i128) as i64)
    }

    /// Multiply by a plain integer, saturating at the i64 bounds.
    #[inline]
    pub fn mul_int(self, rhs: i64) -> Fixed {
        let wide = self.0 as i128 * rhs as i128;
        Fixed(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Fixed-point divide (truncating). Division by zero returns zero rather
    /// than poisoning a whole turn computation.
    #[inline]
    pub fn div(self, rhs: Fixed) -> Fixed {
        if rhs.0 == 0 {
            return Fixed::ZERO;
        }
        Fixed(((self.0 as i128 * Self::SCALE as i128) / rhs.0 as i128) as i64)
    }

    /// Ratio of two integers as a Fixed (n / d).
    #[inline]
    pub fn ratio(n: i64, d: i64) -> Fixed {
        Fixed::from_int(n).div(Fixed::from_int(d))
    }

    #[inline]
    pub fn min(self, other: Fixed) -> Fixed {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn max(self, other: Fixed) -> Fixed {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn clamp(self, lo: Fixed, hi: Fixed) -> Fixed {
        self.max(lo).min(hi)
    }

    /// Round down to a whole number of units.
    #[inline]
    pub const fn floor(self) -> Fixed {
        Fixed(self.0.div_euclid(Self::SCALE) * Self::SCALE)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fixed({:.4})", self.to_f32())
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_basic() {
        assert_eq!(Fixed::from_int(3).mul(Fixed::from_int(4)), Fixed::from_int(12));
        assert_eq!(Fixed::ONE.mul(Fixed::HALF), Fixed::HALF);
        assert_eq!(Fixed::from_int(100).mul(Fixed::from_raw(12_000)), Fixed::from_int(120));
    }

    #[test]
    fn test_div_basic() {
        assert_eq!(Fixed::from_int(12).div(Fixed::from_int(4)), Fixed::from_int(3));
        assert_eq!(Fixed::ONE.div(Fixed::from_int(2)), Fixed::HALF);
        assert_eq!(Fixed::ONE.div(Fixed::ZERO), Fixed::ZERO);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Fixed::ratio(1, 2), Fixed::HALF);
        assert_eq!(Fixed::ratio(100, 100), Fixed::ONE);
        assert_eq!(Fixed::ratio(125, 1000), Fixed::from_raw(1_250));
    }

    #[test]
    fn test_floor_and_to_int() {
        assert_eq!(Fixed::from_raw(19_999).floor(), Fixed::ONE);
        assert_eq!(Fixed::from_raw(19_999).to_int(), 1);
        assert_eq!(Fixed::from_raw(-5_000).to_int(), -1);
    }

    #[test]
    fn test_from_f32_guards() {
        assert_eq!(Fixed::from_f32(f32::NAN), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(f32::INFINITY), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(1.2), Fixed::from_raw(12_000));
    }

    #[test]
    fn test_mul_large_values_no_overflow() {
        // A score of a billion times a multiplier must not wrap.
        let big = Fixed::from_int(1_000_000_000);
        assert_eq!(big.mul(Fixed::from_raw(15_000)), Fixed::from_int(1_500_000_000));
    }

    #[test]
    fn test_mul_int_saturates() {
        assert_eq!(Fixed::from_int(3).mul_int(4), Fixed::from_raw(120_000));
        assert_eq!(Fixed::from_raw(i64::MAX).mul_int(2), Fixed::from_raw(i64::MAX));
        assert_eq!(Fixed::from_raw(i64::MIN).mul_int(2), Fixed::from_raw(i64::MIN));
    }

    #[test]
    fn test_clamp() {
        let lo = Fixed::from_raw(500);
        let hi = Fixed::from_raw(9_500);
        assert_eq!(Fixed::ZERO.clamp(lo, hi), lo);
        assert_eq!(Fixed::ONE.clamp(lo, hi), hi);
        assert_eq!(Fixed::HALF.clamp(lo, hi), Fixed::HALF);
    }
}
