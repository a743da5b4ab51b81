//! Fixed-point decimal integers.
//!
//! A [`FixedPointInt`] represents `value × 10⁻ᶠ` for a decimal factor
//! `0 ≤ f ≤ 7`. Every coordinate in this crate is carried this way rather
//! than as floating point, so the point-in-polygon predicate in
//! [`crate::geometry`] is exact signed-integer arithmetic with no rounding.

use crate::error::Error;
use crate::F;

/// Reduces a signed 64-bit integer into the scalar field by sign-magnitude,
/// rather than relying on a signed `From` impl: `F::from(magnitude)`, negated
/// when `v` is negative.
pub fn i64_to_field(v: i64) -> F {
    if v >= 0 {
        F::from(v as u64)
    } else {
        -F::from(v.unsigned_abs())
    }
}

/// Maximum decimal factor this crate accepts. At `factor = 7` a latitude of
/// up to 180 degrees fits comfortably in `i64` (180 * 10^7 ≈ 1.8e9), leaving
/// ample headroom for the products formed during ray casting (see
/// `geometry`'s overflow budget).
pub const MAX_FACTOR: u8 = 7;

/// A signed fixed-point integer: `value × 10⁻ᶠᵃᶜᵗᵒʳ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPointInt {
    value: i64,
    factor: u8,
}

impl FixedPointInt {
    /// Builds a fixed-point value from a raw integer magnitude and factor.
    ///
    /// Rejects `factor > `[`MAX_FACTOR`].
    pub fn new(value: i64, factor: u8) -> Result<Self, Error> {
        if factor > MAX_FACTOR {
            return Err(Error::InvalidCoordinateDomain(format!(
                "factor {factor} exceeds maximum {MAX_FACTOR}"
            )));
        }
        Ok(Self { value, factor })
    }

    /// Parses a decimal string (e.g. `"12.34"`, `"-0.5"`, `"7"`) into a
    /// fixed-point value. The factor is inferred from the number of digits
    /// after the decimal point.
    pub fn from_decimal_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let negative = s.starts_with('-');
        let unsigned = s.strip_prefix('-').or_else(|| s.strip_prefix('+')).unwrap_or(s);

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::InvalidCoordinateDomain(format!(
                "empty decimal literal: {s:?}"
            )));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::InvalidCoordinateDomain(format!(
                "non-numeric decimal literal: {s:?}"
            )));
        }

        let factor = frac_part.len();
        if factor > MAX_FACTOR as usize {
            return Err(Error::InvalidCoordinateDomain(format!(
                "decimal literal {s:?} has factor {factor} exceeding maximum {MAX_FACTOR}"
            )));
        }

        let digits = format!("{int_part}{frac_part}");
        let digits = if digits.is_empty() { "0" } else { &digits };
        let magnitude: i64 = digits.parse().map_err(|_| {
            Error::InvalidCoordinateDomain(format!("decimal literal {s:?} overflows i64"))
        })?;

        let value = if negative { -magnitude } else { magnitude };
        Self::new(value, factor as u8)
    }

    /// Raw stored integer magnitude.
    pub fn raw(&self) -> i64 {
        self.value
    }

    /// Decimal factor `f` such that this value equals `raw() × 10⁻ᶠ`.
    pub fn factor(&self) -> u8 {
        self.factor
    }

    /// Rescales this value to `target_factor`, failing if that would require
    /// truncating nonzero digits (this crate never silently loses precision).
    pub fn rescale(&self, target_factor: u8) -> Result<Self, Error> {
        if target_factor == self.factor {
            return Ok(*self);
        }
        if target_factor > self.factor {
            let shift = (target_factor - self.factor) as u32;
            let scale = 10i64.pow(shift);
            let value = self
                .value
                .checked_mul(scale)
                .ok_or_else(|| Error::InvalidCoordinateDomain("rescale overflow".into()))?;
            Self::new(value, target_factor)
        } else {
            let shift = (self.factor - target_factor) as u32;
            let scale = 10i64.pow(shift);
            if self.value % scale != 0 {
                return Err(Error::InvalidCoordinateDomain(
                    "rescale would truncate nonzero digits".into(),
                ));
            }
            Self::new(self.value / scale, target_factor)
        }
    }
}
