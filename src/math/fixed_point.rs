//! Q64.96 fixed-point numbers.
//!
//! A `FixedQ64x96` stores `x * 2^96` in a `U256`. Every operation that can
//! lose range returns a `MathError` instead of wrapping; every operation
//! that loses precision truncates toward zero.

use crate::error::MathError;
use crate::math::math_helpers::{mul_div, narrow, sqrt_512, u256_to_f64, widen};
use crate::{Q96, RESOLUTION};
use alloy_primitives::U256;
use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedQ64x96 {
    value: U256,
}

impl FixedQ64x96 {
    pub const ZERO: Self = Self { value: U256::ZERO };
    pub const ONE: Self = Self { value: Q96 };

    /// Wraps a raw, already scaled magnitude.
    #[inline]
    pub const fn new(value: U256) -> Self {
        Self { value }
    }

    /// Scales an integer into Q64.96, failing if it needs more than the
    /// 160 integer bits available.
    pub fn new_unscaled(value: U256) -> Result<Self, MathError> {
        if value.leading_zeros() < RESOLUTION as usize {
            return Err(MathError::Overflow);
        }
        Ok(Self {
            value: value << RESOLUTION,
        })
    }

    #[inline]
    pub const fn value(self) -> U256 {
        self.value
    }

    /// Integer part, `floor(x)`.
    #[inline]
    pub fn integer_part(self) -> U256 {
        self.value >> RESOLUTION
    }

    pub fn try_add(self, rhs: Self) -> Result<Self, MathError> {
        self.value
            .checked_add(rhs.value)
            .map(Self::new)
            .ok_or(MathError::Overflow)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, MathError> {
        self.value
            .checked_sub(rhs.value)
            .map(Self::new)
            .ok_or(MathError::Underflow)
    }

    /// `floor(a * b / 2^96)`.
    pub fn try_mul(self, rhs: Self) -> Result<Self, MathError> {
        mul_div(self.value, rhs.value, Q96).map(Self::new)
    }

    /// `floor(a * 2^96 / b)`.
    pub fn try_div(self, rhs: Self) -> Result<Self, MathError> {
        mul_div(self.value, Q96, rhs.value).map(Self::new)
    }

    /// Q64.96 square root: `floor(sqrt(a * 2^96))`.
    ///
    /// The root of a 352-bit radicand always fits 176 bits, so this cannot
    /// fail.
    pub fn sqrt(self) -> Self {
        let radicand = widen(self.value) << RESOLUTION as usize;
        let root = sqrt_512(radicand);
        // sqrt(2^352) = 2^176
        Self::new(narrow(root).unwrap_or(U256::MAX))
    }

    /// Lossy conversion for display and diagnostics.
    pub fn to_f64(self) -> f64 {
        u256_to_f64(self.value) / u256_to_f64(Q96)
    }
}

impl From<FixedQ64x96> for U256 {
    fn from(value: FixedQ64x96) -> Self {
        value.value
    }
}

impl fmt::Display for FixedQ64x96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
