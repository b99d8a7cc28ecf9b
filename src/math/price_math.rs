//! Conversions between human prices and the engine's integer representations.
//!
//! Floating point is only used on the way in from user input and on the way
//! out for display; nothing inside the engine consumes these results as
//! `f64`.

use crate::error::StateError;
use crate::math::fixed_point::FixedQ64x96;
use crate::math::math_helpers::{f64_to_u256, u256_to_f64};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};
use alloy_primitives::U256;

/// 2^96 as a float; exact.
const Q96_F64: f64 = 79228162514264337593543950336.0;

/// `trunc(sqrt(price) * 2^96)`.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<U256, StateError> {
    if !price.is_finite() || price < 0.0 {
        return Err(StateError::InvalidPrice);
    }
    f64_to_u256(price.sqrt() * Q96_F64).ok_or(StateError::InvalidPrice)
}

/// `(sqrt_price / 2^96)^2`, lossy.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96_F64;
    sqrt_price * sqrt_price
}

/// `floor(log_1.0001(price))`, rejected when it falls outside the tick range.
pub fn price_to_tick(price: f64) -> Result<i32, StateError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(StateError::InvalidPrice);
    }

    let tick = (price.ln() / 1.0001f64.ln()).floor();
    if tick < MIN_TICK as f64 || tick > MAX_TICK as f64 {
        return Err(StateError::TickOutOfBounds);
    }
    Ok(tick as i32)
}

/// Exact sqrt price of a Q64.96 price, no floating point involved.
pub fn sqrt_price_x96_from_price(price: FixedQ64x96) -> U256 {
    price.sqrt().into()
}
