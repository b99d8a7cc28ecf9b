use crate::math::math_helpers::{mul_div, narrow, widen};
use crate::{
    Q96, RESOLUTION,
    error::{Error, MathError, StateError},
};
use alloy_primitives::U256;

#[inline]
fn sort(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Amount of token0 spanned by `liquidity` between two sqrt prices,
/// `L·2^96·(b - a) / (a·b)`, truncated. Argument order does not matter.
pub fn amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256, Error> {
    let (lower, upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if lower.is_zero() {
        return Err(StateError::SqrtPriceIsZero.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    Ok(mul_div(numerator1, numerator2, upper)? / lower)
}

/// Amount of token1 spanned by `liquidity` between two sqrt prices,
/// `L·(b - a) / 2^96`, truncated. Argument order does not matter.
pub fn amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256, MathError> {
    let (lower, upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    mul_div(U256::from(liquidity), upper - lower, Q96)
}

/// Applies a signed change to a liquidity total.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

/// Token amounts `(amount0, amount1)` needed to back `liquidity` over
/// `[sqrt_lower, sqrt_upper]` when the pool sits at `sqrt_current`.
///
/// Below the range the position is all token0, at or above it all token1,
/// and inside it the current price splits the range between the two.
pub fn amounts_for_liquidity(
    sqrt_current_x96: U256,
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256), Error> {
    let (lower, upper) = sort(sqrt_lower_x96, sqrt_upper_x96);

    if sqrt_current_x96 < lower {
        Ok((amount0_delta(lower, upper, liquidity)?, U256::ZERO))
    } else if sqrt_current_x96 < upper {
        Ok((
            amount0_delta(sqrt_current_x96, upper, liquidity)?,
            amount1_delta(lower, sqrt_current_x96, liquidity)?,
        ))
    } else {
        Ok((U256::ZERO, amount1_delta(lower, upper, liquidity)?))
    }
}

/// Largest liquidity that `amount0` of token0 can back over a range,
/// `amount0·a·b / 2^96 / (b - a)`, truncated.
pub fn liquidity_for_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<u128, MathError> {
    let (lower, upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower == upper {
        return Err(MathError::DivisionByZero);
    }

    // a 512-bit overflow here already implies a result far above u128
    let product = widen(amount0)
        .checked_mul(widen(lower))
        .and_then(|p| p.checked_mul(widen(upper)))
        .ok_or(MathError::Overflow)?;
    let liquidity = narrow(product / widen(Q96) / widen(upper - lower))?;

    to_u128(liquidity)
}

/// Largest liquidity that `amount1` of token1 can back over a range,
/// `amount1·2^96 / (b - a)`, truncated.
pub fn liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<u128, MathError> {
    let (lower, upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    to_u128(mul_div(amount1, Q96, upper - lower)?)
}

#[inline]
fn to_u128(value: U256) -> Result<u128, MathError> {
    u128::try_from(value).map_err(|_| MathError::Overflow)
}
