use crate::math::math_helpers::mul_div;
use crate::{
    Q96, RESOLUTION, U160_MAX,
    error::{Error, MathError, StateError},
};
use alloy_primitives::U256;

/// Computes the next sqrt price after `amount` of token0 is added to
/// (`add`) or removed from the virtual reserves, truncating the result.
///
/// When `amount * sqrt_price` fits 256 bits the exact form
/// `L·2^96·p / (L·2^96 + amount·p)` is used; otherwise the algebraically
/// equal `L·2^96 / (L·2^96 / p + amount)`, which loses a little precision
/// but cannot overflow.
pub fn next_sqrt_price_from_amount0(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let product = amount.checked_mul(sqrt_price_x96);

    if add {
        if let Some(denominator) = product.and_then(|p| numerator1.checked_add(p)) {
            return Ok(mul_div(numerator1, sqrt_price_x96, denominator)?);
        }

        log::debug!("amount0 product overflows, using the reciprocal form (amount = {amount})");
        let reciprocal = numerator1
            .checked_div(sqrt_price_x96)
            .ok_or(StateError::SqrtPriceIsZero)?;
        let denominator = reciprocal
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        Ok(numerator1 / denominator)
    } else {
        match product {
            Some(product) if product < numerator1 => {
                Ok(mul_div(numerator1, sqrt_price_x96, numerator1 - product)?)
            }
            _ => Err(StateError::InsufficientReserves.into()),
        }
    }
}

/// Computes the next sqrt price after `amount` of token1 is added to
/// (`add`) or removed from the virtual reserves, truncating the result.
pub fn next_sqrt_price_from_amount1(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    if liquidity == 0 {
        return Err(StateError::LiquidityIsZero.into());
    }

    let liquidity = U256::from(liquidity);
    let quotient = if amount <= U160_MAX {
        (amount << RESOLUTION) / liquidity
    } else {
        match mul_div(amount, Q96, liquidity) {
            Ok(quotient) => quotient,
            // a quotient past 256 bits exceeds any price
            Err(MathError::Overflow) if !add => {
                return Err(StateError::InsufficientReserves.into());
            }
            Err(e) => return Err(e.into()),
        }
    };

    if add {
        Ok(sqrt_price_x96
            .checked_add(quotient)
            .ok_or(MathError::Overflow)?)
    } else if quotient >= sqrt_price_x96 {
        Err(StateError::InsufficientReserves.into())
    } else {
        Ok(sqrt_price_x96 - quotient)
    }
}

/// Computes the next sqrt price when `amount_in` is swapped *into* the
/// pool: token0 when `zero_for_one` (price falls), token1 otherwise (price
/// rises).
pub fn next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if sqrt_price_x96.is_zero() {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if liquidity == 0 {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        next_sqrt_price_from_amount0(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Computes the next sqrt price when `amount_out` is taken *out of* the
/// pool: token1 when `zero_for_one`, token0 otherwise.
pub fn next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if sqrt_price_x96.is_zero() {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if liquidity == 0 {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        next_sqrt_price_from_amount1(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0(sqrt_price_x96, liquidity, amount_out, false)
    }
}
