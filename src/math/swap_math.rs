use crate::error::{Error, MathError, StateError};
use crate::math::liquidity_math::{amount0_delta, amount1_delta};
use crate::math::sqrt_price_math::next_sqrt_price_from_input;
use alloy_primitives::{I256, U256};

/// Executes one bounded swap step within a single liquidity range.
///
/// The price moves from `sqrt_price_current_x96` toward
/// `sqrt_price_target_x96` by swapping in `|amount_remaining|`, stopping at
/// whichever of the target or the fully consumed amount comes first.
///
/// Returns `(sqrt_price_next, amount_in, amount_out)`. `amount_in` is the
/// input token the pool receives (token0 when `zero_for_one`), and
/// `amount_out` is the output token it pays, negated so that it is never
/// positive.
///
/// The step always uses the exact-input price update. A negative
/// `amount_remaining` is treated by magnitude; exact-output orchestration
/// belongs to the caller.
pub fn compute_swap_step(
    sqrt_price_current_x96: U256,
    sqrt_price_target_x96: U256,
    liquidity: u128,
    amount_remaining: i128,
    zero_for_one: bool,
) -> Result<(U256, U256, I256), Error> {
    if liquidity == 0 {
        return Err(StateError::LiquidityIsZero.into());
    }
    if amount_remaining < 0 {
        log::debug!(
            "swap step with negative amount_remaining {amount_remaining}, using its magnitude as input"
        );
    }

    let amount = U256::from(amount_remaining.unsigned_abs());
    let candidate =
        next_sqrt_price_from_input(sqrt_price_current_x96, liquidity, amount, zero_for_one)?;

    // whichever of candidate and target is reached first
    let sqrt_price_next_x96 = if zero_for_one {
        candidate.max(sqrt_price_target_x96)
    } else {
        candidate.min(sqrt_price_target_x96)
    };

    let (amount_in, amount_out) = if zero_for_one {
        (
            amount0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity)?,
            amount1_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity)?,
        )
    } else {
        (
            amount1_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity)?,
            amount0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity)?,
        )
    };

    let amount_out = -I256::try_from(amount_out).map_err(|_| MathError::Overflow)?;

    log::trace!(
        "swap step zero_for_one={zero_for_one} current={sqrt_price_current_x96} \
         target={sqrt_price_target_x96} next={sqrt_price_next_x96} \
         amount_in={amount_in} amount_out={amount_out}"
    );

    Ok((sqrt_price_next_x96, amount_in, amount_out))
}
