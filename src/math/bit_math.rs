use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0–255) of the most significant set bit of a bitmap
/// word, or `MathError::ZeroValue` for an empty word.
///
/// The tick bitmap uses this when scanning toward lower ticks.
#[inline]
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    match x.bit_len() {
        0 => Err(MathError::ZeroValue),
        len => Ok((len - 1) as u8),
    }
}

/// Returns the index (0–255) of the least significant set bit of a bitmap
/// word, or `MathError::ZeroValue` for an empty word.
///
/// The tick bitmap uses this when scanning toward higher ticks.
#[inline]
pub fn least_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(x.trailing_zeros() as u8)
}
