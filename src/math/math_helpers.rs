use crate::error::MathError;
use alloy_primitives::U256;
use alloy_primitives::aliases::U512;

/// Lifts a `U256` into the 512-bit domain without loss.
#[inline(always)]
pub fn widen(x: U256) -> U512 {
    let [l0, l1, l2, l3] = *x.as_limbs();
    U512::from_limbs([l0, l1, l2, l3, 0, 0, 0, 0])
}

/// Narrows a 512-bit value back to `U256`, failing with
/// `MathError::Overflow` if any of the upper 256 bits are set.
#[inline(always)]
pub fn narrow(x: U512) -> Result<U256, MathError> {
    let limbs = x.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `floor(a * b / denominator)` with a full 512-bit intermediate,
/// returning a `MathError` on overflow or division by zero.
///
/// This is the workhorse behind every Q64.96 product and quotient in the
/// crate: the intermediate never wraps, so the only way to fail is a
/// quotient that does not fit back into 256 bits.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    // fast path: the product already fits
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    narrow((widen(a) * widen(b)) / widen(denominator))
}

/// Integer square root, `floor(sqrt(x))`, over the 512-bit domain.
///
/// Newton's iteration started from a power of two above the root; the
/// sequence decreases monotonically and stops at the floor.
pub fn sqrt_512(x: U512) -> U512 {
    if x.is_zero() {
        return U512::ZERO;
    }

    let bits = 512 - x.leading_zeros();
    let mut z = U512::ONE << bits.div_ceil(2);

    loop {
        let y = (z + x / z) >> 1;
        if y >= z {
            return z;
        }
        z = y;
    }
}

/// Lossy conversion of a `U256` to the nearest representable `f64`.
///
/// Only meant for display and fixture helpers, never for engine math.
pub fn u256_to_f64(x: U256) -> f64 {
    x.as_limbs()
        .iter()
        .rev()
        .fold(0.0_f64, |acc, &limb| acc * 18446744073709551616.0 + limb as f64)
}

/// Exact conversion of a non-negative finite `f64` to `U256`, truncating
/// the fractional part toward zero.
///
/// Returns `None` for negative, non-finite or too large inputs.
pub fn f64_to_u256(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value < 1.0 {
        return Some(U256::ZERO);
    }

    let bits = value.to_bits();
    // value >= 1.0 is always a normal number, so the implicit bit is set
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    if exponent >= 0 {
        if exponent > 256 - 53 {
            return None;
        }
        Some(U256::from(mantissa) << exponent as usize)
    } else {
        Some(U256::from(mantissa >> (-exponent) as u32))
    }
}
