use crate::error::StateError;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// `sqrt_ratio_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// `sqrt_ratio_at_tick(MAX_TICK)`; exclusive upper bound for prices.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// 2^128, the Q128 representation of 1.
const Q128_ONE: U256 = U256::from_limbs([0, 0, 1, 0]);
/// `1 / sqrt(1.0001)` in Q128, the starting ratio for odd ticks.
const ODD_TICK_RATIO: U256 =
    U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0]);

/// `1 / sqrt(1.0001)^(2^k)` in Q128 for the remaining 19 bits of `|tick|`.
const TICK_RATIO_MULTIPLIERS: [(u32, U256); 19] = [
    (0x2, U256::from_limbs([6459403834229662010, 18444899583751176498, 0, 0])),
    (0x4, U256::from_limbs([17226890335427755468, 18443055278223354162, 0, 0])),
    (0x8, U256::from_limbs([2032852871939366096, 18439367220385604838, 0, 0])),
    (0x10, U256::from_limbs([14545316742740207172, 18431993317065449817, 0, 0])),
    (0x20, U256::from_limbs([5129152022828963008, 18417254355718160513, 0, 0])),
    (0x40, U256::from_limbs([4894419605888772193, 18387811781193591352, 0, 0])),
    (0x80, U256::from_limbs([1280255884321894483, 18329067761203520168, 0, 0])),
    (0x100, U256::from_limbs([15924666964335305636, 18212142134806087854, 0, 0])),
    (0x200, U256::from_limbs([8010504389359918676, 17980523815641551639, 0, 0])),
    (0x400, U256::from_limbs([10668036004952895731, 17526086738831147013, 0, 0])),
    (0x800, U256::from_limbs([4878133418470705625, 16651378430235024244, 0, 0])),
    (0x1000, U256::from_limbs([9537173718739605541, 15030750278693429944, 0, 0])),
    (0x2000, U256::from_limbs([9972618978014552549, 12247334978882834399, 0, 0])),
    (0x4000, U256::from_limbs([10428997489610666743, 8131365268884726200, 0, 0])),
    (0x8000, U256::from_limbs([9305304367709015974, 3584323654723342297, 0, 0])),
    (0x10000, U256::from_limbs([14301143598189091785, 696457651847595233, 0, 0])),
    (0x20000, U256::from_limbs([7393154844743099908, 26294789957452057, 0, 0])),
    (0x40000, U256::from_limbs([2209338891292245656, 37481735321082, 0, 0])),
    (0x80000, U256::from_limbs([10518117631919034274, 76158723, 0, 0])),
];

const LOW_32_BITS: U256 = U256::from_limbs([u32::MAX as u64, 0, 0, 0]);

/// `log_sqrt(1.0001)(2) * 2^64`, turns a Q64.64 log2 into a Q128.128 tick.
const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
/// Error bounds of the log approximation, in Q128.128 ticks.
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));
const I256_128: I256 = I256::from_raw(U256::from_limbs([128, 0, 0, 0]));

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index, or
/// `StateError::TickOutOfBounds` if the tick is outside
/// `[MIN_TICK, MAX_TICK]`.
///
/// The ratio is built from a fixed table of Q128 constants, one per bit of
/// `|tick|`, so the result is bit-exact and never touches floating point.
pub fn sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds);
    }

    let mut ratio = if abs_tick & 0x1 != 0 {
        ODD_TICK_RATIO
    } else {
        Q128_ONE
    };

    for (bit, multiplier) in TICK_RATIO_MULTIPLIERS {
        if abs_tick & bit != 0 {
            // both factors are below 2^128, the product cannot wrap
            ratio = ratio.wrapping_mul(multiplier) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the tick lookup below stays consistent
    let round_up = !(ratio & LOW_32_BITS).is_zero();
    Ok((ratio >> 32) + U256::from(round_up as u8))
}

/// Computes the greatest tick whose sqrt price is less than or equal to
/// `sqrt_price_x96`.
///
/// A fixed-point binary logarithm narrows the answer down to two candidate
/// ticks; the choice between them is an exact comparison against
/// [`sqrt_ratio_at_tick`].
pub fn tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, StateError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    // Q128.128 ratio, non-zero after the bounds check
    let ratio: U256 = sqrt_price_x96 << 32usize;
    let msb = 255 - ratio.leading_zeros();

    // normalise into [2^127, 2^128)
    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    // integer part of log2(ratio) in Q64.64
    let mut log_2: I256 = (I256::from_raw(U256::from(msb)) - I256_128) << 64;

    // 14 fractional bits by repeated squaring
    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> 127;
        if r.bit(128) {
            log_2 |= I256::from_raw(U256::ONE << shift);
            r >>= 1;
        }
    }

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = ((log_sqrt10001 - TICK_LOW) >> 128usize).low_i32();
    let tick_high = ((log_sqrt10001 + TICK_HIGH) >> 128usize).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}

#[cfg(test)]
mod test {
    use super::*;

    use std::{ops::Sub, str::FromStr};

    #[test]
    fn test_sqrt_ratio_at_tick_bounds() {
        assert!(matches!(
            sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(StateError::TickOutOfBounds)
        ));
        assert!(matches!(
            sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(StateError::TickOutOfBounds)
        ));
        assert!(matches!(
            sqrt_ratio_at_tick(i32::MIN),
            Err(StateError::TickOutOfBounds)
        ));
    }

    #[test]
    fn test_sqrt_ratio_at_tick_boundaries_are_exact() {
        assert_eq!(sqrt_ratio_at_tick(MIN_TICK).unwrap(), MIN_SQRT_RATIO);
        assert_eq!(
            sqrt_ratio_at_tick(MIN_TICK).unwrap(),
            U256::from(4295128739u64)
        );
        assert_eq!(sqrt_ratio_at_tick(MAX_TICK).unwrap(), MAX_SQRT_RATIO);
        assert_eq!(
            sqrt_ratio_at_tick(MAX_TICK).unwrap(),
            U256::from_str("1461446703485210103287273052203988822378723970342").unwrap()
        );
    }

    #[test]
    fn test_sqrt_ratio_at_tick_values() {
        let cases: [(i32, &str); 16] = [
            (MIN_TICK + 1, "4295343490"),
            (
                MAX_TICK - 1,
                "1461373636630004318706518188784493106690254656249",
            ),
            (0, "79228162514264337593543950336"),
            (-100, "78833030112140176575862854579"),
            (50, "79426470787362580746886972461"),
            (100, "79625275426524748796330556128"),
            (250, "80224679980005306637834519095"),
            (500, "81233731461783161732293370115"),
            (1000, "83290069058676223003182343270"),
            (2500, "89776708723587163891445672585"),
            (10000, "130621891405341611593710811006"),
            (50000, "965075977353221155028623082916"),
            (-50000, "6504256538020985011912221507"),
            (150000, "143194173941309278083010301478497"),
            (500000, "5697689776495288729098254600827762987878"),
            (738203, "847134979253254120489401328389043031315994541"),
        ];

        for (tick, expected) in cases {
            assert_eq!(
                sqrt_ratio_at_tick(tick).unwrap(),
                U256::from_str(expected).unwrap(),
                "sqrt ratio at {tick} incorrect"
            );
        }
    }

    #[test]
    fn test_tick_at_sqrt_ratio_bounds() {
        assert!(matches!(
            tick_at_sqrt_ratio(MIN_SQRT_RATIO.sub(U256::ONE)),
            Err(StateError::SqrtPriceOutOfBounds)
        ));
        assert!(matches!(
            tick_at_sqrt_ratio(MAX_SQRT_RATIO),
            Err(StateError::SqrtPriceOutOfBounds)
        ));
    }

    #[test]
    fn test_tick_at_sqrt_ratio_values() {
        assert_eq!(tick_at_sqrt_ratio(MIN_SQRT_RATIO).unwrap(), MIN_TICK);
        assert_eq!(
            tick_at_sqrt_ratio(U256::from_str("4295343490").unwrap()).unwrap(),
            MIN_TICK + 1
        );
        assert_eq!(
            tick_at_sqrt_ratio(MAX_SQRT_RATIO - U256::ONE).unwrap(),
            MAX_TICK - 1
        );
        assert_eq!(tick_at_sqrt_ratio(crate::Q96).unwrap(), 0);
    }

    #[test]
    fn test_tick_at_sqrt_ratio_picks_greatest_tick_below() {
        // sqrt(2000) * 2^96 sits between ticks 76012 and 76013
        let sqrt_price = U256::from_str("3543191142285914378072636784640").unwrap();
        assert_eq!(tick_at_sqrt_ratio(sqrt_price).unwrap(), 76012);

        let at_tick = sqrt_ratio_at_tick(76013).unwrap();
        assert_eq!(tick_at_sqrt_ratio(at_tick).unwrap(), 76013);
        assert_eq!(tick_at_sqrt_ratio(at_tick - U256::ONE).unwrap(), 76012);
    }

    #[test]
    fn test_roundtrip_selected_ticks() {
        for tick in [
            MIN_TICK, -100000, -10000, -100, -1, 0, 1, 100, 10000, 100000, MAX_TICK - 1,
        ] {
            let sqrt_price = sqrt_ratio_at_tick(tick).unwrap();
            assert_eq!(tick_at_sqrt_ratio(sqrt_price).unwrap(), tick);
        }
    }
}
