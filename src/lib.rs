//! Concentrated-liquidity AMM math engine in pure Rust.
//!
//! This crate exposes the bit-exact arithmetic an external pool calls into:
//! - `math::tick_math` converts ticks to Q64.96 sqrt prices and back.
//! - `math::sqrt_price_math` moves a sqrt price by a token amount.
//! - `math::liquidity_math` computes token amounts for a price range.
//! - `math::swap_math` executes one bounded swap step.
//! - `math::tick_bitmap` indexes initialized ticks, one 256-bit word at a time.
//! - `math::fixed_point` provides the `FixedQ64x96` number type.
//!
//! Looping a swap across many ticks, persisting ticks and positions, and fee
//! accounting are left to the caller.
//!
//! # Examples
//!
//! ## Tick and price conversion
//! ```
//! use clmm_core_math::{math::tick_math, Q96, RESOLUTION};
//!
//! let sqrt_price = tick_math::sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, Q96);
//! assert_eq!(tick_math::tick_at_sqrt_ratio(sqrt_price).unwrap(), 0);
//! assert_eq!(RESOLUTION, 96);
//! ```
//!
//! ## One swap step against the next initialized tick
//! ```
//! use clmm_core_math::math::{
//!     swap_math::compute_swap_step,
//!     tick_bitmap::TickBitmap,
//!     tick_math::sqrt_ratio_at_tick,
//! };
//!
//! let mut bitmap = TickBitmap::default();
//! bitmap.flip_tick(600, 60).unwrap();
//!
//! let current = sqrt_ratio_at_tick(0).unwrap();
//! let (next_tick, initialized) = bitmap
//!     .next_initialized_tick_within_one_word(0, 60, false)
//!     .unwrap();
//! assert_eq!((next_tick, initialized), (600, true));
//!
//! let target = sqrt_ratio_at_tick(next_tick).unwrap();
//! let (next_price, amount_in, amount_out) =
//!     compute_swap_step(current, target, 1_000_000_000_000_000_000, 1_000_000, false).unwrap();
//! assert!(next_price > current && next_price <= target);
//! assert!(amount_in > clmm_core_math::U256::ZERO);
//! assert!(amount_out.is_negative());
//! ```

pub use alloy_primitives::{I256, U256};

pub mod error;
mod hash;
pub mod math;

pub use error::{Error, ErrorKind, MathError, StateError};
pub use hash::FastMap;
pub use math::fixed_point::FixedQ64x96;

/// Largest value representable in 160 bits, the width the wire format of
/// most pools stores sqrt prices in.
const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
