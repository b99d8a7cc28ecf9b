use crate::FastMap;
use crate::error::{Error, MathError, StateError};
use crate::math::bit_math::{least_significant_bit, most_significant_bit};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};
use alloy_primitives::U256;

/// Computes the bitmap word index and bit position for a compressed tick.
///
/// The word index is an arithmetic shift, so negative ticks land in
/// negative words: `position(-1) == (-1, 255)`.
#[inline]
pub fn position(tick: i32) -> (i32, u8) {
    (tick >> 8, (tick & 0xFF) as u8)
}

/// Sparse index of initialized ticks, one bit per compressed tick.
///
/// Only non-zero words are stored, so a bitmap whose ticks have all been
/// flipped back compares equal to a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickBitmap {
    words: FastMap<i32, U256>,
}

impl TickBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the word stored at `word_pos`, or zero if absent.
    #[inline]
    pub fn word(&self, word_pos: i32) -> U256 {
        self.words.get(&word_pos).copied().unwrap_or(U256::ZERO)
    }

    /// Non-zero words, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = (i32, U256)> + '_ {
        self.words.iter().map(|(&pos, &word)| (pos, word))
    }

    /// Number of non-zero words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_initialized(&self, tick: i32, tick_spacing: i32) -> Result<bool, Error> {
        let compressed = compress_aligned(tick, tick_spacing)?;
        let (word_pos, bit_pos) = position(compressed);
        Ok(self.word(word_pos).bit(bit_pos as usize))
    }

    /// Toggles the initialized status of `tick`.
    ///
    /// `tick` must lie in `[MIN_TICK, MAX_TICK]` and be a multiple of a
    /// positive `tick_spacing`; the bitmap is left untouched when it is not.
    pub fn flip_tick(&mut self, tick: i32, tick_spacing: i32) -> Result<(), Error> {
        let compressed = compress_aligned(tick, tick_spacing)?;
        let (word_pos, bit_pos) = position(compressed);
        let word = self.word(word_pos) ^ (U256::ONE << bit_pos);

        if word.is_zero() {
            self.words.remove(&word_pos);
        } else {
            self.words.insert(word_pos, word);
        }

        log::trace!("flipped tick {tick} (word {word_pos}, bit {bit_pos})");
        Ok(())
    }

    /// Searches the 256-bit word holding `tick` for the next initialized
    /// tick at or below `tick` (`lte`) or strictly above it (`!lte`).
    ///
    /// Returns the tick found and `true`, or, when the word has no candidate,
    /// the farthest tick the search covered and `false`: the word's lowest
    /// tick for `lte`, one past its highest tick otherwise.
    pub fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        tick_spacing: i32,
        lte: bool,
    ) -> Result<(i32, bool), Error> {
        check_tick(tick, tick_spacing)?;

        let mut compressed = tick / tick_spacing;
        if tick < 0 && tick % tick_spacing != 0 {
            compressed -= 1;
        }

        let (word_pos, bit_pos) = position(compressed);
        let word = self.word(word_pos);

        let (next, initialized) = if lte {
            // bits at or below bit_pos
            let mask = (U256::ONE << bit_pos) - U256::ONE + (U256::ONE << bit_pos);
            let masked = word & mask;

            if masked.is_zero() {
                (compressed - bit_pos as i32, false)
            } else {
                let msb = most_significant_bit(masked)?;
                (compressed - (bit_pos - msb) as i32, true)
            }
        } else {
            // bits strictly above bit_pos
            let mask = if bit_pos == u8::MAX {
                U256::ZERO
            } else {
                U256::MAX << (bit_pos as usize + 1)
            };
            let masked = word & mask;

            if masked.is_zero() {
                (compressed + (u8::MAX - bit_pos) as i32 + 1, false)
            } else {
                let lsb = least_significant_bit(masked)?;
                (compressed + (lsb - bit_pos) as i32, true)
            }
        };

        let next = next.checked_mul(tick_spacing).ok_or(MathError::Overflow)?;
        log::trace!("next tick from {tick} (lte={lte}): {next}, initialized={initialized}");
        Ok((next, initialized))
    }
}

impl From<FastMap<i32, U256>> for TickBitmap {
    /// Hydrates a bitmap from externally stored words, dropping empty ones.
    fn from(mut words: FastMap<i32, U256>) -> Self {
        words.retain(|_, word| !word.is_zero());
        Self { words }
    }
}

fn check_tick(tick: i32, tick_spacing: i32) -> Result<(), StateError> {
    if tick_spacing <= 0 {
        return Err(StateError::InvalidTickSpacing);
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(StateError::TickOutOfBounds);
    }
    Ok(())
}

fn compress_aligned(tick: i32, tick_spacing: i32) -> Result<i32, StateError> {
    check_tick(tick, tick_spacing)?;
    if tick % tick_spacing != 0 {
        return Err(StateError::TickNotAligned);
    }
    Ok(tick / tick_spacing)
}
