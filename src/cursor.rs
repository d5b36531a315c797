//! Sequential bit cursor over a packed word stream.
//!
//! Bits are consumed LSB-first within each 32-bit word. The cursor is a plain
//! value; decoders thread it through their loops by mutable reference.

use crate::WORD_BITS;

/// Mask selecting the low `len` bits of a word (`len` in `0..=32`).
#[inline]
pub fn mask(len: u32) -> u32 {
    if len >= WORD_BITS {
        u32::MAX
    } else {
        (1u32 << len) - 1
    }
}

/// Read position in a word stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    /// Index of the word holding the next unread bit.
    pub word_index: usize,
    /// Offset of the next unread bit inside that word, always `< 32`.
    pub bit_offset: u32,
}

impl BitCursor {
    /// Cursor at the first bit of the stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits left in the current word.
    #[inline]
    pub fn remaining_in_word(&self) -> u32 {
        WORD_BITS - self.bit_offset
    }

    /// Move to the start of the next word, dropping padding.
    #[inline]
    pub fn skip_to_next_word(&mut self) {
        self.word_index += 1;
        self.bit_offset = 0;
    }

    /// Read `len` bits (`0..=32`), possibly spanning a word boundary.
    ///
    /// Words past the end of `words` read as zero.
    pub fn read(&mut self, words: &[u32], len: u32) -> u32 {
        debug_assert!(len <= WORD_BITS);
        let mut value = 0u32;
        let mut filled = 0u32;
        while filled < len {
            let take = self.remaining_in_word().min(len - filled);
            let word = words.get(self.word_index).copied().unwrap_or(0);
            let part = (word >> self.bit_offset) & mask(take);
            value |= part << filled;
            filled += take;
            self.bit_offset += take;
            if self.bit_offset == WORD_BITS {
                self.skip_to_next_word();
            }
        }
        value
    }
}
