//! Word-aligned ("non-crossing") layout.
//!
//! A payload never straddles two words: when it does not fit in what is left
//! of the current word, that word is emitted with zero padding and the payload
//! starts the next one. Up to `len - 1` bits per word are wasted, but every
//! payload can be read from a single word.
//!
//! ```text
//! word 0: | p0 | p1 | p2 | pad |
//! word 1: | p3 | p4 | ...      |
//! ```

use crate::cursor::{mask, BitCursor};
use crate::packed::{Layout, Packer};
use crate::WORD_BITS;

/// Packer using the word-aligned layout.
pub type NonCrossing = Packer<WordAligned>;

/// Writer that keeps every payload inside one word.
#[derive(Debug, Default)]
pub struct WordAligned {
    words: Vec<u32>,
    current: u32,
    used: u32,
}

impl Layout for WordAligned {
    const NAME: &'static str = "noncrossing";

    fn put(&mut self, payload: u64, len: u32) {
        debug_assert!(len <= WORD_BITS, "payload of {len} bits cannot fit a word");
        if self.used + len > WORD_BITS {
            self.words.push(self.current);
            self.current = 0;
            self.used = 0;
        }
        self.current |= (payload as u32 & mask(len)) << self.used;
        self.used += len;
    }

    fn finish(mut self) -> Vec<u32> {
        if self.used > 0 {
            self.words.push(self.current);
        }
        self.words
    }

    fn seek(cursor: &mut BitCursor, len: u32) {
        if len > cursor.remaining_in_word() {
            cursor.skip_to_next_word();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packed::BitPacker;

    #[test]
    fn test_payloads_do_not_cross_words() {
        let mut w = WordAligned::default();
        for _ in 0..3 {
            w.put(0x3FF, 10);
        }
        // 30 bits used; the fourth payload goes to a fresh word.
        w.put(0x155, 10);
        assert_eq!(w.finish(), vec![0x3FFF_FFFF, 0x155]);
    }

    #[test]
    fn test_full_width_payloads() {
        let mut w = WordAligned::default();
        w.put(u64::from(u32::MAX), 32);
        w.put(7, 32);
        assert_eq!(w.finish(), vec![u32::MAX, 7]);
    }

    #[test]
    fn test_seek_skips_padding() {
        let mut c = BitCursor { word_index: 0, bit_offset: 30 };
        WordAligned::seek(&mut c, 2);
        assert_eq!(c.bit_offset, 30);
        WordAligned::seek(&mut c, 3);
        assert_eq!(c, BitCursor { word_index: 1, bit_offset: 0 });
    }

    #[test]
    fn test_wide_values_one_per_word() {
        let values: Vec<u32> = (0..10).map(|i| (1 << 30) | i).collect();
        let mut p = NonCrossing::new(false);
        p.compress(&values);
        assert_eq!(p.width(), 31);
        assert_eq!(p.words().len(), 10);
        assert_eq!(p.decompress(), values);
        assert_eq!(p.get(9).unwrap(), values[9]);
    }

    #[test]
    fn test_padding_with_mixed_payload_lengths() {
        // k = 2 with 20 outliers (idx_bits = 5): direct payloads take 3 bits,
        // outliers 6, so padding appears before outliers that do not fit.
        let mut values: Vec<u32> = (0..400).map(|i| i % 4).collect();
        for j in 0..20 {
            values[j * 19 + 5] = 1 << (12 + j % 20);
        }
        let mut p = NonCrossing::new(true);
        p.compress(&values);
        assert_eq!(p.width(), 2);
        assert_eq!(p.idx_bits(), 5);
        assert_eq!(p.decompress(), values);
        for i in (0..values.len()).step_by(7) {
            assert_eq!(p.get(i).unwrap(), values[i]);
        }
    }
}
