//! Continuous ("crossing") layout.
//!
//! Payloads are appended to a bit accumulator with no padding; every full
//! 32 bits are emitted as a word, so a payload may span two words. The stream
//! is exactly `ceil(total_bits / 32)` words long.

use crate::cursor::BitCursor;
use crate::packed::{Layout, Packer};
use crate::WORD_BITS;

/// Packer using the continuous layout.
pub type Crossing = Packer<Continuous>;

/// Writer that packs payloads back to back.
#[derive(Debug, Default)]
pub struct Continuous {
    words: Vec<u32>,
    acc: u64,
    acc_len: u32,
}

impl Layout for Continuous {
    const NAME: &'static str = "crossing";

    fn put(&mut self, payload: u64, len: u32) {
        // acc_len < 32 on entry, so up to 32 more bits always fit in the accumulator.
        debug_assert!(len <= 2 * WORD_BITS);
        let (low, low_len, high, high_len) = if len > WORD_BITS {
            (payload & u64::from(u32::MAX), WORD_BITS, payload >> WORD_BITS, len - WORD_BITS)
        } else {
            (payload, len, 0, 0)
        };
        self.push(low, low_len);
        self.push(high, high_len);
    }

    fn finish(mut self) -> Vec<u32> {
        if self.acc_len > 0 {
            self.words.push(self.acc as u32);
        }
        self.words
    }

    fn seek(_cursor: &mut BitCursor, _len: u32) {}
}

impl Continuous {
    fn push(&mut self, bits: u64, len: u32) {
        if len == 0 {
            return;
        }
        let bits = bits & ((1u64 << len) - 1);
        self.acc |= bits << self.acc_len;
        self.acc_len += len;
        while self.acc_len >= WORD_BITS {
            self.words.push(self.acc as u32);
            self.acc >>= WORD_BITS;
            self.acc_len -= WORD_BITS;
        }
    }
}
