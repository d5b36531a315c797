//! Shared codec contract and compressed state.
//!
//! Every element becomes one payload:
//!
//! ```text
//! no overflow in use   |  value (k bits)              |
//! direct element       |0| value (k bits)             |
//! outlier              |1| table index (idx_bits)     |
//! ```
//!
//! Payloads are written LSB-first, tag bit lowest. Outliers keep their full
//! 32-bit value in a side table, referenced by their rank among the outlier
//! positions. How payloads land in words is the job of a [`Layout`].

use std::marker::PhantomData;

use crate::cursor::{mask, BitCursor};
use crate::error::{Error, Result};
use crate::width::{self, Selection};
use crate::WORD_BITS;

/// Common interface of the bit-packing codecs.
pub trait BitPacker {
    /// Rebuild the compressed state from `values`, discarding any previous state.
    fn compress(&mut self, values: &[u32]);

    /// Decode every element in original order.
    fn decompress(&self) -> Vec<u32>;

    /// Decode the element at `index`.
    ///
    /// Payloads are variable-length, so this replays the stream up to `index`.
    fn get(&self, index: usize) -> Result<u32>;

    /// Compressed size: packed words plus overflow table, 32 bits each.
    fn size_bits(&self) -> usize;

    /// Number of encoded elements.
    fn len(&self) -> usize;

    /// Return true if no elements are encoded.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Physical placement of payloads into 32-bit words.
///
/// A layout is both the writer used by `compress` and the framing rule the
/// decoder mirrors.
pub trait Layout: Default {
    /// Canonical name of the layout.
    const NAME: &'static str;

    /// Append one payload of `len` bits (`1..=33`).
    fn put(&mut self, payload: u64, len: u32);

    /// Flush any partially filled word and return the stream.
    fn finish(self) -> Vec<u32>;

    /// Position `cursor` at the start of the next payload of `len` bits.
    fn seek(cursor: &mut BitCursor, len: u32);
}

/// A bit-packed integer sequence with an overflow table.
pub struct Packer<L> {
    words: Vec<u32>,
    n: usize,
    k: u32,
    idx_bits: u32,
    overflow_positions: Vec<usize>,
    overflow_values: Vec<u32>,
    choose_overflow: bool,
    _layout: PhantomData<L>,
}

impl<L: Layout> std::fmt::Debug for Packer<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packer")
            .field("layout", &L::NAME)
            .field("n", &self.n)
            .field("k", &self.k)
            .field("idx_bits", &self.idx_bits)
            .field("words", &self.words.len())
            .field("overflow", &self.overflow_values.len())
            .finish()
    }
}

impl<L> Clone for Packer<L> {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            n: self.n,
            k: self.k,
            idx_bits: self.idx_bits,
            overflow_positions: self.overflow_positions.clone(),
            overflow_values: self.overflow_values.clone(),
            choose_overflow: self.choose_overflow,
            _layout: PhantomData,
        }
    }
}

impl<L: Layout> Default for Packer<L> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<L: Layout> Packer<L> {
    /// Create an empty packer. `choose_overflow` enables the exception table.
    pub fn new(choose_overflow: bool) -> Self {
        Self {
            words: Vec::new(),
            n: 0,
            k: 0,
            idx_bits: 0,
            overflow_positions: Vec::new(),
            overflow_values: Vec::new(),
            choose_overflow,
            _layout: PhantomData,
        }
    }

    /// Canonical name of this packer's layout.
    pub fn name(&self) -> &'static str {
        L::NAME
    }

    /// Whether width selection may route outliers to the overflow table.
    pub fn choose_overflow(&self) -> bool {
        self.choose_overflow
    }

    /// Direct width `k` chosen by the last `compress` (0 when empty).
    pub fn width(&self) -> u32 {
        self.k
    }

    /// Width of an overflow-table index.
    pub fn idx_bits(&self) -> u32 {
        self.idx_bits
    }

    /// Return true if any element is stored out of line.
    pub fn uses_overflow(&self) -> bool {
        !self.overflow_positions.is_empty()
    }

    /// The packed word stream.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Ascending original indices of the outliers.
    pub fn overflow_positions(&self) -> &[usize] {
        &self.overflow_positions
    }

    /// Verbatim outlier values, parallel to [`Self::overflow_positions`].
    pub fn overflow_values(&self) -> &[u32] {
        &self.overflow_values
    }

    fn direct_len(&self) -> u32 {
        u32::from(self.uses_overflow()) + self.k
    }

    fn overflow_len(&self) -> u32 {
        1 + self.idx_bits
    }

    fn encode(&mut self, values: &[u32], sel: Selection) {
        let Selection {
            width: k,
            idx_bits,
            overflow_positions,
            ..
        } = sel;
        self.n = values.len();
        self.k = k;
        self.idx_bits = idx_bits;
        self.overflow_values = overflow_positions.iter().map(|&i| values[i]).collect();
        self.overflow_positions = overflow_positions;

        let mut layout = L::default();
        let mut next = 0usize;
        for (i, &v) in values.iter().enumerate() {
            if self.overflow_positions.get(next) == Some(&i) {
                let payload = 1 | ((next as u64) << 1);
                layout.put(payload, self.overflow_len());
                next += 1;
            } else if self.uses_overflow() {
                layout.put(u64::from(v & mask(k)) << 1, self.direct_len());
            } else {
                layout.put(u64::from(v & mask(k)), self.direct_len());
            }
        }
        self.words = layout.finish();
    }

    /// Decode the element at `position`, advancing `cursor` past it.
    ///
    /// `next_overflow` tracks how many outliers precede `position`; it lets the
    /// decoder know the payload length before reading it, which word-aligned
    /// layouts need to find the payload start.
    fn decode_next(&self, cursor: &mut BitCursor, position: usize, next_overflow: &mut usize) -> u32 {
        let is_overflow = self.overflow_positions.get(*next_overflow) == Some(&position);
        if is_overflow {
            *next_overflow += 1;
            L::seek(cursor, self.overflow_len());
        } else {
            L::seek(cursor, self.direct_len());
        }

        if !self.uses_overflow() || cursor.read(&self.words, 1) == 0 {
            return cursor.read(&self.words, self.k);
        }

        let idx = if self.idx_bits > 0 {
            cursor.read(&self.words, self.idx_bits) as usize
        } else {
            0
        };
        match self.overflow_values.len() {
            0 => {
                tracing::warn!(position, "overflow tag with empty overflow table, decoding as 0");
                0
            }
            len => self.overflow_values[idx.min(len - 1)],
        }
    }
}

impl<L: Layout> BitPacker for Packer<L> {
    fn compress(&mut self, values: &[u32]) {
        let sel = width::select(values, self.choose_overflow);
        self.encode(values, sel);
        tracing::debug!(
            layout = L::NAME,
            n = self.n,
            k = self.k,
            idx_bits = self.idx_bits,
            overflow = self.overflow_values.len(),
            words = self.words.len(),
            "compressed"
        );
    }

    fn decompress(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.n);
        let mut cursor = BitCursor::new();
        let mut next_overflow = 0usize;
        for i in 0..self.n {
            out.push(self.decode_next(&mut cursor, i, &mut next_overflow));
        }
        out
    }

    fn get(&self, index: usize) -> Result<u32> {
        if index >= self.n {
            return Err(Error::IndexOutOfBounds(index));
        }
        let mut cursor = BitCursor::new();
        let mut next_overflow = 0usize;
        let mut value = 0;
        for i in 0..=index {
            value = self.decode_next(&mut cursor, i, &mut next_overflow);
        }
        Ok(value)
    }

    fn size_bits(&self) -> usize {
        (self.words.len() + self.overflow_values.len()) * WORD_BITS as usize
    }

    fn len(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossing::Crossing;
    use crate::noncrossing::NonCrossing;

    fn roundtrip<P: BitPacker>(p: &mut P, values: &[u32]) {
        p.compress(values);
        assert_eq!(p.decompress(), values);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(p.get(i).unwrap(), v);
        }
    }

    #[test]
    fn test_uncompressed_state_is_empty() {
        let p = NonCrossing::new(true);
        assert!(p.is_empty());
        assert_eq!(p.decompress(), Vec::<u32>::new());
        assert_eq!(p.size_bits(), 0);
        assert_eq!(p.get(0), Err(Error::IndexOutOfBounds(0)));
    }

    #[test]
    fn test_compress_replaces_previous_state() {
        let mut p = Crossing::new(true);
        let mut values = vec![3u32; 50];
        values.push(u32::MAX);
        p.compress(&values);
        assert!(p.uses_overflow());

        p.compress(&[1, 0, 1]);
        assert!(!p.uses_overflow());
        assert!(p.overflow_values().is_empty());
        assert_eq!(p.width(), 1);
        assert_eq!(p.decompress(), vec![1, 0, 1]);
    }

    #[test]
    fn test_outlier_indices_follow_positions() {
        let mut values = vec![2u32; 64];
        values[3] = 1 << 20;
        values[10] = 1 << 25;
        values[63] = 1 << 30;
        let mut p = NonCrossing::new(true);
        roundtrip(&mut p, &values);
        assert_eq!(p.overflow_positions(), &[3, 10, 63]);
        assert_eq!(p.overflow_values(), &[1 << 20, 1 << 25, 1 << 30]);
        assert_eq!(p.idx_bits(), 2);
    }

    #[test]
    fn test_underrun_falls_back_to_zero() {
        let mut p = Crossing::new(true);
        let mut values = vec![1u32; 40];
        values[7] = 1 << 31;
        p.compress(&values);
        assert_eq!(p.get(7).unwrap(), 1 << 31);

        p.overflow_values.clear();
        assert_eq!(p.get(7).unwrap(), 0);
        assert_eq!(p.get(8).unwrap(), 1);
    }

    #[test]
    fn test_size_bits_counts_words_and_table() {
        let mut values = vec![1u32, 2, 3].repeat(30);
        values.push(1 << 30);
        let mut p = NonCrossing::new(true);
        p.compress(&values);
        assert_eq!(p.size_bits(), (p.words().len() + p.overflow_values().len()) * 32);
    }
}
