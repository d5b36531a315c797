//! Width and overflow selection.
//!
//! Picks the direct bit-width `k` for a sequence and, when exceptions are
//! enabled, the set of outliers stored out of line.
//!
//! # Cost model
//!
//! For a candidate width $b$ let $oc$ be the number of values whose bit-length
//! exceeds $b$. With a one-bit tag $f = [oc > 0]$ and an index width
//! $i = \lceil \log_2 oc \rceil$ (1 when $oc = 1$), the stream costs
//!
//! $$(n - oc)(f + b) + oc(f + i) + 32 \cdot oc$$
//!
//! bits, the last term being the verbatim overflow table. All 32 widths are
//! scanned in ascending order and the first strict minimum wins, so equal-cost
//! widths always resolve to the smallest one.

use crate::WORD_BITS;

/// Number of bits needed to represent `x`; zero takes one bit.
#[inline]
pub fn bit_length(x: u32) -> u32 {
    if x == 0 {
        1
    } else {
        u32::BITS - x.leading_zeros()
    }
}

/// Bits needed to address an overflow table of `count` entries.
///
/// Returns 0 for an empty table and 1 for a single entry.
#[inline]
pub fn index_bits(count: usize) -> u32 {
    match count {
        0 => 0,
        1 => 1,
        c => usize::BITS - (c - 1).leading_zeros(),
    }
}

/// Outcome of the width search for one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Direct width `k` (1..=32, or 0 for an empty sequence).
    pub width: u32,
    /// Width of an overflow-table index.
    pub idx_bits: u32,
    /// Ascending original indices of the values wider than `width`.
    pub overflow_positions: Vec<usize>,
    /// Modeled cost of the chosen parameters in bits.
    pub total_bits: u64,
}

impl Selection {
    /// Return true if at least one value is stored out of line.
    pub fn uses_overflow(&self) -> bool {
        !self.overflow_positions.is_empty()
    }
}

/// Modeled size in bits of encoding `n` values at width `b` with `oc` outliers.
pub fn cost_bits(n: usize, b: u32, oc: usize) -> u64 {
    let n = n as u64;
    let oc_u = oc as u64;
    let flag = u64::from(oc > 0);
    let encoded = (n - oc_u) * (flag + u64::from(b)) + oc_u * (flag + u64::from(index_bits(oc)));
    encoded + oc_u * u64::from(WORD_BITS)
}

/// Choose the direct width and overflow set for `values`.
///
/// Without `choose_overflow` the width is simply the widest value (1 for an
/// empty input). With it, every width in `1..=32` is costed and the cheapest
/// is kept.
pub fn select(values: &[u32], choose_overflow: bool) -> Selection {
    let n = values.len();
    if n == 0 {
        return Selection::default();
    }

    // hist[l] = number of values with bit-length l
    let mut hist = [0usize; WORD_BITS as usize + 1];
    for &v in values {
        hist[bit_length(v) as usize] += 1;
    }

    if !choose_overflow {
        let width = (1..=WORD_BITS).rev().find(|&l| hist[l as usize] > 0).unwrap_or(1);
        return Selection {
            width,
            idx_bits: 0,
            overflow_positions: Vec::new(),
            total_bits: cost_bits(n, width, 0),
        };
    }

    let mut best: Option<(u64, u32, usize)> = None;
    let mut wider = n;
    for b in 1..=WORD_BITS {
        wider -= hist[b as usize];
        let total = cost_bits(n, b, wider);
        if best.map_or(true, |(t, _, _)| total < t) {
            best = Some((total, b, wider));
        }
    }
    // b = 32 has no outliers, so the scan always yields a candidate.
    let (total_bits, width, oc) = best.unwrap_or((cost_bits(n, WORD_BITS, 0), WORD_BITS, 0));

    let overflow_positions: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| bit_length(v) > width)
        .map(|(i, _)| i)
        .collect();
    debug_assert_eq!(overflow_positions.len(), oc);

    tracing::trace!(width, oc, total_bits, "selected packing width");

    Selection {
        width,
        idx_bits: index_bits(oc),
        overflow_positions,
        total_bits,
    }
}
