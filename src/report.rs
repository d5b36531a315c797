//! Size metrics for comparing layouts.
//!
//! A [`Report`] captures what a benchmark needs from a packer after
//! `compress`: how many bits it used against the plain 32-bit baseline.

use crate::factory::{Codec, Kind};
use crate::packed::BitPacker;
use crate::WORD_BITS;

/// Compressed versus uncompressed size of one packed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Layout that produced the encoding.
    pub kind: Kind,
    /// Element count.
    pub n: usize,
    /// Output of [`BitPacker::size_bits`].
    pub compressed_bits: usize,
    /// `n * 32`.
    pub uncompressed_bits: usize,
}

impl Report {
    /// Snapshot the size of an already compressed codec.
    pub fn of(codec: &Codec) -> Self {
        let n = codec.len();
        Self {
            kind: codec.kind(),
            n,
            compressed_bits: codec.size_bits(),
            uncompressed_bits: n * WORD_BITS as usize,
        }
    }

    /// `compressed / uncompressed`, 0 for an empty sequence.
    pub fn compression_ratio(&self) -> f64 {
        if self.uncompressed_bits == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.uncompressed_bits as f64
        }
    }

    /// Link time saved by sending the packed form, minus the time to pack it.
    ///
    /// Positive when compressing before a transfer over a link of
    /// `bandwidth_bits_per_sec` pays off.
    pub fn latency_threshold(&self, compress_secs: f64, bandwidth_bits_per_sec: f64) -> f64 {
        let saved = self.uncompressed_bits as f64 - self.compressed_bits as f64;
        saved / bandwidth_bits_per_sec - compress_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_ratio() {
        let mut codec = Codec::new(Kind::Crossing, false);
        codec.compress(&[1; 64]);
        let r = Report::of(&codec);
        assert_eq!(r.n, 64);
        assert_eq!(r.uncompressed_bits, 2048);
        assert_eq!(r.compressed_bits, 64);
        assert!((r.compression_ratio() - 1.0 / 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_empty() {
        let mut codec = Codec::new(Kind::NonCrossing, true);
        codec.compress(&[]);
        let r = Report::of(&codec);
        assert_eq!(r.compressed_bits, 0);
        assert_eq!(r.compression_ratio(), 0.0);
    }

    #[test]
    fn test_latency_threshold() {
        let r = Report {
            kind: Kind::Crossing,
            n: 1000,
            compressed_bits: 8_000,
            uncompressed_bits: 32_000,
        };
        let t = r.latency_threshold(0.001, 1e6);
        assert!((t - (24_000.0 / 1e6 - 0.001)).abs() < 1e-12);
    }
}
