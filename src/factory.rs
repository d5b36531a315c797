//! Construct a packer from a layout name.

use std::fmt;
use std::str::FromStr;

use crate::crossing::Crossing;
use crate::error::{Error, Result};
use crate::noncrossing::NonCrossing;
use crate::packed::BitPacker;

/// Available bitstream layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Word-aligned payloads, see [`crate::noncrossing`].
    NonCrossing,
    /// Continuous bitstream, see [`crate::crossing`].
    Crossing,
}

impl Kind {
    /// Both layouts, in a stable order.
    pub const ALL: [Kind; 2] = [Kind::NonCrossing, Kind::Crossing];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::NonCrossing => "noncrossing",
            Kind::Crossing => "crossing",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    /// Case-insensitive; accepts `noncrossing`, `non-crossing`, `no-cross`,
    /// `crossing`, `cross` and `bitstream`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "noncrossing" | "non-crossing" | "no-cross" => Ok(Kind::NonCrossing),
            "crossing" | "cross" | "bitstream" => Ok(Kind::Crossing),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// A packer of either layout.
#[derive(Debug, Clone)]
pub enum Codec {
    /// Word-aligned packer.
    NonCrossing(NonCrossing),
    /// Continuous packer.
    Crossing(Crossing),
}

impl Codec {
    /// Create an empty packer for `kind`.
    pub fn new(kind: Kind, choose_overflow: bool) -> Self {
        match kind {
            Kind::NonCrossing => Codec::NonCrossing(NonCrossing::new(choose_overflow)),
            Kind::Crossing => Codec::Crossing(Crossing::new(choose_overflow)),
        }
    }

    /// Layout of this packer.
    pub fn kind(&self) -> Kind {
        match self {
            Codec::NonCrossing(_) => Kind::NonCrossing,
            Codec::Crossing(_) => Kind::Crossing,
        }
    }

    /// Direct width chosen by the last `compress`.
    pub fn width(&self) -> u32 {
        match self {
            Codec::NonCrossing(p) => p.width(),
            Codec::Crossing(p) => p.width(),
        }
    }

    /// Verbatim outlier values of the last `compress`.
    pub fn overflow_values(&self) -> &[u32] {
        match self {
            Codec::NonCrossing(p) => p.overflow_values(),
            Codec::Crossing(p) => p.overflow_values(),
        }
    }
}

impl BitPacker for Codec {
    fn compress(&mut self, values: &[u32]) {
        match self {
            Codec::NonCrossing(p) => p.compress(values),
            Codec::Crossing(p) => p.compress(values),
        }
    }

    fn decompress(&self) -> Vec<u32> {
        match self {
            Codec::NonCrossing(p) => p.decompress(),
            Codec::Crossing(p) => p.decompress(),
        }
    }

    fn get(&self, index: usize) -> Result<u32> {
        match self {
            Codec::NonCrossing(p) => p.get(index),
            Codec::Crossing(p) => p.get(index),
        }
    }

    fn size_bits(&self) -> usize {
        match self {
            Codec::NonCrossing(p) => p.size_bits(),
            Codec::Crossing(p) => p.size_bits(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Codec::NonCrossing(p) => p.len(),
            Codec::Crossing(p) => p.len(),
        }
    }
}

/// Create a packer from a layout name such as `"crossing"` or `"no-cross"`.
pub fn create(kind: &str, choose_overflow: bool) -> Result<Codec> {
    let kind: Kind = kind.parse()?;
    Ok(Codec::new(kind, choose_overflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_aliases() {
        for name in ["noncrossing", "NonCrossing", "non-crossing", "NO-CROSS"] {
            assert_eq!(name.parse::<Kind>().unwrap(), Kind::NonCrossing);
        }
        for name in ["crossing", "Cross", "BITSTREAM"] {
            assert_eq!(name.parse::<Kind>().unwrap(), Kind::Crossing);
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            create("bogus", true).unwrap_err(),
            Error::UnknownKind("bogus".to_string())
        );
        assert!(create("", false).is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for kind in Kind::ALL {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_aliases_behave_identically() {
        let mut values = vec![1u32, 2, 3].repeat(30);
        values.push(1 << 30);

        let mut a = create("NonCrossing", true).unwrap();
        let mut b = create("no-cross", true).unwrap();
        assert_eq!(a.kind(), b.kind());
        a.compress(&values);
        b.compress(&values);
        assert_eq!(a.size_bits(), b.size_bits());
        assert_eq!(a.decompress(), b.decompress());
        assert_eq!(a.get(90).unwrap(), b.get(90).unwrap());
    }
}
