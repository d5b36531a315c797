//! # Bit-Packing with Exceptions
//!
//! *Fixed-width integer packing that keeps outliers from setting the width.*
//!
//! ## Intuition First
//!
//! Imagine a row of mailboxes that must all be the same size. If a single
//! parcel is huge, every box has to be built for it and most of them stand
//! half empty. The cheaper plan is to build boxes for the usual letters and
//! leave a note in the box that receives the parcel: "see the storeroom,
//! shelf 3".
//!
//! This crate packs each value of a sequence into `k` bits and sends the few
//! values that need more to a side table, leaving a short index in their slot.
//!
//! ## The Problem
//!
//! Postings lists, sensor samples and similar arrays are mostly small numbers
//! with rare large ones:
//! - **Plain packing**: `k = max bit-length`, one outlier inflates every slot.
//! - **Exceptions**: a one-bit tag per slot, plus an index and a full word for
//!   each outlier. Pays off when outliers are rare.
//!
//! Which one wins depends on the data, so the width is chosen per sequence by
//! costing all 32 candidates (see [`width`]).
//!
//! ## Layouts
//!
//! ```text
//! noncrossing   | p0 | p1 | p2 |pad|  | p3 | p4 | ... |      payloads stay inside a word
//! crossing      | p0 | p1 | p2 | p3|  |p3'| p4 | ...  |      payloads may span two words
//! ```
//!
//! [`NonCrossing`] wastes a few bits per word so that no payload is split.
//! [`Crossing`] packs back to back and is never larger.
//!
//! ## Complexity Analysis
//!
//! - **compress**: $O(n)$ (width histogram plus one packing pass).
//! - **decompress**: $O(n)$.
//! - **get(i)**: $O(i)$. Payload lengths vary, so there is no fixed stride.
//! - **Space**: `size_bits() = 32 * (words + outliers)`.
//!
//! ## What Could Go Wrong
//!
//! 1. **Dense outliers**: once outliers stop being rare the search simply
//!    picks the plain width; exceptions are never forced.
//! 2. **Random access**: `get` replays the stream from the start. Decode once
//!    with `decompress` when reading many positions.
//!
//! ## Example
//!
//! ```
//! use bitpacker::{create, BitPacker};
//!
//! let mut values = vec![1u32, 2, 3].repeat(30);
//! values.push(1 << 30);
//!
//! let mut codec = create("crossing", true).unwrap();
//! codec.compress(&values);
//! assert_eq!(codec.decompress(), values);
//! assert_eq!(codec.get(90).unwrap(), 1 << 30);
//! assert!(codec.size_bits() < values.len() * 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod crossing;
pub mod cursor;
pub mod error;
pub mod factory;
pub mod noncrossing;
pub mod packed;
pub mod report;
pub mod width;

pub use crossing::Crossing;
pub use error::{Error, Result};
pub use factory::{create, Codec, Kind};
pub use noncrossing::NonCrossing;
pub use packed::{BitPacker, Layout, Packer};
pub use report::Report;

/// Size of one packed word in bits.
pub const WORD_BITS: u32 = 32;
