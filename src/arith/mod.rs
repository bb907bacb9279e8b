//! Arithmetic coding engine.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`BitWriter`] / [`BitReader`] | MSB-first bit channel over `io::Write` / `io::Read` |
//! | [`Encoder`] / [`Decoder`] | 64-bit renormalizing arithmetic coder |
//! | [`AdaptiveTable`] | Growable symbol → count table with cumulative ranges |
//! | [`ScalarModel`] | Byte-plane model for one fixed-width scalar |
//!
//! ## Example
//!
//! ```rust
//! use harry::arith::{AdaptiveTable, Decoder, Encoder};
//!
//! let mut table = AdaptiveTable::new();
//! for s in 0..3 {
//!     table.init(s);
//! }
//!
//! let mut encoder = Encoder::new(Vec::new());
//! let mut enc_table = table.clone();
//! for &s in &[0, 1, 2, 0] {
//!     encoder.encode_symbol(&enc_table, s)?;
//!     enc_table.increment(s);
//! }
//! let bytes = encoder.finish()?;
//!
//! let mut decoder = Decoder::new(bytes.as_slice())?;
//! let mut decoded = Vec::new();
//! for _ in 0..4 {
//!     let s = decoder.decode_symbol(&table)?;
//!     table.increment(s);
//!     decoded.push(s);
//! }
//! assert_eq!(decoded, [0, 1, 2, 0]);
//! # Ok::<(), harry::CodecError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   model.encode(coder, value)
//!         ↓
//! ┌─────────────────┐
//! │ AdaptiveTable   │ ← (low, high, total) for the symbol
//! └─────────────────┘
//!         ↓
//! ┌─────────────────┐
//! │ Encoder         │ ← narrow interval, renormalize, resolve carries
//! └─────────────────┘
//!         ↓
//! ┌─────────────────┐
//! │ BitWriter       │ ← pack bits into bytes
//! └─────────────────┘
//! ```
//!
//! Encoder and decoder carry no framing or checksum. Both sides must drive
//! identically initialized models through the same sequence of calls.

mod bit_io;
mod coder;
mod scalar;
mod stats;

#[cfg(test)]
mod tests;

pub use bit_io::{BitReader, BitWriter};
pub use coder::{Decoder, Encoder, CODE_BITS, HALF, MAX_TOTAL, QUARTER};
pub use scalar::{Scalar, ScalarModel};
pub use stats::{AdaptiveTable, FrequencyTable};

use std::io::{Read, Write};

use crate::error::Result;

/// An adaptive model coding one logical unit per call.
///
/// `encode` and `decode` update the model identically, so a decoder built the
/// same way as the encoder stays in step with it.
pub trait Model {
    /// The unit coded by one call: a scalar, a row or an operation.
    type Value;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, value: Self::Value) -> Result<()>;

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<Self::Value>;
}
