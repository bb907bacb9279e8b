//! Renormalizing integer arithmetic coder.
//!
//! Based on Moffat, Neal and Witten, "Arithmetic coding revisited" (1998),
//! with a 64-bit working width. Carries are resolved with the classic
//! bits-outstanding scheme rather than by propagating into emitted bytes.

use std::io::{self, Read, Write};

use super::bit_io::{BitReader, BitWriter};
use super::stats::FrequencyTable;
use crate::error::{CodecError, Result};

/// Working width in bits.
pub const CODE_BITS: u32 = u64::BITS;
/// `2^(b-1)`.
pub const HALF: u64 = 1 << (CODE_BITS - 1);
/// `2^(b-2)`.
pub const QUARTER: u64 = 1 << (CODE_BITS - 2);

/// Largest `total` a frequency range may use.
///
/// After renormalization `range > QUARTER`, so `range / total >= 1` holds for
/// any `total` up to this value.
pub const MAX_TOTAL: u64 = QUARTER;

/// Arithmetic encoder.
///
/// Owns its bit sink. Pass `&mut W` to keep ownership of the writer.
pub struct Encoder<W: Write> {
    /// Low end of the coding interval.
    low: u64,
    /// Width of the coding interval.
    range: u64,
    /// Bits whose value waits for the next committed bit.
    bits_outstanding: u64,
    flushed: bool,
    /// Taken by `finish`; always present otherwise.
    out: Option<BitWriter<W>>,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            low: 0,
            range: HALF,
            bits_outstanding: 0,
            flushed: false,
            out: Some(BitWriter::new(sink)),
        }
    }

    /// Narrow the interval to `[low, high)` out of `total`.
    ///
    /// Requires `0 <= low < high <= total <= MAX_TOTAL`. Violations are not
    /// reported and corrupt the stream.
    #[inline]
    pub fn encode(&mut self, low: u64, high: u64, total: u64) -> Result<()> {
        debug_assert!(total > 0 && total <= MAX_TOTAL, "bad total {}", total);
        debug_assert!(low < high && high <= total, "bad range {}..{}/{}", low, high, total);

        let r = self.range / total;
        self.low += r * low;
        // The top symbol takes the division remainder.
        if high < total {
            self.range = r * (high - low);
        } else {
            self.range -= r * low;
        }

        while self.range <= QUARTER {
            if self.low <= HALF && self.low + self.range <= HALF {
                self.bit_plus_follow(false)?;
            } else if self.low >= HALF {
                self.bit_plus_follow(true)?;
                self.low -= HALF;
            } else {
                self.bits_outstanding += 1;
                self.low -= QUARTER;
            }
            self.low <<= 1;
            self.range <<= 1;
        }
        Ok(())
    }

    /// Encode `symbol` with the interval `table` currently assigns it.
    ///
    /// The table is not updated; apply the adaptive policy afterwards.
    #[inline]
    pub fn encode_symbol<T: FrequencyTable + ?Sized>(&mut self, table: &T, symbol: u32) -> Result<()> {
        let (low, high) = table
            .range(symbol)
            .ok_or(CodecError::UnregisteredSymbol(symbol))?;
        self.encode(low, high, table.total())
    }

    #[inline]
    fn bit_plus_follow(&mut self, bit: bool) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        out.write_bit(bit)?;
        while self.bits_outstanding > 0 {
            out.write_bit(!bit)?;
            self.bits_outstanding -= 1;
        }
        Ok(())
    }

    /// Emit the final interval position and pad to a byte boundary.
    ///
    /// Only the first call writes anything.
    pub fn flush(&mut self) -> Result<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;

        for i in (0..CODE_BITS).rev() {
            self.bit_plus_follow((self.low >> i) & 1 != 0)?;
        }
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        Ok(())
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        log::debug!("encoder finished after {} bytes", self.bytes_written());
        match self.out.take() {
            Some(out) => Ok(out.into_inner()),
            None => Err(io::Error::new(io::ErrorKind::Other, "encoder sink already taken").into()),
        }
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Bytes handed to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.out.as_ref().map_or(0, BitWriter::bytes_written)
    }
}

impl<W: Write> Drop for Encoder<W> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("failed to flush arithmetic encoder on drop: {}", e);
        }
    }
}

/// Arithmetic decoder.
///
/// `decode_target` and `consume` share the division step `r`, so they must be
/// called as a pair with the same `total`.
pub struct Decoder<R: Read> {
    range: u64,
    /// Offset of the code value inside the current interval.
    window: u64,
    /// Division step from the last `decode_target`.
    step: u64,
    input: BitReader<R>,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder and prime its window with 64 bits.
    pub fn new(source: R) -> Result<Self> {
        let mut decoder = Self {
            range: HALF,
            window: 0,
            step: 0,
            input: BitReader::new(source),
        };
        for _ in 0..CODE_BITS {
            decoder.window = (decoder.window << 1) | u64::from(decoder.input.read_bit()?);
        }
        Ok(decoder)
    }

    /// Cumulative count in `[0, total)` that the next symbol falls into.
    #[inline]
    pub fn decode_target(&mut self, total: u64) -> u64 {
        debug_assert!(total > 0 && total <= MAX_TOTAL, "bad total {}", total);
        self.step = self.range / total;
        (total - 1).min(self.window / self.step)
    }

    /// Remove the decoded symbol `[low, high)` from the interval.
    #[inline]
    pub fn consume(&mut self, low: u64, high: u64, total: u64) -> Result<()> {
        let r = self.step;
        self.window -= r * low;
        if high < total {
            self.range = r * (high - low);
        } else {
            self.range -= r * low;
        }

        while self.range <= QUARTER {
            self.range <<= 1;
            self.window = (self.window << 1) | u64::from(self.input.read_bit()?);
        }
        Ok(())
    }

    /// Decode one symbol against `table`. The table is not updated.
    #[inline]
    pub fn decode_symbol<T: FrequencyTable + ?Sized>(&mut self, table: &T) -> Result<u32> {
        let total = table.total();
        let target = self.decode_target(total);
        let (symbol, low, high) = table
            .symbol_for(target)
            .ok_or(CodecError::InvalidSymbol(target as u32))?;
        self.consume(low, high, total)?;
        Ok(symbol)
    }

    /// Bytes taken from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.input.bytes_read()
    }

    /// Zero bytes substituted because the source ended early.
    ///
    /// A well-formed stream never needs padding.
    pub fn padded_bytes(&self) -> u64 {
        self.input.padded_bytes()
    }

    pub fn into_inner(self) -> R {
        if self.input.padded_bytes() > 0 {
            log::warn!(
                "decoder read {} bytes past the end of its input",
                self.input.padded_bytes()
            );
        }
        self.input.into_inner()
    }
}
