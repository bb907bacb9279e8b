//! Bit channel for the arithmetic coder.
//!
//! Bits are packed MSB first. The writer pads the last byte with zero bits;
//! the reader yields zero bits once its source runs dry.

use std::io::{self, Read, Write};

/// Packs single bits into bytes and writes them to a sink.
pub struct BitWriter<W: Write> {
    inner: W,
    /// Partial byte, filled from the top.
    buffer: u8,
    /// Bits currently held in `buffer`.
    bits_in_buffer: u32,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new bit writer over a sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: 0,
            bits_in_buffer: 0,
            bytes_written: 0,
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.buffer |= u8::from(bit) << (7 - self.bits_in_buffer);
        self.bits_in_buffer += 1;
        if self.bits_in_buffer == 8 {
            self.emit_buffer()?;
        }
        Ok(())
    }

    fn emit_buffer(&mut self) -> io::Result<()> {
        self.inner.write_all(&[self.buffer])?;
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.bytes_written += 1;
        Ok(())
    }

    /// Pad to a byte boundary with zero bits and flush the sink.
    ///
    /// Calling this on an already aligned writer only flushes the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.bits_in_buffer > 0 {
            self.emit_buffer()?;
        }
        self.inner.flush()
    }

    /// Bytes handed to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Pending bits not yet forming a full byte.
    pub fn pending_bits(&self) -> u32 {
        self.bits_in_buffer
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the sink. Pending bits are discarded; call [`flush`] first.
    ///
    /// [`flush`]: BitWriter::flush
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads single bits from a byte source.
pub struct BitReader<R: Read> {
    inner: R,
    buffer: u8,
    bits_in_buffer: u32,
    bytes_read: u64,
    /// Zero bytes invented after the source ended.
    padded_bytes: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new bit reader over a source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: 0,
            bits_in_buffer: 0,
            bytes_read: 0,
            padded_bytes: 0,
        }
    }

    fn fill_buffer(&mut self) -> io::Result<()> {
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => {
                self.buffer = byte[0];
                self.bytes_read += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                self.buffer = 0;
                self.padded_bytes += 1;
            }
            Err(e) => return Err(e),
        }
        self.bits_in_buffer = 8;
        Ok(())
    }

    /// Read a single bit. Past the end of the source this returns `false`.
    #[inline]
    pub fn read_bit(&mut self) -> io::Result<bool> {
        if self.bits_in_buffer == 0 {
            self.fill_buffer()?;
        }
        self.bits_in_buffer -= 1;
        Ok((self.buffer >> self.bits_in_buffer) & 1 != 0)
    }

    /// Bytes actually taken from the source.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Zero bytes substituted after the source ended.
    pub fn padded_bytes(&self) -> u64 {
        self.padded_bytes
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [true, false, true, true, false, true, false, false] {
            writer.write_bit(bit).unwrap();
        }
        writer.write_bit(true).unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.get_ref(), &vec![0b10110100, 0b10000000]);
        assert_eq!(writer.bytes_written(), 2);
    }

    #[test]
    fn test_flush_when_aligned_is_noop() {
        let mut writer = BitWriter::new(Vec::new());
        for _ in 0..8 {
            writer.write_bit(true).unwrap();
        }
        writer.flush().unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), vec![0xFF]);
    }

    #[test]
    fn test_read_bits() {
        let data = [0b10110100u8];
        let mut reader = BitReader::new(&data[..]);

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, true, false, false]);
        assert_eq!(reader.bytes_read(), 1);
        assert_eq!(reader.padded_bytes(), 0);
    }

    #[test]
    fn test_read_past_end_yields_zeros() {
        let data = [0xFFu8];
        let mut reader = BitReader::new(&data[..]);

        for _ in 0..8 {
            assert!(reader.read_bit().unwrap());
        }
        for _ in 0..16 {
            assert!(!reader.read_bit().unwrap());
        }
        assert_eq!(reader.padded_bytes(), 2);
    }
}
