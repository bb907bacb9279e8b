//! Variable-length integers for the schema header.
//!
//! Little-endian groups of 7 bits. Bit 7 of each byte is set when another
//! byte follows, so values below 128 take a single byte.

use std::io::{self, Write};

use crate::error::{CodecError, Result};

/// Longest encoding of a `u64`.
pub const MAX_VINT_LEN: usize = 10;

/// Decode the vint at the start of `data` into `(value, length)`.
#[inline]
pub fn read_vint(data: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;

    for (i, &byte) in data.iter().take(MAX_VINT_LEN).enumerate() {
        // The tenth byte may only carry the top bit of a u64.
        if i == MAX_VINT_LEN - 1 && byte > 1 {
            return Err(CodecError::VintOverflow);
        }
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if data.len() >= MAX_VINT_LEN {
        Err(CodecError::VintOverflow)
    } else {
        Err(CodecError::UnexpectedEof)
    }
}

/// Write `value` as a variable-length integer. Returns the bytes written.
pub fn write_vint<W: Write>(out: &mut W, mut value: u64) -> io::Result<usize> {
    let mut buf = [0u8; MAX_VINT_LEN];
    let mut len = 0;
    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = group;
            len += 1;
            break;
        }
        buf[len] = group | 0x80;
        len += 1;
    }
    out.write_all(&buf[..len])?;
    Ok(len)
}

/// Cursor over a header buffer.
pub struct VintReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> VintReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn read(&mut self) -> Result<u64> {
        let (value, consumed) = read_vint(&self.data[self.offset..])?;
        self.offset += consumed;
        Ok(value)
    }

    /// Read the next vint, which must fit a `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        u32::try_from(self.read()?).map_err(|_| CodecError::VintOverflow)
    }

    /// Take the next `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(CodecError::UnexpectedEof)?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }
}
