//! Byte-plane models for fixed-width scalars.
//!
//! A value of `N` bytes is framed as its raw bit pattern (two's complement
//! for signed integers, IEEE-754 for floats) and coded as `N` symbols, most
//! significant byte first, each against its own adaptive 256-symbol table.

use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;

use super::coder::{Decoder, Encoder};
use super::stats::AdaptiveTable;
use super::Model;
use crate::error::Result;

/// A fixed-width value with an exact bit-pattern conversion.
pub trait Scalar: Copy + fmt::Debug {
    /// Width in bytes.
    const BYTES: usize;

    /// Raw bit pattern, zero-extended to 64 bits.
    fn to_word(self) -> u64;

    /// Rebuild the value from the low `BYTES` bytes of `word`.
    fn from_word(word: u64) -> Self;
}

macro_rules! impl_scalar_int {
    ($($t:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const BYTES: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn to_word(self) -> u64 {
                    self as $unsigned as u64
                }

                #[inline(always)]
                fn from_word(word: u64) -> Self {
                    word as $unsigned as $t
                }
            }
        )*
    };
}

impl_scalar_int! {
    u8 => u8,
    i8 => u8,
    u16 => u16,
    i16 => u16,
    u32 => u32,
    i32 => u32,
    u64 => u64,
    i64 => u64,
}

impl Scalar for f32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn to_word(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline(always)]
    fn from_word(word: u64) -> Self {
        f32::from_bits(word as u32)
    }
}

impl Scalar for f64 {
    const BYTES: usize = 8;

    #[inline(always)]
    fn to_word(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_word(word: u64) -> Self {
        f64::from_bits(word)
    }
}

/// Adaptive model for one scalar field.
#[derive(Debug, Clone)]
pub struct ScalarModel<T: Scalar> {
    /// One table per byte, most significant first.
    planes: Vec<AdaptiveTable>,
    _marker: PhantomData<T>,
}

impl<T: Scalar> ScalarModel<T> {
    /// Model with every byte value registered in every plane.
    pub fn new() -> Self {
        let planes = (0..T::BYTES)
            .map(|_| {
                let mut table = AdaptiveTable::with_capacity(256);
                for byte in 0..256 {
                    table.init(byte);
                }
                table
            })
            .collect();
        Self {
            planes,
            _marker: PhantomData,
        }
    }

    /// Model with empty planes.
    ///
    /// Every value must be registered with [`init`] before it is coded, in
    /// the same order on both sides of the stream.
    ///
    /// [`init`]: ScalarModel::init
    pub fn sparse() -> Self {
        Self {
            planes: (0..T::BYTES).map(|_| AdaptiveTable::with_capacity(256)).collect(),
            _marker: PhantomData,
        }
    }

    /// Register each byte of `value` in its plane.
    pub fn init(&mut self, value: T) {
        let word = value.to_word();
        for (k, plane) in self.planes.iter_mut().enumerate() {
            plane.init(byte_at::<T>(word, k));
        }
    }

    /// Whether every byte of `value` is registered, i.e. it can be coded.
    pub fn accepts(&self, value: T) -> bool {
        let word = value.to_word();
        self.planes
            .iter()
            .enumerate()
            .all(|(k, plane)| plane.is_registered(byte_at::<T>(word, k)))
    }

    pub fn planes(&self) -> &[AdaptiveTable] {
        &self.planes
    }
}

impl<T: Scalar> Default for ScalarModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte `k` of `word`, counting from the most significant byte of `T`.
#[inline(always)]
fn byte_at<T: Scalar>(word: u64, k: usize) -> u32 {
    let shift = 8 * (T::BYTES - 1 - k);
    ((word >> shift) & 0xFF) as u32
}

impl<T: Scalar> Model for ScalarModel<T> {
    type Value = T;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, value: T) -> Result<()> {
        let word = value.to_word();
        for (k, plane) in self.planes.iter_mut().enumerate() {
            let byte = byte_at::<T>(word, k);
            coder.encode_symbol(plane, byte)?;
            plane.increment(byte);
        }
        Ok(())
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<T> {
        let mut word = 0u64;
        for plane in &mut self.planes {
            let byte = coder.decode_symbol(plane)?;
            plane.increment(byte);
            word = (word << 8) | u64::from(byte);
        }
        Ok(T::from_word(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::FrequencyTable;
    use crate::error::CodecError;

    fn roundtrip<T: Scalar + PartialEq>(values: &[T]) -> Vec<T> {
        let mut model = ScalarModel::<T>::new();
        let mut encoder = Encoder::new(Vec::new());
        for &v in values {
            model.encode(&mut encoder, v).unwrap();
        }
        let bytes = encoder.finish().unwrap();

        let mut model = ScalarModel::<T>::new();
        let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
        values.iter().map(|_| model.decode(&mut decoder).unwrap()).collect()
    }

    #[test]
    fn test_word_framing() {
        assert_eq!((-1i16).to_word(), 0xFFFF);
        assert_eq!(i16::from_word(0xFFFF), -1);
        assert_eq!((-2i8).to_word(), 0xFE);
        assert_eq!(i64::MIN.to_word(), 1 << 63);
        assert_eq!(1.0f32.to_word(), 0x3F80_0000);
    }

    #[test]
    fn test_integer_boundaries_roundtrip() {
        let values = [i32::MIN, -1, 0, 1, i32::MAX, 42, -42];
        assert_eq!(roundtrip(&values), values);

        let values = [u64::MAX, 0, 1 << 63, 12345];
        assert_eq!(roundtrip(&values), values);

        let values = [i8::MIN, i8::MAX, 0, -1];
        assert_eq!(roundtrip(&values), values);
    }

    #[test]
    fn test_non_finite_floats_roundtrip() {
        let values = [
            f64::NAN,
            f64::from_bits(0x7FF8_0000_0000_1234),
            f64::INFINITY,
            f64::NEG_INFINITY,
            -0.0,
            f64::MIN_POSITIVE,
            f64::EPSILON,
        ];
        let decoded = roundtrip(&values);
        for (a, b) in values.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }

        let values = [f32::NAN, f32::from_bits(0x7FC0_0001), f32::INFINITY, -0.0f32];
        let decoded = roundtrip(&values);
        for (a, b) in values.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_planes_adapt() {
        let mut model = ScalarModel::<u16>::new();
        let mut encoder = Encoder::new(Vec::new());
        for _ in 0..10 {
            model.encode(&mut encoder, 0x0102).unwrap();
        }
        assert_eq!(model.planes()[0].count(0x01), Some(11));
        assert_eq!(model.planes()[1].count(0x02), Some(11));
        assert_eq!(model.planes()[0].total(), 256 + 10);
    }

    #[test]
    fn test_sparse_model() {
        let mut model = ScalarModel::<u16>::sparse();
        assert!(!model.accepts(3));
        model.init(3);
        model.init(300);
        assert!(model.accepts(3));
        assert!(model.accepts(300));
        // 0x012C needs 0x01 in the high plane and 0x2C in the low plane.
        assert_eq!(model.planes()[0].symbols(), &[0x00, 0x01]);
        assert_eq!(model.planes()[1].symbols(), &[0x03, 0x2C]);

        let mut encoder = Encoder::new(Vec::new());
        let err = model.encode(&mut encoder, 0x0202).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredSymbol(0x02)));
    }

    #[test]
    fn test_sparse_roundtrip() {
        let build = || {
            let mut model = ScalarModel::<u16>::sparse();
            for v in [1u16, 2, 4] {
                model.init(v);
            }
            model
        };
        let values = [4u16, 1, 1, 2, 4, 4];

        let mut model = build();
        let mut encoder = Encoder::new(Vec::new());
        for &v in &values {
            model.encode(&mut encoder, v).unwrap();
        }
        let bytes = encoder.finish().unwrap();

        let mut model = build();
        let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
        let decoded: Vec<u16> = values.iter().map(|_| model.decode(&mut decoder).unwrap()).collect();
        assert_eq!(decoded, values);
    }
}
