//! Typed attribute fields and their models.

use std::io::{Read, Write};

use crate::arith::{Decoder, Encoder, Model, Scalar, ScalarModel};
use crate::error::{CodecError, Result};

/// Numeric type of one attribute field.
///
/// The discriminant is the tag stored in the schema header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum FieldType {
    Int8 = 0,
    UInt8 = 1,
    Int16 = 2,
    UInt16 = 3,
    Int32 = 4,
    UInt32 = 5,
    Int64 = 6,
    UInt64 = 7,
    Float32 = 8,
    Float64 = 9,
}

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Width of the raw representation in bytes.
    pub fn byte_width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

/// One raw field value.
///
/// Equality compares bit patterns, so a NaN equals itself and `0.0` differs
/// from `-0.0`.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Int8(_) => FieldType::Int8,
            Self::UInt8(_) => FieldType::UInt8,
            Self::Int16(_) => FieldType::Int16,
            Self::UInt16(_) => FieldType::UInt16,
            Self::Int32(_) => FieldType::Int32,
            Self::UInt32(_) => FieldType::UInt32,
            Self::Int64(_) => FieldType::Int64,
            Self::UInt64(_) => FieldType::UInt64,
            Self::Float32(_) => FieldType::Float32,
            Self::Float64(_) => FieldType::Float64,
        }
    }

    /// Raw bit pattern, zero-extended.
    pub fn to_word(&self) -> u64 {
        match *self {
            Self::Int8(v) => v.to_word(),
            Self::UInt8(v) => v.to_word(),
            Self::Int16(v) => v.to_word(),
            Self::UInt16(v) => v.to_word(),
            Self::Int32(v) => v.to_word(),
            Self::UInt32(v) => v.to_word(),
            Self::Int64(v) => v.to_word(),
            Self::UInt64(v) => v.to_word(),
            Self::Float32(v) => v.to_word(),
            Self::Float64(v) => v.to_word(),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.field_type() == other.field_type() && self.to_word() == other.to_word()
    }
}

impl Eq for FieldValue {}

/// Model for one field, fixed to the field's declared type.
#[derive(Debug, Clone)]
pub enum FieldModel {
    Int8(ScalarModel<i8>),
    UInt8(ScalarModel<u8>),
    Int16(ScalarModel<i16>),
    UInt16(ScalarModel<u16>),
    Int32(ScalarModel<i32>),
    UInt32(ScalarModel<u32>),
    Int64(ScalarModel<i64>),
    UInt64(ScalarModel<u64>),
    Float32(ScalarModel<f32>),
    Float64(ScalarModel<f64>),
}

impl FieldModel {
    pub fn new(ty: FieldType) -> Self {
        match ty {
            FieldType::Int8 => Self::Int8(ScalarModel::new()),
            FieldType::UInt8 => Self::UInt8(ScalarModel::new()),
            FieldType::Int16 => Self::Int16(ScalarModel::new()),
            FieldType::UInt16 => Self::UInt16(ScalarModel::new()),
            FieldType::Int32 => Self::Int32(ScalarModel::new()),
            FieldType::UInt32 => Self::UInt32(ScalarModel::new()),
            FieldType::Int64 => Self::Int64(ScalarModel::new()),
            FieldType::UInt64 => Self::UInt64(ScalarModel::new()),
            FieldType::Float32 => Self::Float32(ScalarModel::new()),
            FieldType::Float64 => Self::Float64(ScalarModel::new()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Int8(_) => FieldType::Int8,
            Self::UInt8(_) => FieldType::UInt8,
            Self::Int16(_) => FieldType::Int16,
            Self::UInt16(_) => FieldType::UInt16,
            Self::Int32(_) => FieldType::Int32,
            Self::UInt32(_) => FieldType::UInt32,
            Self::Int64(_) => FieldType::Int64,
            Self::UInt64(_) => FieldType::UInt64,
            Self::Float32(_) => FieldType::Float32,
            Self::Float64(_) => FieldType::Float64,
        }
    }
}

impl Model for FieldModel {
    type Value = FieldValue;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, value: FieldValue) -> Result<()> {
        match (self, value) {
            (Self::Int8(m), FieldValue::Int8(v)) => m.encode(coder, v),
            (Self::UInt8(m), FieldValue::UInt8(v)) => m.encode(coder, v),
            (Self::Int16(m), FieldValue::Int16(v)) => m.encode(coder, v),
            (Self::UInt16(m), FieldValue::UInt16(v)) => m.encode(coder, v),
            (Self::Int32(m), FieldValue::Int32(v)) => m.encode(coder, v),
            (Self::UInt32(m), FieldValue::UInt32(v)) => m.encode(coder, v),
            (Self::Int64(m), FieldValue::Int64(v)) => m.encode(coder, v),
            (Self::UInt64(m), FieldValue::UInt64(v)) => m.encode(coder, v),
            (Self::Float32(m), FieldValue::Float32(v)) => m.encode(coder, v),
            (Self::Float64(m), FieldValue::Float64(v)) => m.encode(coder, v),
            (model, value) => Err(CodecError::FieldTypeMismatch {
                expected: model.field_type(),
                found: value.field_type(),
            }),
        }
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<FieldValue> {
        Ok(match self {
            Self::Int8(m) => FieldValue::Int8(m.decode(coder)?),
            Self::UInt8(m) => FieldValue::UInt8(m.decode(coder)?),
            Self::Int16(m) => FieldValue::Int16(m.decode(coder)?),
            Self::UInt16(m) => FieldValue::UInt16(m.decode(coder)?),
            Self::Int32(m) => FieldValue::Int32(m.decode(coder)?),
            Self::UInt32(m) => FieldValue::UInt32(m.decode(coder)?),
            Self::Int64(m) => FieldValue::Int64(m.decode(coder)?),
            Self::UInt64(m) => FieldValue::UInt64(m.decode(coder)?),
            Self::Float32(m) => FieldValue::Float32(m.decode(coder)?),
            Self::Float64(m) => FieldValue::Float64(m.decode(coder)?),
        })
    }
}

/// One field model per schema entry, driven in schema order.
#[derive(Debug, Clone)]
pub struct FieldVectorModel {
    fields: Vec<FieldModel>,
}

impl FieldVectorModel {
    pub fn new(types: &[FieldType]) -> Self {
        Self {
            fields: types.iter().map(|&ty| FieldModel::new(ty)).collect(),
        }
    }

    /// Number of fields per row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.fields.iter().map(FieldModel::field_type)
    }

    /// Encode one attribute row.
    ///
    /// The row is checked against the schema before anything is coded, so a
    /// rejected row leaves coder and models untouched.
    pub fn encode_row<W: Write>(&mut self, coder: &mut Encoder<W>, row: &[FieldValue]) -> Result<()> {
        if row.len() != self.fields.len() {
            return Err(CodecError::RowLength {
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        for (model, value) in self.fields.iter().zip(row) {
            if model.field_type() != value.field_type() {
                return Err(CodecError::FieldTypeMismatch {
                    expected: model.field_type(),
                    found: value.field_type(),
                });
            }
        }
        for (model, &value) in self.fields.iter_mut().zip(row) {
            model.encode(coder, value)?;
        }
        Ok(())
    }

    /// Decode one attribute row, appending its fields to `out`.
    pub fn decode_row_into<R: Read>(&mut self, coder: &mut Decoder<R>, out: &mut Vec<FieldValue>) -> Result<()> {
        out.reserve(self.fields.len());
        for model in &mut self.fields {
            out.push(model.decode(coder)?);
        }
        Ok(())
    }

    pub fn decode_row<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<Vec<FieldValue>> {
        let mut row = Vec::with_capacity(self.fields.len());
        self.decode_row_into(coder, &mut row)?;
        Ok(row)
    }
}

impl Model for FieldVectorModel {
    type Value = Vec<FieldValue>;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, value: Vec<FieldValue>) -> Result<()> {
        self.encode_row(coder, &value)
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<Vec<FieldValue>> {
        self.decode_row(coder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_types() -> Vec<FieldType> {
        vec![
            FieldType::Float32,
            FieldType::Float32,
            FieldType::Float32,
            FieldType::UInt8,
            FieldType::Int16,
            FieldType::Float64,
            FieldType::Int64,
            FieldType::UInt64,
            FieldType::Int8,
            FieldType::UInt16,
            FieldType::Int32,
            FieldType::UInt32,
        ]
    }

    fn row(i: i32) -> Vec<FieldValue> {
        vec![
            FieldValue::Float32(i as f32 * 0.5),
            FieldValue::Float32(-(i as f32)),
            FieldValue::Float32(if i % 7 == 0 { f32::NAN } else { 1.0 }),
            FieldValue::UInt8((i % 256) as u8),
            FieldValue::Int16(if i % 2 == 0 { i16::MIN } else { i16::MAX }),
            FieldValue::Float64(if i % 5 == 0 { f64::NEG_INFINITY } else { f64::from(i) }),
            FieldValue::Int64(i64::from(i) - 50),
            FieldValue::UInt64(u64::MAX - i as u64),
            FieldValue::Int8(-(i % 100) as i8),
            FieldValue::UInt16(u16::MAX),
            FieldValue::Int32(i * -1000),
            FieldValue::UInt32(0),
        ]
    }

    #[test]
    fn test_field_type_tags() {
        for (i, ty) in FieldType::ALL.iter().enumerate() {
            assert_eq!(*ty as u8, i as u8);
            assert_eq!(FieldType::from_u8(i as u8), Some(*ty));
        }
        assert_eq!(FieldType::from_u8(10), None);
        assert_eq!(FieldType::Float64.byte_width(), 8);
        assert!(FieldType::Float32.is_float());
    }

    #[test]
    fn test_bitwise_equality() {
        assert_eq!(FieldValue::Float64(f64::NAN), FieldValue::Float64(f64::NAN));
        assert_ne!(FieldValue::Float32(0.0), FieldValue::Float32(-0.0));
        assert_ne!(FieldValue::Int8(-1), FieldValue::UInt8(255));
    }

    #[test]
    fn test_model_follows_type() {
        for ty in FieldType::ALL {
            assert_eq!(FieldModel::new(ty).field_type(), ty);
        }
    }

    #[test]
    fn test_row_roundtrip() {
        let types = vertex_types();
        let rows: Vec<Vec<FieldValue>> = (0..200).map(row).collect();

        let mut model = FieldVectorModel::new(&types);
        let mut encoder = Encoder::new(Vec::new());
        for r in &rows {
            model.encode_row(&mut encoder, r).unwrap();
        }
        let bytes = encoder.finish().unwrap();

        let mut model = FieldVectorModel::new(&types);
        let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
        for r in &rows {
            assert_eq!(&model.decode_row(&mut decoder).unwrap(), r);
        }
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut model = FieldVectorModel::new(&[FieldType::Int32, FieldType::Int32]);
        let mut encoder = Encoder::new(Vec::new());
        let err = model
            .encode_row(&mut encoder, &[FieldValue::Int32(1)])
            .unwrap_err();
        assert!(matches!(err, CodecError::RowLength { expected: 2, found: 1 }));
    }

    #[test]
    fn test_field_type_mismatch_codes_nothing() {
        let mut model = FieldVectorModel::new(&[FieldType::UInt8, FieldType::Float32]);
        let mut encoder = Encoder::new(Vec::new());
        let err = model
            .encode_row(&mut encoder, &[FieldValue::UInt8(1), FieldValue::Float64(1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::FieldTypeMismatch {
                expected: FieldType::Float32,
                found: FieldType::Float64
            }
        ));
        // The valid first field must not have been coded.
        let bytes = encoder.finish().unwrap();
        assert_eq!(bytes, vec![0; 8]);
    }
}
