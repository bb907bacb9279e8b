//! Schema header written ahead of the arithmetic-coded payload.
//!
//! ```text
//! "HRY" | version | vint face regions | vint vertex regions
//!       | vint degree count | vint degree...
//!       | vint list count | (target byte | vint field count | type byte...)...
//! ```

use std::io::Write;

use super::vint::{write_vint, VintReader};
use super::{AttrListSchema, AttrTarget, MeshSchema};
use crate::error::{CodecError, Result};
use crate::models::FieldType;

pub const MAGIC: &[u8; 3] = b"HRY";
pub const VERSION: u8 = 1;

/// Write `schema` to `out`. Returns the number of bytes written.
pub fn write_schema<W: Write>(out: &mut W, schema: &MeshSchema) -> Result<usize> {
    schema.validate()?;

    out.write_all(MAGIC)?;
    out.write_all(&[VERSION])?;
    let mut written = MAGIC.len() + 1;

    written += write_vint(out, u64::from(schema.num_face_regions))?;
    written += write_vint(out, u64::from(schema.num_vertex_regions))?;

    written += write_vint(out, schema.face_degrees.len() as u64)?;
    for &degree in &schema.face_degrees {
        written += write_vint(out, u64::from(degree))?;
    }

    written += write_vint(out, schema.lists.len() as u64)?;
    for list in &schema.lists {
        out.write_all(&[list.target as u8])?;
        written += 1;
        written += write_vint(out, list.fields.len() as u64)?;
        let tags: Vec<u8> = list.fields.iter().map(|&ty| ty as u8).collect();
        out.write_all(&tags)?;
        written += tags.len();
    }

    Ok(written)
}

/// Read a schema header from the start of `data`.
///
/// Returns the schema and the offset where the coded payload begins.
pub fn read_schema(data: &[u8]) -> Result<(MeshSchema, usize)> {
    if data.len() < MAGIC.len() + 1 {
        return Err(CodecError::UnexpectedEof);
    }
    if !data.starts_with(MAGIC) {
        return Err(CodecError::InvalidSignature);
    }
    let version = data[MAGIC.len()];
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let mut reader = VintReader::new(&data[MAGIC.len() + 1..]);
    let mut schema = MeshSchema::new();
    schema.num_face_regions = reader.read_u32()?;
    schema.num_vertex_regions = reader.read_u32()?;

    let degree_count = reader.read()?;
    for _ in 0..degree_count {
        schema.face_degrees.insert(reader.read_u32()?);
    }

    let list_count = reader.read()?;
    for _ in 0..list_count {
        let tag = reader.read_u8()?;
        let target = AttrTarget::from_u8(tag).ok_or(CodecError::UnknownTarget(tag))?;
        let field_count = reader.read()?;
        let tags = reader.read_bytes(usize::try_from(field_count).map_err(|_| CodecError::VintOverflow)?)?;
        let fields = tags
            .iter()
            .map(|&t| FieldType::from_u8(t).ok_or(CodecError::UnknownFieldType(t)))
            .collect::<Result<Vec<_>>>()?;
        schema.lists.push(AttrListSchema::new(target, fields));
    }

    schema.validate()?;
    let consumed = MAGIC.len() + 1 + reader.position();
    log::trace!(
        "read schema header: {} bytes, {} attribute lists",
        consumed,
        schema.lists.len()
    );
    Ok((schema, consumed))
}
