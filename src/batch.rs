//! Independent coding sessions for blocks of attribute rows.
//!
//! Each block is a complete session: its own coder, its own
//! [`FieldVectorModel`], its own byte stream. Blocks therefore share no
//! adaptive state and can be coded on separate threads. With the `parallel`
//! feature the block functions run on the rayon pool; without it they run
//! in order. The output is identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::arith::{Decoder, Encoder};
use crate::error::Result;
use crate::models::{FieldType, FieldValue, FieldVectorModel};

/// Options for block coding.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Below this many rows in total, blocks are coded on the calling thread.
    pub min_parallel_rows: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            min_parallel_rows: 4096,
        }
    }
}

/// Encode `rows` as one session.
pub fn encode_rows(fields: &[FieldType], rows: &[Vec<FieldValue>]) -> Result<Vec<u8>> {
    let mut model = FieldVectorModel::new(fields);
    let mut encoder = Encoder::new(Vec::new());
    for row in rows {
        model.encode_row(&mut encoder, row)?;
    }
    encoder.finish()
}

/// Decode `count` rows written by [`encode_rows`].
pub fn decode_rows(fields: &[FieldType], data: &[u8], count: usize) -> Result<Vec<Vec<FieldValue>>> {
    let mut model = FieldVectorModel::new(fields);
    let mut decoder = Decoder::new(data)?;
    let rows = (0..count)
        .map(|_| model.decode_row(&mut decoder))
        .collect::<Result<Vec<_>>>()?;
    if decoder.padded_bytes() > 0 {
        log::warn!(
            "row block needed {} bytes beyond its {} byte stream",
            decoder.padded_bytes(),
            data.len()
        );
    }
    Ok(rows)
}

/// Encode each block as its own session.
pub fn encode_blocks(
    fields: &[FieldType],
    blocks: &[Vec<Vec<FieldValue>>],
    options: &BatchOptions,
) -> Result<Vec<Vec<u8>>> {
    let total_rows: usize = blocks.iter().map(Vec::len).sum();

    #[cfg(feature = "parallel")]
    {
        if total_rows >= options.min_parallel_rows && blocks.len() > 1 {
            log::debug!(
                "encoding {} blocks ({} rows) on {} threads",
                blocks.len(),
                total_rows,
                rayon::current_num_threads()
            );
            return blocks
                .par_iter()
                .map(|block| encode_rows(fields, block))
                .collect();
        }
    }

    log::debug!("encoding {} blocks ({} rows) sequentially", blocks.len(), total_rows);
    let _ = options;
    blocks.iter().map(|block| encode_rows(fields, block)).collect()
}

/// Decode blocks written by [`encode_blocks`]; `streams` pairs each block's
/// bytes with its row count.
pub fn decode_blocks(
    fields: &[FieldType],
    streams: &[(&[u8], usize)],
    options: &BatchOptions,
) -> Result<Vec<Vec<Vec<FieldValue>>>> {
    let total_rows: usize = streams.iter().map(|&(_, count)| count).sum();

    #[cfg(feature = "parallel")]
    {
        if total_rows >= options.min_parallel_rows && streams.len() > 1 {
            return streams
                .par_iter()
                .map(|&(data, count)| decode_rows(fields, data, count))
                .collect();
        }
    }

    let _ = (options, total_rows);
    streams
        .iter()
        .map(|&(data, count)| decode_rows(fields, data, count))
        .collect()
}
