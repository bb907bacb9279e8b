//! Entropy-coding core of the Harry mesh compressor.
//!
//! Mesh connectivity and per-vertex/per-corner attributes are coded with a
//! 64-bit arithmetic coder driven by adaptive, context-mixed models.
//!
//! ## Modules
//! - [`arith`] - bit channel, arithmetic coder, adaptive tables, scalar models
//! - [`models`] - field, connectivity and attribute models, and the per-mesh bundle
//! - [`schema`] - mesh schema and the header that ships it ahead of the payload
//! - [`batch`] - independent sessions for blocks of attribute rows
//!
//! ## Features
//! - Core library depends only on `log`
//! - `parallel` - Code row blocks on the rayon pool
//! - `serde` - Serialize/deserialize schema types
//!
//! ## Example
//!
//! ```rust
//! use harry::arith::{Decoder, Encoder, Model};
//! use harry::models::{ConnOp, FieldType, FieldValue, InitOp, MeshModels};
//! use harry::schema::{AttrListSchema, AttrTarget, MeshSchema};
//!
//! let schema = MeshSchema::new()
//!     .with_list(AttrListSchema::new(AttrTarget::Vertex, vec![FieldType::Float32; 3]))
//!     .with_face_degrees([3]);
//!
//! let mut models = MeshModels::new(&schema)?;
//! let mut encoder = Encoder::new(Vec::new());
//! models.conn_init.encode(&mut encoder, InitOp::Triangle { borders: 0 })?;
//! models.set_order(3);
//! models.conn_op.encode(&mut encoder, ConnOp::NewVertex)?;
//! models.lists[0].data.encode_row(&mut encoder, &[FieldValue::Float32(1.0); 3])?;
//! let bytes = encoder.finish()?;
//!
//! let mut models = MeshModels::new(&schema)?;
//! let mut decoder = Decoder::new(bytes.as_slice())?;
//! assert_eq!(models.conn_init.decode(&mut decoder)?, InitOp::Triangle { borders: 0 });
//! models.set_order(3);
//! assert_eq!(models.conn_op.decode(&mut decoder)?, ConnOp::NewVertex);
//! assert_eq!(models.lists[0].data.decode_row(&mut decoder)?, [FieldValue::Float32(1.0); 3]);
//! # Ok::<(), harry::CodecError>(())
//! ```

pub mod arith;
pub mod batch;
pub mod error;
pub mod models;
pub mod schema;

pub use error::{CodecError, Result};

pub use arith::{AdaptiveTable, Decoder, Encoder, FrequencyTable, Model};
pub use models::{FieldType, FieldValue, MeshModels};
pub use schema::MeshSchema;
