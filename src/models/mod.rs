//! Mesh models built on the arithmetic coder.
//!
//! | Model | Codes |
//! |-------|-------|
//! | [`FieldModel`] / [`FieldVectorModel`] | Attribute fields / rows |
//! | [`InitOpModel`] | Component start operations |
//! | [`ConnectivityModel`] | Cut-border operations, blended by context order |
//! | [`AttrEncodingModel`] | How an attribute row is represented |
//! | [`MeshModels`] | All of the above for one mesh |

mod bundle;
mod connectivity;
mod field;

pub use bundle::{AttrEncoding, AttrEncodingModel, AttrListModels, MeshModels, MAX_ORDER};
pub use connectivity::{ConnOp, ConnectivityModel, InitOp, InitOpModel};
pub use field::{FieldModel, FieldType, FieldValue, FieldVectorModel};
