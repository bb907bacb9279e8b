//! Per-mesh model bundle.

use std::io::{Read, Write};

use super::connectivity::{ConnectivityModel, InitOpModel};
use super::field::FieldVectorModel;
use crate::arith::{Decoder, Encoder, Model, ScalarModel};
use crate::error::{CodecError, Result};
use crate::schema::{AttrListSchema, AttrTarget, MeshSchema};

/// Context depth tracked by the connectivity model.
pub const MAX_ORDER: usize = 8;

/// How an attribute row is represented in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AttrEncoding {
    /// Fresh values, coded field by field.
    Data = 0,
    /// Index into the list's global history of coded rows.
    GlobalHistory = 1,
    /// Index into the per-vertex history of corner rows. Corner lists only.
    LocalHistory = 2,
}

impl AttrEncoding {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Data),
            1 => Some(Self::GlobalHistory),
            2 => Some(Self::LocalHistory),
            _ => None,
        }
    }
}

/// Adaptive model for [`AttrEncoding`].
#[derive(Debug, Clone)]
pub struct AttrEncodingModel {
    inner: ScalarModel<u8>,
}

impl AttrEncodingModel {
    /// Model over the encodings available for a list with `target`.
    pub fn new(target: AttrTarget) -> Self {
        let mut inner = ScalarModel::sparse();
        inner.init(AttrEncoding::Data as u8);
        inner.init(AttrEncoding::GlobalHistory as u8);
        if target == AttrTarget::Corner {
            inner.init(AttrEncoding::LocalHistory as u8);
        }
        Self { inner }
    }

    pub fn accepts(&self, encoding: AttrEncoding) -> bool {
        self.inner.accepts(encoding as u8)
    }
}

impl Model for AttrEncodingModel {
    type Value = AttrEncoding;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, encoding: AttrEncoding) -> Result<()> {
        self.inner.encode(coder, encoding as u8)
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<AttrEncoding> {
        let v = self.inner.decode(coder)?;
        AttrEncoding::from_u8(v).ok_or(CodecError::InvalidSymbol(u32::from(v)))
    }
}

/// Models for one attribute list.
#[derive(Debug, Clone)]
pub struct AttrListModels {
    pub target: AttrTarget,
    pub encoding: AttrEncodingModel,
    pub global_history: ScalarModel<u32>,
    pub local_history: ScalarModel<u16>,
    pub data: FieldVectorModel,
}

impl AttrListModels {
    pub fn new(list: &AttrListSchema) -> Self {
        Self {
            target: list.target,
            encoding: AttrEncodingModel::new(list.target),
            global_history: ScalarModel::new(),
            local_history: ScalarModel::new(),
            data: FieldVectorModel::new(&list.fields),
        }
    }
}

/// Every model one mesh coding session needs.
///
/// Encoder and decoder each build a bundle from the same [`MeshSchema`];
/// the schema-derived alphabets are registered in the same order on both
/// sides, so nothing about them is stored in the stream.
#[derive(Debug, Clone)]
pub struct MeshModels {
    /// Cut-border operations, blended by context order.
    pub conn_op: ConnectivityModel<MAX_ORDER>,
    /// Component start operations.
    pub conn_init: InitOpModel,
    pub conn_elem: ScalarModel<u32>,
    pub conn_part: ScalarModel<u16>,
    pub conn_vert: ScalarModel<u32>,
    /// Triangles per face (face degree minus 2).
    pub conn_numtri: ScalarModel<u16>,
    pub conn_face_region: ScalarModel<u16>,
    pub conn_vertex_region: ScalarModel<u16>,
    /// One entry per attribute list, in schema order.
    pub lists: Vec<AttrListModels>,
}

impl MeshModels {
    pub fn new(schema: &MeshSchema) -> Result<Self> {
        schema.validate()?;

        let mut conn_numtri = ScalarModel::sparse();
        for &degree in &schema.face_degrees {
            conn_numtri.init((degree - 2) as u16);
        }
        let mut conn_face_region = ScalarModel::sparse();
        for region in 0..schema.num_face_regions {
            conn_face_region.init(region as u16);
        }
        let mut conn_vertex_region = ScalarModel::sparse();
        for region in 0..schema.num_vertex_regions {
            conn_vertex_region.init(region as u16);
        }

        let lists: Vec<AttrListModels> = schema.lists.iter().map(AttrListModels::new).collect();

        log::debug!(
            "built mesh models: {} face degrees, {}/{} face/vertex regions, {} attribute lists",
            schema.face_degrees.len(),
            schema.num_face_regions,
            schema.num_vertex_regions,
            lists.len()
        );

        Ok(Self {
            conn_op: ConnectivityModel::new(),
            conn_init: InitOpModel::new(),
            conn_elem: ScalarModel::new(),
            conn_part: ScalarModel::new(),
            conn_vert: ScalarModel::new(),
            conn_numtri,
            conn_face_region,
            conn_vertex_region,
            lists,
        })
    }

    /// Set the context order for the next connectivity operation.
    #[inline]
    pub fn set_order(&mut self, order: u32) {
        self.conn_op.set_order(order);
    }

    /// Models of attribute list `index`.
    pub fn list(&mut self, index: usize) -> Option<&mut AttrListModels> {
        self.lists.get_mut(index)
    }
}
