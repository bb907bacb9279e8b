//! Mesh schema: everything both sides must know before models exist.
//!
//! The schema is produced by whoever owns the mesh (a format reader) and is
//! shipped ahead of the coded payload with [`header::write_schema`].

pub mod header;
mod vint;

pub use vint::{read_vint, write_vint, VintReader};

use std::collections::BTreeSet;

use crate::error::{CodecError, Result};
use crate::models::FieldType;

/// Element an attribute list is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum AttrTarget {
    Vertex = 0,
    Corner = 1,
}

impl AttrTarget {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Vertex),
            1 => Some(Self::Corner),
            _ => None,
        }
    }
}

/// Layout of one attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrListSchema {
    pub target: AttrTarget,
    /// Field types of one row, in coding order.
    pub fields: Vec<FieldType>,
}

impl AttrListSchema {
    pub fn new(target: AttrTarget, fields: Vec<FieldType>) -> Self {
        Self { target, fields }
    }
}

/// Structure of one mesh as seen by the models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeshSchema {
    pub lists: Vec<AttrListSchema>,
    /// Distinct face degrees (vertices per face) present in the mesh.
    pub face_degrees: BTreeSet<u32>,
    pub num_face_regions: u32,
    pub num_vertex_regions: u32,
}

impl MeshSchema {
    /// Largest degree whose triangle count fits the `u16` triangle model.
    pub const MAX_FACE_DEGREE: u32 = u16::MAX as u32 + 2;
    /// Region ids are coded as `u16`.
    pub const MAX_REGIONS: u32 = u16::MAX as u32 + 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: AttrListSchema) -> Self {
        self.lists.push(list);
        self
    }

    pub fn with_face_degrees(mut self, degrees: impl IntoIterator<Item = u32>) -> Self {
        self.face_degrees.extend(degrees);
        self
    }

    pub fn with_regions(mut self, face_regions: u32, vertex_regions: u32) -> Self {
        self.num_face_regions = face_regions;
        self.num_vertex_regions = vertex_regions;
        self
    }

    /// Check that every schema constant fits the model it seeds.
    pub fn validate(&self) -> Result<()> {
        if let Some(&degree) = self.face_degrees.iter().find(|&&d| !(3..=Self::MAX_FACE_DEGREE).contains(&d)) {
            return Err(CodecError::InvalidSchema(format!(
                "face degree {} outside 3..={}",
                degree,
                Self::MAX_FACE_DEGREE
            )));
        }
        if self.num_face_regions > Self::MAX_REGIONS {
            return Err(CodecError::InvalidSchema(format!(
                "{} face regions exceed {}",
                self.num_face_regions,
                Self::MAX_REGIONS
            )));
        }
        if self.num_vertex_regions > Self::MAX_REGIONS {
            return Err(CodecError::InvalidSchema(format!(
                "{} vertex regions exceed {}",
                self.num_vertex_regions,
                Self::MAX_REGIONS
            )));
        }
        Ok(())
    }
}
