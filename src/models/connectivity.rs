//! Connectivity operation models.
//!
//! Mesh topology is coded as a sequence of cut-border machine operations.
//! Each connected component starts with one [`InitOp`], followed by one
//! [`ConnOp`] per processed cut-border edge. The main model blends a global
//! adaptive distribution with per-order statistics for the two operations
//! that dominate typical meshes: "new vertex" and "connect forward".

use std::io::{Read, Write};

use crate::arith::{AdaptiveTable, Decoder, Encoder, Model};
use crate::error::{CodecError, Result};

/// Operations that start a connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitOp {
    /// Start a component with one triangle.
    ///
    /// Bit `k` of `borders` is set when edge `k` of the triangle lies on the
    /// mesh border.
    Triangle { borders: u8 },
    /// No further components.
    EndOfMesh,
}

impl InitOp {
    /// Number of distinct operations.
    pub const COUNT: u32 = 9;

    pub fn symbol(self) -> u32 {
        match self {
            Self::Triangle { borders } => u32::from(borders & 0b111),
            Self::EndOfMesh => 8,
        }
    }

    pub fn from_symbol(symbol: u32) -> Option<Self> {
        match symbol {
            0..=7 => Some(Self::Triangle {
                borders: symbol as u8,
            }),
            8 => Some(Self::EndOfMesh),
            _ => None,
        }
    }
}

/// Cut-border machine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnOp {
    /// The gate edge lies on the mesh border.
    Border = 0,
    /// Close a triangle with the next cut-border vertex.
    ConnectForward = 1,
    /// Close a triangle with the previous cut-border vertex.
    ConnectBackward = 2,
    /// Connect to a vertex further along the same cut-border, splitting it.
    Split = 3,
    /// Connect to a vertex on another cut-border, merging the two.
    Union = 4,
    /// Create a triangle with a fresh vertex.
    NewVertex = 5,
    /// Close a cut-border of three edges.
    Close = 6,
}

impl ConnOp {
    pub const ALL: [ConnOp; 7] = [
        Self::Border,
        Self::ConnectForward,
        Self::ConnectBackward,
        Self::Split,
        Self::Union,
        Self::NewVertex,
        Self::Close,
    ];

    pub fn symbol(self) -> u32 {
        self as u32
    }

    pub fn from_symbol(symbol: u32) -> Option<Self> {
        Self::ALL.get(symbol as usize).copied()
    }
}

/// Plain adaptive model for [`InitOp`].
#[derive(Debug, Clone)]
pub struct InitOpModel {
    stats: AdaptiveTable,
}

impl InitOpModel {
    pub fn new() -> Self {
        let mut stats = AdaptiveTable::with_capacity(InitOp::COUNT as usize);
        for symbol in 0..InitOp::COUNT {
            stats.init(symbol);
        }
        Self { stats }
    }

    pub fn stats(&self) -> &AdaptiveTable {
        &self.stats
    }
}

impl Default for InitOpModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for InitOpModel {
    type Value = InitOp;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, op: InitOp) -> Result<()> {
        let symbol = op.symbol();
        coder.encode_symbol(&self.stats, symbol)?;
        self.stats.increment(symbol);
        Ok(())
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<InitOp> {
        let symbol = coder.decode_symbol(&self.stats)?;
        self.stats.increment(symbol);
        InitOp::from_symbol(symbol).ok_or(CodecError::InvalidSymbol(symbol))
    }
}

/// Context-blended model for [`ConnOp`].
///
/// The counts of [`ConnOp::NewVertex`] and [`ConnOp::ConnectForward`] in the
/// shared table are overwritten before every symbol: their combined mass is
/// the running total `c`, split in the ratio observed for the current order.
/// Orders at or above `MAX_ORDER` share the last bucket.
#[derive(Debug, Clone)]
pub struct ConnectivityModel<const MAX_ORDER: usize = 8> {
    stats: AdaptiveTable,
    /// Occurrences of the two blended operations, plus 2.
    blend_total: u64,
    new_vertex: [u64; MAX_ORDER],
    connect_forward: [u64; MAX_ORDER],
    order: u32,
}

impl<const MAX_ORDER: usize> ConnectivityModel<MAX_ORDER> {
    pub fn new() -> Self {
        let mut stats = AdaptiveTable::with_capacity(ConnOp::ALL.len());
        for op in ConnOp::ALL {
            stats.init(op.symbol());
        }
        Self {
            stats,
            blend_total: 2,
            new_vertex: [1; MAX_ORDER],
            connect_forward: [1; MAX_ORDER],
            order: 0,
        }
    }

    /// Set the context order (local degree) for the next operation.
    #[inline]
    pub fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Bucket used for `order`.
    #[inline]
    pub fn context_index(order: u32) -> usize {
        (order.saturating_sub(1) as usize).min(MAX_ORDER - 1)
    }

    /// Split of the blend total between new-vertex and connect-forward for
    /// the current order.
    pub fn blended_counts(&self) -> (u64, u64) {
        let i = Self::context_index(self.order);
        let c = u128::from(self.blend_total);
        let n = u128::from(self.new_vertex[i]);
        let f = u128::from(self.connect_forward[i]);
        let new_vertex = (n * c / (n + f)) as u64;
        (new_vertex, self.blend_total - new_vertex)
    }

    #[inline]
    fn apply_blend(&mut self) {
        let (new_vertex, connect_forward) = self.blended_counts();
        self.stats.set(ConnOp::NewVertex.symbol(), new_vertex);
        self.stats.set(ConnOp::ConnectForward.symbol(), connect_forward);
    }

    #[inline]
    fn update(&mut self, op: ConnOp) {
        let i = Self::context_index(self.order);
        match op {
            ConnOp::NewVertex => {
                self.blend_total += 1;
                self.new_vertex[i] += 1;
            }
            ConnOp::ConnectForward => {
                self.blend_total += 1;
                self.connect_forward[i] += 1;
            }
            _ => self.stats.increment(op.symbol()),
        }
    }

    pub fn blend_total(&self) -> u64 {
        self.blend_total
    }

    /// `(new_vertex, connect_forward)` counters of one bucket.
    pub fn order_counts(&self, index: usize) -> (u64, u64) {
        (self.new_vertex[index], self.connect_forward[index])
    }

    pub fn stats(&self) -> &AdaptiveTable {
        &self.stats
    }
}

impl<const MAX_ORDER: usize> Default for ConnectivityModel<MAX_ORDER> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_ORDER: usize> Model for ConnectivityModel<MAX_ORDER> {
    type Value = ConnOp;

    fn encode<W: Write>(&mut self, coder: &mut Encoder<W>, op: ConnOp) -> Result<()> {
        self.apply_blend();
        coder.encode_symbol(&self.stats, op.symbol())?;
        self.update(op);
        Ok(())
    }

    fn decode<R: Read>(&mut self, coder: &mut Decoder<R>) -> Result<ConnOp> {
        self.apply_blend();
        let symbol = coder.decode_symbol(&self.stats)?;
        let op = ConnOp::from_symbol(symbol).ok_or(CodecError::InvalidSymbol(symbol))?;
        self.update(op);
        Ok(op)
    }
}
