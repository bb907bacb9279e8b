//! Adaptive frequency tables.
//!
//! A table maps a small alphabet of `u32` symbol ids to running counts and
//! hands the coder cumulative `(low, high)` sub-intervals of `[0, total)`.
//! Symbols are enumerated in the order they were registered, so encoder and
//! decoder must register the same symbols at the same stream positions.

/// Cumulative-frequency view the coder works against.
pub trait FrequencyTable {
    /// Sum of all registered counts.
    fn total(&self) -> u64;

    /// Cumulative interval of `symbol`, or `None` if it is not registered.
    fn range(&self, symbol: u32) -> Option<(u64, u64)>;

    /// Symbol whose interval contains `target`, with that interval.
    ///
    /// Returns `None` only when `target >= total()`.
    fn symbol_for(&self, target: u64) -> Option<(u32, u64, u64)>;
}

/// Growable adaptive statistics table.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveTable {
    /// Symbol ids in registration order.
    symbols: Vec<u32>,
    /// Counts, parallel to `symbols`.
    counts: Vec<u64>,
    /// Symbol id -> position in `symbols`.
    slots: Vec<Option<usize>>,
    total: u64,
}

impl AdaptiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for symbol ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
            counts: Vec::with_capacity(capacity),
            slots: vec![None; capacity],
            total: 0,
        }
    }

    #[inline]
    fn slot(&self, symbol: u32) -> Option<usize> {
        self.slots.get(symbol as usize).copied().flatten()
    }

    fn register(&mut self, symbol: u32, count: u64) -> usize {
        let id = symbol as usize;
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
        }
        let pos = self.symbols.len();
        self.slots[id] = Some(pos);
        self.symbols.push(symbol);
        self.counts.push(count);
        self.total += count;
        pos
    }

    /// Register `symbol` with count 1. Registering twice is a no-op.
    pub fn init(&mut self, symbol: u32) {
        if self.slot(symbol).is_none() {
            self.register(symbol, 1);
        }
    }

    /// Add one to the count of a registered symbol.
    #[inline]
    pub fn increment(&mut self, symbol: u32) {
        match self.slot(symbol) {
            Some(pos) => {
                self.counts[pos] += 1;
                self.total += 1;
            }
            None => debug_assert!(false, "increment of unregistered symbol {}", symbol),
        }
    }

    /// Overwrite the count of `symbol`, registering it at the end if needed.
    #[inline]
    pub fn set(&mut self, symbol: u32, count: u64) {
        match self.slot(symbol) {
            Some(pos) => {
                self.total = self.total - self.counts[pos] + count;
                self.counts[pos] = count;
            }
            None => {
                self.register(symbol, count);
            }
        }
    }

    /// Current count of `symbol`, if registered.
    pub fn count(&self, symbol: u32) -> Option<u64> {
        self.slot(symbol).map(|pos| self.counts[pos])
    }

    pub fn is_registered(&self, symbol: u32) -> bool {
        self.slot(symbol).is_some()
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Registered symbols in enumeration order.
    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }
}

impl FrequencyTable for AdaptiveTable {
    #[inline]
    fn total(&self) -> u64 {
        self.total
    }

    fn range(&self, symbol: u32) -> Option<(u64, u64)> {
        let pos = self.slot(symbol)?;
        let low: u64 = self.counts[..pos].iter().sum();
        Some((low, low + self.counts[pos]))
    }

    fn symbol_for(&self, target: u64) -> Option<(u32, u64, u64)> {
        let mut low = 0u64;
        for (&symbol, &count) in self.symbols.iter().zip(&self.counts) {
            let high = low + count;
            if target < high {
                return Some((symbol, low, high));
            }
            low = high;
        }
        None
    }
}
