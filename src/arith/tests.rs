//! Coder-level round-trip scenarios.

use super::*;

/// Deterministic xorshift stream for test data.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

fn abc_table() -> AdaptiveTable {
    let mut table = AdaptiveTable::with_capacity(3);
    for s in 0..3 {
        table.init(s);
    }
    table
}

fn encode_adaptive(mut table: AdaptiveTable, symbols: &[u32]) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new());
    for &s in symbols {
        encoder.encode_symbol(&table, s).unwrap();
        table.increment(s);
    }
    encoder.finish().unwrap()
}

fn decode_adaptive(mut table: AdaptiveTable, bytes: &[u8], count: usize) -> Vec<u32> {
    let mut decoder = Decoder::new(bytes).unwrap();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let s = decoder.decode_symbol(&table).unwrap();
        table.increment(s);
        out.push(s);
    }
    assert_eq!(decoder.padded_bytes(), 0, "decoder ran past the stream");
    out
}

#[test]
fn test_abca_example() {
    const A: u32 = 0;
    const B: u32 = 1;
    const C: u32 = 2;
    let message = [A, B, C, A];

    let bytes = encode_adaptive(abc_table(), &message);
    assert!(bytes.len() > 8, "renormalization bits precede the 64 flushed bits");
    assert_eq!(decode_adaptive(abc_table(), &bytes, message.len()), message);
}

#[test]
fn test_empty_message() {
    let bytes = encode_adaptive(abc_table(), &[]);
    assert_eq!(bytes, vec![0; 8]);
    assert!(decode_adaptive(abc_table(), &bytes, 0).is_empty());
}

#[test]
fn test_flush_is_idempotent() {
    let mut encoder = Encoder::new(Vec::new());
    let table = abc_table();
    for s in [0, 2, 2, 1, 0] {
        encoder.encode_symbol(&table, s).unwrap();
    }
    encoder.flush().unwrap();
    let after_first = encoder.bytes_written();
    encoder.flush().unwrap();
    assert_eq!(encoder.bytes_written(), after_first);
    assert!(encoder.is_flushed());

    let bytes = encoder.finish().unwrap();
    assert_eq!(bytes.len() as u64, after_first);
}

#[test]
fn test_drop_flushes_borrowed_sink() {
    let mut sink = Vec::new();
    {
        let mut encoder = Encoder::new(&mut sink);
        encoder.encode(0, 1, 3).unwrap();
    }
    // One renormalization bit plus 64 flushed bits.
    assert_eq!(sink.len(), 9);

    let mut decoder = Decoder::new(sink.as_slice()).unwrap();
    assert_eq!(decoder.decode_target(3), 0);
}

#[test]
fn test_raw_interface_with_static_model() {
    // Fixed three-symbol model: [0, 5) [5, 7) [7, 8).
    let ranges = [(0u64, 5u64), (5, 7), (7, 8)];
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let message: Vec<usize> = (0..2000).map(|_| (rng.next() % 3) as usize).collect();

    let mut encoder = Encoder::new(Vec::new());
    for &i in &message {
        let (low, high) = ranges[i];
        encoder.encode(low, high, 8).unwrap();
    }
    let bytes = encoder.finish().unwrap();

    let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
    for &i in &message {
        let target = decoder.decode_target(8);
        let found = ranges.iter().position(|&(l, h)| l <= target && target < h).unwrap();
        assert_eq!(found, i);
        let (low, high) = ranges[found];
        decoder.consume(low, high, 8).unwrap();
    }
}

#[test]
fn test_skewed_stream_resolves_carries() {
    // A dominant symbol keeps the interval hovering around HALF, which
    // exercises long runs of outstanding bits.
    let mut table = AdaptiveTable::new();
    table.set(0, 1);
    table.set(1, 1_000_000);
    table.set(2, 1);

    let mut rng = XorShift(42);
    let message: Vec<u32> = (0..20_000)
        .map(|_| match rng.next() % 1000 {
            0 => 0,
            1 => 2,
            _ => 1,
        })
        .collect();

    let mut encoder = Encoder::new(Vec::new());
    for &s in &message {
        encoder.encode_symbol(&table, s).unwrap();
    }
    let bytes = encoder.finish().unwrap();
    assert!(bytes.len() < message.len() / 8, "skewed source should compress");

    let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
    for &s in &message {
        assert_eq!(decoder.decode_symbol(&table).unwrap(), s);
    }
}

#[test]
fn test_adaptive_random_roundtrip() {
    let mut table = AdaptiveTable::new();
    for s in 0..40 {
        table.init(s);
    }
    let mut rng = XorShift(7);
    let message: Vec<u32> = (0..10_000)
        .map(|_| {
            let r = rng.next();
            // Roughly geometric over the alphabet.
            ((r % 40) * ((r >> 32) & 0xF) / 15) as u32
        })
        .collect();

    let bytes = encode_adaptive(table.clone(), &message);
    assert_eq!(decode_adaptive(table, &bytes, message.len()), message);
}

#[test]
fn test_large_counts_keep_precision() {
    // Totals around 2^42 still leave r = R / total >= 2^20.
    let mut table = AdaptiveTable::new();
    table.set(0, 1 << 40);
    table.set(1, 3 << 40);
    table.set(2, 1);
    table.set(3, 12345);

    let mut rng = XorShift(99);
    let message: Vec<u32> = (0..5000).map(|_| (rng.next() % 4) as u32).collect();

    let bytes = encode_adaptive(table.clone(), &message);
    assert_eq!(decode_adaptive(table, &bytes, message.len()), message);
}

#[test]
fn test_total_at_precision_limit() {
    let mut table = AdaptiveTable::new();
    table.set(0, MAX_TOTAL - 2);
    table.set(1, 1);
    table.set(2, 1);
    assert_eq!(table.total(), MAX_TOTAL);

    let message = [1u32, 2, 0, 1, 1, 2, 0, 0];
    let mut encoder = Encoder::new(Vec::new());
    for &s in &message {
        encoder.encode_symbol(&table, s).unwrap();
    }
    let bytes = encoder.finish().unwrap();

    let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
    for &s in &message {
        assert_eq!(decoder.decode_symbol(&table).unwrap(), s);
    }
}

#[test]
fn test_unregistered_symbol_is_reported() {
    let table = abc_table();
    let mut encoder = Encoder::new(Vec::new());
    let err = encoder.encode_symbol(&table, 3).unwrap_err();
    assert!(matches!(err, crate::CodecError::UnregisteredSymbol(3)));
}
