#![no_main]
use harry::arith::{Decoder, Encoder, Model};
use harry::models::{ConnOp, ConnectivityModel, FieldType, FieldValue, FieldVectorModel, MAX_ORDER};
use libfuzzer_sys::fuzz_target;

fn row(chunk: &[u8]) -> Vec<FieldValue> {
    let word = u64::from_le_bytes(chunk[1..9].try_into().unwrap());
    vec![
        FieldValue::Float64(f64::from_bits(word)),
        FieldValue::Int16(word as i16),
        FieldValue::UInt32((word >> 16) as u32),
    ]
}

fuzz_target!(|data: &[u8]| {
    let fields = [FieldType::Float64, FieldType::Int16, FieldType::UInt32];
    let chunks: Vec<&[u8]> = data.chunks_exact(9).collect();

    let mut bytes = Vec::new();
    {
        let mut ops = ConnectivityModel::<MAX_ORDER>::new();
        let mut rows = FieldVectorModel::new(&fields);
        let mut encoder = Encoder::new(&mut bytes);
        for chunk in &chunks {
            let op = ConnOp::ALL[usize::from(chunk[0] & 0x0F) % ConnOp::ALL.len()];
            ops.set_order(u32::from(chunk[0] >> 4));
            ops.encode(&mut encoder, op).unwrap();
            rows.encode_row(&mut encoder, &row(chunk)).unwrap();
        }
        encoder.finish().unwrap();
    }

    let mut ops = ConnectivityModel::<MAX_ORDER>::new();
    let mut rows = FieldVectorModel::new(&fields);
    let mut decoder = Decoder::new(bytes.as_slice()).unwrap();
    for chunk in &chunks {
        let op = ConnOp::ALL[usize::from(chunk[0] & 0x0F) % ConnOp::ALL.len()];
        ops.set_order(u32::from(chunk[0] >> 4));
        assert_eq!(ops.decode(&mut decoder).unwrap(), op);
        assert_eq!(rows.decode_row(&mut decoder).unwrap(), row(chunk));
    }
    assert_eq!(decoder.padded_bytes(), 0);
});
