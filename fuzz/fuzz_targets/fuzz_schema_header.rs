#![no_main]
use harry::schema::header::{read_schema, write_schema};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok((schema, consumed)) = read_schema(data) else {
        return;
    };
    assert!(consumed <= data.len());

    // Anything accepted must re-serialize to a header that reads back the same.
    let mut bytes = Vec::new();
    write_schema(&mut bytes, &schema).unwrap();
    let (again, _) = read_schema(&bytes).unwrap();
    assert_eq!(again, schema);
});
