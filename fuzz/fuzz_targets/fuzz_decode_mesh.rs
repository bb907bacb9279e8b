#![no_main]
use harry::arith::{Decoder, Model};
use harry::models::{FieldType, MeshModels};
use harry::schema::{AttrListSchema, AttrTarget, MeshSchema};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Byte 0: number of steps; byte 1: field type of the corner list;
    // bytes 2..4: region counts. The rest is the coded payload.
    let steps = usize::from(data[0]) * 4;
    let field = FieldType::ALL[usize::from(data[1]) % FieldType::ALL.len()];
    let schema = MeshSchema::new()
        .with_list(AttrListSchema::new(AttrTarget::Vertex, vec![FieldType::Float32; 3]))
        .with_list(AttrListSchema::new(AttrTarget::Corner, vec![field, FieldType::UInt8]))
        .with_face_degrees([3, 4, 5])
        .with_regions(u32::from(data[2]), u32::from(data[3]));

    let Ok(mut models) = MeshModels::new(&schema) else {
        return;
    };
    let Ok(mut decoder) = Decoder::new(&data[4..]) else {
        return;
    };

    let _ = models.conn_init.decode(&mut decoder);
    for step in 0..steps {
        models.set_order(step as u32 % 11);
        let _ = models.conn_op.decode(&mut decoder);
        let _ = models.conn_numtri.decode(&mut decoder);
        if schema.num_face_regions > 0 {
            let _ = models.conn_face_region.decode(&mut decoder);
        }
        if schema.num_vertex_regions > 0 {
            let _ = models.conn_vertex_region.decode(&mut decoder);
        }
        let _ = models.conn_elem.decode(&mut decoder);
        for list in &mut models.lists {
            let _ = list.encoding.decode(&mut decoder);
            let _ = list.data.decode_row(&mut decoder);
            let _ = list.global_history.decode(&mut decoder);
        }
        if decoder.padded_bytes() > 64 {
            break;
        }
    }
});
