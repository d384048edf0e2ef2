use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use z3950_grammar::z3950::{PDU, RPN_STRUCTURE};
use z3950_transcoder::ber::Ber;

const SEARCH_REQUEST: [u8; 73] = [
    0xB6, 0x47, 0x8D, 0x01, 0x00, 0x8E, 0x01, 0x01, 0x8F, 0x01, 0x00, 0x90, 0x01, 0xFF, 0x91,
    0x07, b'd', b'e', b'f', b'a', b'u', b'l', b't', 0xB2, 0x0A, 0x9F, 0x69, 0x07, b'D', b'e',
    b'f', b'a', b'u', b'l', b't', 0xB5, 0x24, 0xA1, 0x22, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE,
    0x13, 0x03, 0x01, 0xA0, 0x17, 0xBF, 0x66, 0x14, 0xBF, 0x2C, 0x0A, 0x30, 0x08, 0x9F, 0x78,
    0x01, 0x01, 0x9F, 0x79, 0x01, 0x04, 0x9F, 0x81, 0x58, 0x03, b'd', b'o', b'g',
];

/// `rpnRpnOp { op, <levels deeper>, and }` nested `levels` times,
/// with a resultSet operand at every leaf.
fn nested_rpn(levels: usize) -> Vec<u8> {
    let operand = [0xA0, 0x05, 0x9F, 0x1F, 0x02, b'r', b's'];
    let and = [0xBF, 0x2E, 0x02, 0x80, 0x00];
    (0..levels).fold(operand.to_vec(), |inner, _| {
        let mut content = operand.to_vec();
        content.extend(&inner);
        content.extend(and);
        let mut encoding = vec![0xA1, 0x80];
        encoding.extend(content);
        encoding.extend([0x00, 0x00]);
        encoding
    })
}

fn decode_search_request(c: &mut Criterion) {
    c.bench_with_input(
        BenchmarkId::new("SearchRequest", SEARCH_REQUEST.len()),
        &SEARCH_REQUEST,
        |b, i| b.iter(|| Ber::decode(&PDU, black_box(i)).unwrap()),
    );
}

fn decode_nested_rpn(c: &mut Criterion) {
    let mut group = c.benchmark_group("RPNStructure");
    for levels in [4, 16, 48] {
        let input = nested_rpn(levels);
        group.bench_with_input(BenchmarkId::from_parameter(levels), &input, |b, i| {
            b.iter(|| Ber::decode(&RPN_STRUCTURE, black_box(i)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, decode_search_request, decode_nested_rpn);
criterion_main!(benches);
