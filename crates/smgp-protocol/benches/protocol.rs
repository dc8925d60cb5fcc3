//! Benchmarks for SMGP protocol encoding and decoding.

#![allow(clippy::unwrap_used, missing_docs)]

use bytes::{Bytes, BytesMut};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use smgp_protocol::{Header, Packet, RequestId, Submit, Tag, Options};

fn sample_submit() -> Submit {
    let mut options = Options::new();
    options.insert(Tag::TpUdhi, Bytes::from_static(&[0]));
    Submit {
        msg_type: 6,
        need_report: 1,
        priority: 0,
        service_id: "bench".to_string(),
        fee_type: "01".to_string(),
        fee_code: "000001".to_string(),
        fixed_fee: "000000".to_string(),
        msg_format: 8,
        valid_time: String::new(),
        at_time: String::new(),
        src_term_id: "10000".to_string(),
        charge_term_id: "13800138000".to_string(),
        dest_term_ids: vec!["13800138000".to_string()],
        msg_content: Bytes::from_static(b"hello, world"),
        reserve: String::new(),
        options,
    }
}

fn bench_header_encode(c: &mut Criterion) {
    let header = Header::new(RequestId::Submit as u32, 1);
    c.bench_function("header_encode", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(12);
            header.encode(&mut buf);
            black_box(buf)
        })
    });
}

fn bench_header_decode(c: &mut Criterion) {
    let header = Header::new(RequestId::Submit as u32, 1);
    let encoded = header.encode_to_bytes();

    c.bench_function("header_decode", |b| {
        b.iter(|| {
            let mut cursor = encoded.clone();
            let decoded = Header::decode(&mut cursor).unwrap();
            black_box(decoded)
        })
    });
}

fn bench_submit_encode(c: &mut Criterion) {
    let submit = sample_submit();
    let packet = Packet::Submit(submit.clone());
    c.benchmark_group("submit_encode")
        .throughput(Throughput::Bytes(submit.body_len() as u64))
        .bench_function("full_frame", |b| {
            b.iter(|| black_box(packet.encode(1)))
        });
}

fn bench_submit_decode(c: &mut Criterion) {
    let packet = Packet::Submit(sample_submit());
    let encoded = packet.encode(1).freeze();

    c.bench_function("submit_decode", |b| {
        b.iter(|| {
            let mut cursor = encoded.clone();
            let header = Header::decode(&mut cursor).unwrap();
            let decoded = Packet::decode_body(&header, &mut cursor).unwrap();
            black_box(decoded)
        })
    });
}

criterion_group!(
    benches,
    bench_header_encode,
    bench_header_decode,
    bench_submit_encode,
    bench_submit_decode,
);

criterion_main!(benches);
