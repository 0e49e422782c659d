//! # Jarvis Callback Benchmarks
//!
//! Cost of the per-request crypto path:
//!
//! | Stage | Work |
//! |-------|------|
//! | Signature | sort four strings, SHA-1 |
//! | Encrypt | layout, pad, AES-256-CBC, base64 |
//! | Decrypt | base64, AES-256-CBC, unpad, layout checks |
//! | Envelope | XML parse and serialize |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jv_01_envelope_codec::{decrypt_message, encrypt_message, InboundEnvelope, ReplyEnvelope};
use shared_crypto::{decode_key, signature};
use std::time::Duration;

const TOKEN: &str = "t1";
const AES_KEY: &str = "jWmYm7qr5nMoAUwZRjGtBxmz3KA1tkAj3ykkR6q2B2C";
const CORP_ID: &str = "wx5823bf96d3bd56c7";

fn message_of(size: usize) -> String {
    "消息".repeat(size / 6 + 1).chars().take(size / 3).collect()
}

fn bench_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature");
    let ciphertext = "sKqRbbiSUnDhFHOvPjtUMWzf2R8PrpMiTTPaicBgqZlYW/WsF6SiFd2z9CriX2YpWYzF1yrNNQ0SomM3ovdnfA==";

    group.bench_function("sha1_sorted", |b| {
        b.iter(|| {
            black_box(signature(
                black_box(TOKEN),
                black_box("1409659589"),
                black_box("263014780"),
                black_box(ciphertext),
            ))
        })
    });

    group.finish();
}

fn bench_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload");
    group.measurement_time(Duration::from_secs(5));
    let key = decode_key(AES_KEY).expect("valid key");

    for size in [64usize, 1024, 16 * 1024] {
        let message = message_of(size);
        let ciphertext = encrypt_message(&key, &message, CORP_ID).expect("encrypt");

        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(BenchmarkId::new("encrypt", size), &message, |b, m| {
            b.iter(|| black_box(encrypt_message(&key, m, CORP_ID)))
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &ciphertext, |b, ct| {
            b.iter(|| black_box(decrypt_message(&key, ct)))
        });
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope");
    let key = decode_key(AES_KEY).expect("valid key");

    let inbound = InboundEnvelope {
        to_user_name: Some(CORP_ID.to_string()),
        agent_id: Some("218".to_string()),
        encrypt: encrypt_message(&key, &message_of(512), CORP_ID).expect("encrypt"),
    }
    .to_xml()
    .expect("serialize");

    group.bench_function("parse_inbound", |b| {
        b.iter(|| black_box(InboundEnvelope::parse(black_box(&inbound))))
    });

    group.bench_function("seal_reply", |b| {
        b.iter(|| {
            let reply = ReplyEnvelope::seal(&key, TOKEN, CORP_ID, "<xml/>", "1409659589", "42")
                .expect("seal");
            black_box(reply.to_xml())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_signature, bench_payload, bench_envelope);
criterion_main!(benches);
