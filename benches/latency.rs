//! Latency benchmarks for signing and payment-parameter building.
//!
//! Run with: `cargo bench --bench latency`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use retail_pay_core::signing::{
    pay_signature, user_signature, AppSecret, SessionKey, REQUEST_COMMON_PAYMENT_URI,
};
use retail_pay_core::{CombinedPaymentRequest, PaymentBuilder, SubOrder};

/// Generate a synthetic order body of roughly `size` bytes.
fn generate_body(size: usize) -> Vec<u8> {
    let description = "x".repeat(size.saturating_sub(40));
    serde_json::to_vec(&json!({"itemId": "A1", "amount": 100, "description": description}))
        .unwrap()
}

/// Generate a combined request with `count` sub-orders.
fn generate_combined(count: usize) -> CombinedPaymentRequest {
    CombinedPaymentRequest::new(
        (0..count)
            .map(|i| {
                SubOrder::new(format!("19000000{:02}", i))
                    .with_field("out_trade_no", format!("T-{}", i))
                    .with_field("amount", json!({"order_amount": 100 + i}))
            })
            .collect(),
    )
    .with_field("env", 0)
}

/// Benchmark raw signature computation across body sizes.
fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("signatures");
    let app_secret = AppSecret::new("key123");
    let session_key = SessionKey::new("sk_test");

    for size in [64, 512, 4096].iter() {
        let body = generate_body(*size);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(BenchmarkId::new("pay_signature", size), &body, |b, body| {
            b.iter(|| {
                pay_signature(
                    black_box(REQUEST_COMMON_PAYMENT_URI),
                    black_box(body),
                    &app_secret,
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("user_signature", size), &body, |b, body| {
            b.iter(|| user_signature(black_box(body), &session_key))
        });
    }

    group.finish();
}

/// Benchmark end-to-end single-order parameter building.
fn bench_build_payment_params(c: &mut Criterion) {
    let builder = PaymentBuilder::standalone("key123");
    let order = json!({"itemId": "A1", "amount": 100});

    c.bench_function("build_payment_params", |b| {
        b.iter(|| builder.build_payment_params(black_box(&order), "sk_test"))
    });
}

/// Benchmark combined-order building as the sub-order count grows.
fn bench_build_combined(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_combined_payment_params");
    let builder = PaymentBuilder::standalone("key123");

    for count in [1, 5, 20].iter() {
        let request = generate_combined(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &request, |b, request| {
            b.iter(|| builder.build_combined_payment_params(black_box(request), "sk_test"))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_signatures,
    bench_build_payment_params,
    bench_build_combined,
);
criterion_main!(benches);
