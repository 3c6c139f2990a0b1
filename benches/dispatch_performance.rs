// benches/dispatch_performance.rs
//! Benchmarks for the failure and dispatch paths.
//!
//! Dispatch logs through `tracing`; no subscriber is installed here, so the
//! numbers measure classification and message resolution only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io;
use unified_errors::{
    args, definitions, format_template, DataAccessFault, DispatchPolicy, Environment,
    InMemoryCatalog, MessageResolver, ResponseEnvelope, TransportCategory, TransportFault,
    ValidationFailure, Violation,
};

fn resolver() -> MessageResolver {
    MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en")
}

// ============================================================================
// Message Resolution
// ============================================================================

fn bench_format_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_template");
    let args = args!["report-2024.pdf", 10_485_760_u64];

    for template in [
        "Record already existed.",
        "File {0} size exceeds threshold {1}",
        "{0} {1} {0} {1} {0} {1}",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(template), &template, |b, t| {
            b.iter(|| format_template(black_box(t), black_box(&args)))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = resolver();
    let fallback = resolver.with_locale("de-AT");

    c.bench_function("resolve_kind_exact_locale", |b| {
        b.iter(|| resolver.resolve_kind(black_box(&definitions::RECORD_NOT_FOUND), &args![42]))
    });

    c.bench_function("resolve_kind_locale_fallback", |b| {
        b.iter(|| fallback.resolve_kind(black_box(&definitions::RECORD_NOT_FOUND), &args![42]))
    });
}

// ============================================================================
// Failure Construction
// ============================================================================

fn bench_failure_creation(c: &mut Criterion) {
    let resolver = resolver();

    c.bench_function("new_failure_no_args", |b| {
        b.iter(|| definitions::RECORD_IN_USE.new_failure(black_box(&resolver), args![]))
    });

    c.bench_function("new_failure_two_args", |b| {
        b.iter(|| {
            definitions::FILE_SIZE_EXCEEDS_THRESHOLD
                .new_failure(black_box(&resolver), args!["upload.bin", 1024])
        })
    });

    c.bench_function("guard_passing", |b| {
        let guard = resolver.guard(&definitions::INVALID_PARAMETER);
        b.iter(|| guard.assert_true(black_box(true), args![]))
    });
}

// ============================================================================
// Dispatch
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let policy = DispatchPolicy::new(resolver()).with_environment(Environment::Production);

    let business = definitions::USER_IS_LOCKED.new_failure(policy.resolver(), args![]);
    let transport = TransportFault::new(TransportCategory::NoHandlerFound, "No handler for GET /x");
    let validation = ValidationFailure::new()
        .with(Violation::field("name", "must not be blank"))
        .with(Violation::field("age", "must be >= 18"));
    let data_access = DataAccessFault::duplicate_key("duplicate key value");
    let unclassified = io::Error::other("connection refused");

    group.bench_function("business", |b| b.iter(|| policy.classify(black_box(&business))));
    group.bench_function("transport", |b| b.iter(|| policy.classify(black_box(&transport))));
    group.bench_function("validation", |b| b.iter(|| policy.classify(black_box(&validation))));
    group.bench_function("data_access", |b| b.iter(|| policy.classify(black_box(&data_access))));
    group.bench_function("unclassified", |b| b.iter(|| policy.classify(black_box(&unclassified))));

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let resolver = resolver();
    let envelope = ResponseEnvelope::success(&resolver, vec![1_u32, 2, 3]);

    c.bench_function("envelope_success", |b| {
        b.iter(|| ResponseEnvelope::success(black_box(&resolver), black_box(7_u32)))
    });

    c.bench_function("envelope_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&envelope)))
    });
}

criterion_group!(
    benches,
    bench_format_template,
    bench_resolve,
    bench_failure_creation,
    bench_classify,
    bench_envelope,
);
criterion_main!(benches);
