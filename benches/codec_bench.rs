use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rawcookie::cookies::codec::{encode_key, encode_value, parse_cookie_string};

fn benchmark_encode(c: &mut Criterion) {
    c.bench_function("cookie_encode_key", |b| {
        b.iter(|| encode_key(black_box("session (primary) ñâé")))
    });

    c.bench_function("cookie_encode_value", |b| {
        b.iter(|| encode_value(black_box("a b;c,d\"e\\f ñâé %")))
    });
}

fn benchmark_parse(c: &mut Criterion) {
    // Typical document with 100 cookies
    let raw = (0..100)
        .map(|i| format!("cookie{}=value%20{}", i, i))
        .collect::<Vec<_>>()
        .join("; ");

    c.bench_function("cookie_parse_string", |b| {
        b.iter(|| black_box(parse_cookie_string(black_box(&raw))))
    });
}

criterion_group!(benches, benchmark_encode, benchmark_parse);
criterion_main!(benches);
