use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rawcookie::cookies::document::MemoryDocument;
use rawcookie::cookies::options::CookieOptions;
use rawcookie::cookies::store::CookieStore;

fn benchmark_set(c: &mut Criterion) {
    let mut store = CookieStore::new(MemoryDocument::new());
    let options = CookieOptions::new().expires(3600).secure(true);

    c.bench_function("store_set", |b| {
        b.iter(|| {
            store
                .set(black_box("session"), black_box("abc123"), options.clone())
                .map(|_| ())
        })
    });
}

fn benchmark_cached_get(c: &mut Criterion) {
    let mut store = CookieStore::new(MemoryDocument::new());
    // Pre-populate
    for i in 0..100 {
        let _ = store.set(&format!("cookie{}", i), "val", None);
    }

    c.bench_function("store_get_cached", |b| {
        b.iter(|| black_box(store.get(black_box("cookie50"))))
    });
}

criterion_group!(benches, benchmark_set, benchmark_cached_get);
criterion_main!(benches);
