use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;

use readthrough::adapters::cache::MokaEntityCache;
use readthrough::adapters::memory::InMemoryEntityStore;
use readthrough::{resolve, EntityCache, EntityId, EntityResolver, NullEntityCache};

fn bench_cache_hit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = EntityResolver::new(Arc::new(InMemoryEntityStore::sample()))
        .with_cache(Arc::new(MokaEntityCache::new()));
    let id = EntityId::Number(1);
    rt.block_on(resolver.resolve(&id)).unwrap();

    c.bench_function("resolve/cache_hit", |b| {
        b.to_async(&rt).iter(|| resolver.resolve(&id));
    });
}

fn bench_cache_miss(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = InMemoryEntityStore::sample();
    let cache = MokaEntityCache::new();
    let id = EntityId::Number(2);

    // Zero TTL forces every call down the store path and through a write.
    c.bench_function("resolve/cache_miss", |b| {
        b.to_async(&rt).iter(|| {
            readthrough::resolve_with_ttl(&id, &store, Some(&cache as &dyn EntityCache), Duration::ZERO)
        });
    });
}

fn bench_no_cache(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = InMemoryEntityStore::sample();
    let id = EntityId::Number(2);

    c.bench_function("resolve/no_cache", |b| {
        b.to_async(&rt).iter(|| resolve(&id, &store, None));
    });

    c.bench_function("resolve/null_cache", |b| {
        b.to_async(&rt).iter(|| resolve(&id, &store, Some(&NullEntityCache)));
    });
}

criterion_group!(benches, bench_cache_hit, bench_cache_miss, bench_no_cache);
criterion_main!(benches);
