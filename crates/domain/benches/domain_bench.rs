use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use common::AggregateId;
use domain::Aggregate;
use domain::codec;
use domain::tenant::{Tenant, TenantEvent, TenantKind};
use event_store::Version;

fn stream_of(length: usize) -> Vec<TenantEvent> {
    let tenant = Tenant::create("Acme", TenantKind::Organization, "widgets", None).unwrap();
    let mut events = tenant.uncommitted().to_vec();
    let mut current = tenant;
    for i in 0..length.saturating_sub(1) {
        current = current.change_description(format!("revision {i}")).unwrap();
    }
    events.extend_from_slice(&current.uncommitted()[1..]);
    events
}

fn bench_fold(c: &mut Criterion) {
    let short = stream_of(10);
    let long = stream_of(500);

    c.bench_function("fold_10_events", |b| {
        b.iter(|| black_box(Tenant::fold(black_box(short.clone()))))
    });
    c.bench_function("fold_500_events", |b| {
        b.iter(|| black_box(Tenant::fold(black_box(long.clone()))))
    });
}

fn bench_codec(c: &mut Criterion) {
    let id = AggregateId::new();
    let events = stream_of(100);
    let envelopes: Vec<_> = events
        .iter()
        .enumerate()
        .map(|(i, e)| codec::encode::<Tenant>(id, Version::new(i as i64 + 1), e).unwrap())
        .collect();

    c.bench_function("encode_100_events", |b| {
        b.iter(|| {
            for (i, event) in events.iter().enumerate() {
                black_box(
                    codec::encode::<Tenant>(id, Version::new(i as i64 + 1), event).unwrap(),
                );
            }
        })
    });
    c.bench_function("decode_100_envelopes", |b| {
        b.iter(|| {
            for envelope in &envelopes {
                black_box(codec::decode::<Tenant>(envelope).unwrap());
            }
        })
    });
}

fn bench_mutation(c: &mut Criterion) {
    let tenant = Tenant::create("Acme", TenantKind::Organization, "widgets", None).unwrap();
    c.bench_function("rename", |b| {
        b.iter(|| black_box(tenant.rename("Globex").unwrap()))
    });
    c.bench_function("replay_then_mutate", |b| {
        let events = stream_of(50);
        b.iter(|| {
            let folded = Tenant::fold(events.clone());
            black_box(folded.change_description("next").unwrap())
        })
    });
}

criterion_group!(benches, bench_fold, bench_codec, bench_mutation);
criterion_main!(benches);
