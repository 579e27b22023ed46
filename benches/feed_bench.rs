//! Benchmarks for the feed engine
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use swipefeed::feed::*;
use swipefeed::relay::{OriginPolicy, ScoreRelay};
use swipefeed::store::{CounterStore, MemoryStore, VoteCategory};

struct NullPort;

impl PresentationPort for NullPort {
    fn render(&mut self, _item: &RenderedItem) {}
    fn remove(&mut self, _item: &RenderedItem) {}
    fn observe_last(&mut self, _item: &RenderedItem) {}
}

fn create_games(count: usize) -> Vec<GameRecord> {
    (0..count)
        .map(|i| GameRecord::new(format!("Game {}", i), format!("games/{}/index.html", i)))
        .collect()
}

fn bench_paginator(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginator");

    for batch_size in [1, 3, 10] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_function(format!("advance_looping_batch_{}", batch_size), |b| {
            let config = FeedConfig::new(batch_size).max_live_items(12);
            let mut feed = FeedPaginator::new(create_games(100), config, NullPort).unwrap();
            feed.start();

            b.iter(|| feed.on_last_item_visible(black_box(VisibilitySignal::Intersection { ratio: 1.0 })))
        });
    }

    group.bench_function("advance_unpruned_1000", |b| {
        b.iter(|| {
            let config = FeedConfig::new(10)
                .max_live_items(0)
                .end_policy(EndPolicy::Stop);
            let mut feed = FeedPaginator::new(create_games(1000), config, NullPort).unwrap();
            while feed.advance().appended() {}
            black_box(feed.live_count())
        })
    });

    group.finish();
}

fn bench_votes(c: &mut Criterion) {
    let mut group = c.benchmark_group("votes");

    group.bench_function("increment", |b| {
        let counters = CounterStore::new(MemoryStore::new());
        b.iter(|| counters.increment(black_box(VoteCategory::Up), "snake").unwrap())
    });

    group.finish();
}

fn bench_relay(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay");
    let raw = r#"{"type":"score","value":10,"gameId":"snake"}"#;

    group.bench_function("receive_accepted", |b| {
        let mut relay = ScoreRelay::new(OriginPolicy::allow(["https://games.example"]));
        b.iter(|| relay.receive("https://games.example", black_box(raw), Some("snake")))
    });

    group.bench_function("receive_rejected_origin", |b| {
        let mut relay = ScoreRelay::new(OriginPolicy::allow(["https://games.example"]));
        b.iter(|| relay.receive("https://evil.example", black_box(raw), None))
    });

    group.finish();
}

criterion_group!(benches, bench_paginator, bench_votes, bench_relay);
criterion_main!(benches);
