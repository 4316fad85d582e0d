use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matchbook_rs::prelude::*;
use std::hint::black_box;

/// Build a book with `levels` ask levels of one order each.
fn seeded_book(levels: u32) -> OrderBook {
    let mut book = OrderBook::new("BENCH");
    for i in 0..levels {
        let order = Order::new(
            OrderId::generate(),
            "BENCH",
            OrderType::Limit,
            Side::Sell,
            Quantity::parse("10", 8).unwrap(),
            Some(Price::parse(&format!("{}", 1000 + i), 8).unwrap()),
            u64::from(i) + 1,
            0,
        );
        book.add_limit_order(order).unwrap();
    }
    book
}

fn bench_crossing_limit(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Crossing Limit");

    for &levels in &[1u32, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("sweep_levels", levels),
            &levels,
            |b, &levels| {
                b.iter_with_setup(
                    || seeded_book(levels),
                    |mut book| {
                        let taker = Order::new(
                            OrderId::generate(),
                            "BENCH",
                            OrderType::Limit,
                            Side::Buy,
                            Quantity::parse(&format!("{}", 10 * levels), 8).unwrap(),
                            Some(Price::parse(&format!("{}", 1000 + levels), 8).unwrap()),
                            u64::from(levels) + 2,
                            0,
                        );
                        let (_, trades) = black_box(book.add_limit_order(taker).unwrap());
                        assert_eq!(trades.len(), levels as usize);
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_engine_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Submission");

    group.bench_function("rest_and_cross", |b| {
        b.iter_with_setup(MatchingEngine::default, |engine| {
            engine
                .submit_order(OrderRequest::limit("BENCH", Side::Sell, "1.0", "1000"))
                .unwrap();
            let result = engine
                .submit_order(OrderRequest::limit("BENCH", Side::Buy, "1.0", "1000"))
                .unwrap();
            black_box(result);
        });
    });

    group.bench_function("fok_probe_unfillable", |b| {
        b.iter_with_setup(
            || seeded_book(50),
            |mut book| {
                let order = Order::new(
                    OrderId::generate(),
                    "BENCH",
                    OrderType::Fok,
                    Side::Buy,
                    Quantity::parse("100000", 8).unwrap(),
                    Some(Price::parse("2000", 8).unwrap()),
                    1_000,
                    0,
                );
                let (order, trades) = black_box(book.match_fok_order(order).unwrap());
                assert!(trades.is_empty());
                assert_eq!(order.status, OrderStatus::Cancelled);
            },
        );
    });

    group.finish();
}

criterion_group!(benches, bench_crossing_limit, bench_engine_submission);
criterion_main!(benches);
