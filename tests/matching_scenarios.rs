//! End-to-end matching scenarios driven through the engine.

use matchbook_rs::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SYMBOL: &str = "BTC-USDT";

fn engine() -> MatchingEngine {
    MatchingEngine::new(EngineConfig::default())
}

fn submit(engine: &MatchingEngine, request: OrderRequest) -> SubmissionResult {
    engine.submit_order(request).expect("submission accepted")
}

fn trade_pairs(trades: &[Trade]) -> Vec<(Decimal, Decimal)> {
    trades
        .iter()
        .map(|t| (t.price.value(), t.quantity.value()))
        .collect()
}

#[test]
fn resting_then_crossing() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "50010"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "2.0", "50020"));

    let result = submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "2.5", "50020"));

    assert_eq!(
        trade_pairs(&result.trades),
        vec![(dec!(50010), dec!(1.0)), (dec!(50020), dec!(1.5))]
    );
    assert_eq!(result.status, OrderStatus::Filled);

    let depth = engine.depth(SYMBOL, None).unwrap();
    assert_eq!(depth.best_bid, None);
    assert_eq!(depth.best_ask.unwrap().value(), dec!(50020));
    assert_eq!(depth.asks.len(), 1);
    assert_eq!(depth.asks[0].1.value(), dec!(0.5));
}

#[test]
fn time_priority_at_one_level() {
    let engine = engine();
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "50000").with_order_id("A"),
    );
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "50000").with_order_id("B"),
    );

    let result = submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.5", "50000"));

    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.trades[0].maker_order_id.as_str(), "A");
    assert_eq!(result.trades[0].quantity.value(), dec!(1.0));
    assert_eq!(result.trades[1].maker_order_id.as_str(), "B");
    assert_eq!(result.trades[1].quantity.value(), dec!(0.5));

    let b = engine.get_order(&OrderId::from("B"), SYMBOL).unwrap();
    assert_eq!(b.remaining_quantity().value(), dec!(0.5));
    assert!(engine.get_order(&OrderId::from("A"), SYMBOL).is_none());
}

#[test]
fn fok_unfillable_cancels_without_trades() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "100"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "0.5", "99"));
    let before = engine.depth(SYMBOL, None).unwrap();

    let result = submit(&engine, OrderRequest::fok(SYMBOL, Side::Sell, "2.0", "99"));

    assert_eq!(result.status, OrderStatus::Cancelled);
    assert!(result.trades.is_empty());

    let after = engine.depth(SYMBOL, None).unwrap();
    assert_eq!(before.bids, after.bids);
    assert_eq!(before.asks, after.asks);
}

#[test]
fn fok_fillable_exactly_sweeps_both_levels() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "100"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "0.5", "99"));

    let result = submit(&engine, OrderRequest::fok(SYMBOL, Side::Sell, "1.5", "99"));

    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(
        trade_pairs(&result.trades),
        vec![(dec!(100), dec!(1.0)), (dec!(99), dec!(0.5))]
    );

    let depth = engine.depth(SYMBOL, None).unwrap();
    assert!(depth.bids.is_empty());
    assert_eq!(depth.best_bid, None);
}

#[test]
fn ioc_partial_fill_never_rests() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "0.4", "101"));

    let result = submit(&engine, OrderRequest::ioc(SYMBOL, Side::Buy, "1.0", "101"));

    assert_eq!(result.status, OrderStatus::Cancelled);
    assert_eq!(trade_pairs(&result.trades), vec![(dec!(101), dec!(0.4))]);

    let depth = engine.depth(SYMBOL, None).unwrap();
    assert_eq!(depth.best_ask, None);
    assert_eq!(depth.best_bid, None);
    assert!(depth.bids.is_empty());
}

#[test]
fn cancel_during_life_reroutes_matching() {
    let engine = engine();
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "100").with_order_id("X"),
    );
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Buy, "2.0", "100").with_order_id("Y"),
    );

    let cancelled = engine.cancel_order(&OrderId::from("X"), SYMBOL).unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let result = submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.5", "100"));

    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].maker_order_id.as_str(), "Y");
    assert_eq!(result.trades[0].quantity.value(), dec!(1.5));

    let y = engine.get_order(&OrderId::from("Y"), SYMBOL).unwrap();
    assert_eq!(y.remaining_quantity().value(), dec!(0.5));
}

#[test]
fn market_order_on_empty_book_is_cancelled_with_no_liquidity() {
    let engine = engine();

    let result = submit(&engine, OrderRequest::market(SYMBOL, Side::Buy, "1.0"));

    assert_eq!(result.status, OrderStatus::Cancelled);
    assert!(result.trades.is_empty());
}

#[test]
fn market_order_sweeps_multiple_levels_in_price_order() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "102"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "101"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "103"));

    let result = submit(&engine, OrderRequest::market(SYMBOL, Side::Buy, "2.5"));

    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(
        trade_pairs(&result.trades),
        vec![
            (dec!(101), dec!(1.0)),
            (dec!(102), dec!(1.0)),
            (dec!(103), dec!(0.5)),
        ]
    );
}

#[test]
fn marketable_limit_rests_residual_at_its_own_price() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "101"));

    let result = submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "3.0", "102"));

    assert_eq!(result.status, OrderStatus::PartiallyFilled);
    assert_eq!(trade_pairs(&result.trades), vec![(dec!(101), dec!(1.0))]);

    let depth = engine.depth(SYMBOL, None).unwrap();
    assert_eq!(depth.best_bid.unwrap().value(), dec!(102));
    assert_eq!(depth.bids[0].1.value(), dec!(2.0));
    assert_eq!(depth.best_ask, None);
}

#[test]
fn trades_conserve_quantity_across_both_sides() {
    let engine = engine();
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Sell, "0.7", "101").with_order_id("s1"),
    );
    submit(
        &engine,
        OrderRequest::limit(SYMBOL, Side::Sell, "0.9", "102").with_order_id("s2"),
    );

    let result = submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.2", "102"));

    let traded: Decimal = result.trades.iter().map(|t| t.quantity.value()).sum();
    assert_eq!(traded, dec!(1.2));

    // s1 is gone (fully filled), s2 holds the remainder.
    assert!(engine.get_order(&OrderId::from("s1"), SYMBOL).is_none());
    let s2 = engine.get_order(&OrderId::from("s2"), SYMBOL).unwrap();
    assert_eq!(s2.filled_quantity.value(), dec!(0.5));
}

#[test]
fn taker_sequences_follow_acceptance_order() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "100"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "100"));

    let first = submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "100"));
    let second = submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "100"));

    let first_taker = first.trades[0].taker_sequence;
    let second_taker = second.trades[0].taker_sequence;
    assert!(first_taker < second_taker);

    // FIFO makers: the earlier resting order trades first.
    assert!(first.trades[0].maker_sequence < second.trades[0].maker_sequence);
}

#[test]
fn book_never_rests_marketable_orders() {
    let engine = engine();
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "1.0", "99"));
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Sell, "1.0", "101"));

    // After any submission the book must not be crossed.
    submit(&engine, OrderRequest::limit(SYMBOL, Side::Buy, "0.5", "101"));
    let (best_bid, best_ask) = engine.bbo(SYMBOL).unwrap();
    if let (Some(bid), Some(ask)) = (best_bid, best_ask) {
        assert!(bid < ask);
    }
}
