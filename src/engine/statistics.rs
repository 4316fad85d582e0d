//! Engine-wide and per-symbol activity counters.

use crate::orderbook::Trade;
use crate::types::Price;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Live counters maintained by the engine.
///
/// Integer counters are atomics; decimal volume sums sit behind a mutex so
/// they stay exact. A consistent point-in-time view comes from
/// [`EngineStatistics::snapshot`].
#[derive(Debug)]
pub struct EngineStatistics {
    orders_received: AtomicU64,
    orders_accepted: AtomicU64,
    orders_rejected: AtomicU64,
    trades_emitted: AtomicU64,
    total_volume: Mutex<Decimal>,
    per_symbol: DashMap<String, SymbolCounters>,
    started_at: Instant,
}

#[derive(Debug, Default)]
struct SymbolCounters {
    orders_accepted: u64,
    trades_emitted: u64,
    volume: Decimal,
    last_trade_price: Option<Price>,
}

impl EngineStatistics {
    pub(super) fn new() -> Self {
        Self {
            orders_received: AtomicU64::new(0),
            orders_accepted: AtomicU64::new(0),
            orders_rejected: AtomicU64::new(0),
            trades_emitted: AtomicU64::new(0),
            total_volume: Mutex::new(Decimal::ZERO),
            per_symbol: DashMap::new(),
            started_at: Instant::now(),
        }
    }

    pub(super) fn record_received(&self) {
        self.orders_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_rejected(&self) {
        self.orders_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_accepted(&self, symbol: &str) {
        self.orders_accepted.fetch_add(1, Ordering::Relaxed);
        self.per_symbol
            .entry(symbol.to_string())
            .or_default()
            .orders_accepted += 1;
    }

    pub(super) fn record_trades(&self, symbol: &str, trades: &[Trade]) {
        if trades.is_empty() {
            return;
        }

        self.trades_emitted
            .fetch_add(trades.len() as u64, Ordering::Relaxed);

        let notional: Decimal = trades.iter().map(Trade::notional_value).sum();
        {
            let mut total = self
                .total_volume
                .lock()
                .expect("statistics volume lock poisoned");
            *total += notional;
        }

        let mut counters = self.per_symbol.entry(symbol.to_string()).or_default();
        counters.trades_emitted += trades.len() as u64;
        counters.volume += notional;
        counters.last_trade_price = trades.last().map(|trade| trade.price);
    }

    /// Take a serializable snapshot of every counter.
    pub fn snapshot(&self) -> StatisticsSnapshot {
        let uptime_seconds = self.started_at.elapsed().as_secs_f64();
        let orders_received = self.orders_received.load(Ordering::Relaxed);
        let trades_emitted = self.trades_emitted.load(Ordering::Relaxed);

        let per_symbol = self
            .per_symbol
            .iter()
            .map(|entry| {
                let counters = entry.value();
                (
                    entry.key().clone(),
                    SymbolStatisticsSnapshot {
                        orders_accepted: counters.orders_accepted,
                        trades_emitted: counters.trades_emitted,
                        volume: counters.volume,
                        last_trade_price: counters.last_trade_price,
                    },
                )
            })
            .collect();

        StatisticsSnapshot {
            orders_received,
            orders_accepted: self.orders_accepted.load(Ordering::Relaxed),
            orders_rejected: self.orders_rejected.load(Ordering::Relaxed),
            trades_emitted,
            total_volume: *self
                .total_volume
                .lock()
                .expect("statistics volume lock poisoned"),
            uptime_seconds,
            orders_per_second: orders_received as f64 / uptime_seconds.max(f64::EPSILON),
            trades_per_second: trades_emitted as f64 / uptime_seconds.max(f64::EPSILON),
            per_symbol,
        }
    }
}

/// Point-in-time view of the engine counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Submissions seen, including rejected ones
    pub orders_received: u64,
    /// Submissions that reached a book
    pub orders_accepted: u64,
    /// Submissions refused before touching a book
    pub orders_rejected: u64,
    /// Total trades emitted
    pub trades_emitted: u64,
    /// Exact sum of trade notionals (price * quantity)
    pub total_volume: Decimal,
    /// Seconds since the engine was constructed
    pub uptime_seconds: f64,
    /// Received order throughput over the engine's lifetime
    pub orders_per_second: f64,
    /// Trade throughput over the engine's lifetime
    pub trades_per_second: f64,
    /// Per-symbol breakdown, keyed by symbol
    pub per_symbol: BTreeMap<String, SymbolStatisticsSnapshot>,
}

/// Per-symbol slice of the engine counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolStatisticsSnapshot {
    /// Accepted submissions routed to this symbol
    pub orders_accepted: u64,
    /// Trades emitted on this symbol
    pub trades_emitted: u64,
    /// Exact notional volume traded on this symbol
    pub volume: Decimal,
    /// Price of the symbol's most recent trade
    pub last_trade_price: Option<Price>,
}
