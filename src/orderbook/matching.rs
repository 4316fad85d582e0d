//! Core matching logic: the price-time priority match loop and the
//! non-mutating fillability probe used by fill-or-kill orders.

use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::trade::Trade;
use crate::types::{Order, Price, Quantity, Side};
use crate::utils::current_time_millis;
use crate::OrderBook;
use tracing::trace;

/// Whether a limit price is marketable against the best opposite price.
#[inline]
fn is_marketable(side: Side, limit: Price, opposite_best: Price) -> bool {
    match side {
        Side::Buy => limit >= opposite_best,
        Side::Sell => limit <= opposite_best,
    }
}

impl OrderBook {
    /// Run the match loop for an incoming aggressor order.
    ///
    /// Consumes liquidity from the opposite side in strict price-time
    /// priority: the best opposite level is always exhausted before a worse
    /// one is touched, and within a level the oldest resting order fills
    /// first. Every trade executes at the maker's resting price.
    ///
    /// `limit_price` is `None` for market orders; for priced orders the loop
    /// stops as soon as the best opposite price is no longer marketable.
    ///
    /// The aggressor and each touched maker have their fills and statuses
    /// recorded in place; fully filled makers are popped from their queue and
    /// dropped from the order index, and emptied levels are removed from
    /// their side. Returns the trades in emission order.
    pub(super) fn execute_match(
        &mut self,
        taker: &mut Order,
        limit_price: Option<Price>,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            if taker.remaining_quantity().is_zero() {
                break;
            }

            // Best opposite price: lowest ask for a buy, highest bid for a sell.
            let best_price = match taker.side {
                Side::Buy => self.asks.keys().next().copied(),
                Side::Sell => self.bids.keys().next_back().copied(),
            };
            let Some(level_price) = best_price else {
                break;
            };

            if let Some(limit) = limit_price {
                if !is_marketable(taker.side, limit, level_price) {
                    break;
                }
            }

            let opposite = match taker.side {
                Side::Buy => &mut self.asks,
                Side::Sell => &mut self.bids,
            };
            let Some(level) = opposite.get_mut(&level_price) else {
                break;
            };

            // Walk the level's FIFO queue.
            while !taker.remaining_quantity().is_zero() {
                let Some(maker) = level.front_mut() else {
                    break;
                };

                let trade_quantity = taker.remaining_quantity().min(maker.remaining_quantity());
                maker.fill(trade_quantity);
                let maker_id = maker.id.clone();
                let maker_sequence = maker.sequence;
                let maker_filled = maker.is_fully_filled();

                taker.fill(trade_quantity);
                level.reduce_total(trade_quantity);
                self.last_trade_price = Some(level_price);

                let trade = Trade {
                    trade_id: self.trade_id_generator.next_id(),
                    symbol: self.symbol.clone(),
                    price: level_price,
                    quantity: trade_quantity,
                    aggressor_side: taker.side,
                    maker_order_id: maker_id.clone(),
                    taker_order_id: taker.id.clone(),
                    maker_sequence,
                    taker_sequence: taker.sequence,
                    timestamp_ms: current_time_millis(),
                };
                trace!(
                    symbol = %self.symbol,
                    price = %level_price,
                    quantity = %trade_quantity,
                    maker = %maker_id,
                    taker = %taker.id,
                    "trade executed"
                );
                trades.push(trade);

                if maker_filled {
                    level.pop_front();
                    self.order_locations.remove(&maker_id);
                }
            }

            let level_emptied = level.is_empty();
            if level_emptied {
                opposite.remove(&level_price);
            }
        }

        trades
    }

    /// Quantity the given side could execute right now without mutating the
    /// book: walks the opposite side in priority order, accumulating level
    /// totals at prices acceptable to `limit_price`, stopping early once
    /// `quantity` is covered.
    ///
    /// This is the first phase of the fill-or-kill protocol; it is also
    /// usable on its own as a pre-trade liquidity check.
    pub fn fillable_quantity(
        &self,
        side: Side,
        quantity: Quantity,
        limit_price: Option<Price>,
    ) -> Quantity {
        let opposite = match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        };

        let price_iter: Box<dyn Iterator<Item = (&Price, &PriceLevel)>> = match side {
            Side::Buy => Box::new(opposite.iter()),
            Side::Sell => Box::new(opposite.iter().rev()),
        };

        let mut available = Quantity::ZERO;
        for (price, level) in price_iter {
            if let Some(limit) = limit_price {
                if !is_marketable(side, limit, *price) {
                    break;
                }
            }

            let needed = quantity - available;
            available += needed.min(level.total_quantity());
            if available >= quantity {
                break;
            }
        }

        available
    }
}
