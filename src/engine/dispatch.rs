//! Channel-based trade event fan-out.
//!
//! The matching loop invokes listeners synchronously; subscribers that want
//! trades off the matching thread register a dispatcher's listener instead.
//! Each dispatcher forwards trades into a channel drained by a single
//! processor, which preserves per-symbol emission order end to end. Two
//! variants are provided: standard library mpsc with a processor thread, and
//! a Tokio unbounded channel with a processor task.

use crate::orderbook::trade::{TradeEvent, TradeListener};
use crate::utils::current_time_millis;
use std::sync::Arc;
use tracing::{error, info};

/// Trade fan-out over a standard library mpsc channel.
pub struct StdTradeDispatcher {
    /// Sender cloned into every listener this dispatcher hands out
    sender: std::sync::mpsc::Sender<TradeEvent>,
    /// Receiver for the processor (taken when the processor starts)
    receiver: Option<std::sync::mpsc::Receiver<TradeEvent>>,
}

impl StdTradeDispatcher {
    /// Create a dispatcher with an unbounded std channel.
    pub fn new() -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            sender,
            receiver: Some(receiver),
        }
    }

    /// A trade listener that forwards each trade into the dispatch channel.
    ///
    /// Register the result with the engine; it is cheap to clone the trade
    /// into the queue and the matching thread never blocks on subscribers.
    pub fn listener(&self) -> TradeListener {
        let sender = self.sender.clone();
        Arc::new(move |trade| {
            let event = TradeEvent {
                trade: trade.clone(),
                received_at_ms: current_time_millis(),
            };
            if let Err(e) = sender.send(event) {
                error!(symbol = %trade.symbol, "failed to queue trade event: {e}");
            }
        })
    }

    /// Start the processor thread, draining events into `handler`.
    ///
    /// Panics if the processor was already started.
    pub fn start_processor<F>(&mut self, handler: F) -> std::thread::JoinHandle<()>
    where
        F: Fn(TradeEvent) + Send + 'static,
    {
        let receiver = self
            .receiver
            .take()
            .expect("trade processor already started");

        std::thread::spawn(move || {
            info!("trade processor started");
            while let Ok(event) = receiver.recv() {
                handler(event);
            }
            info!("trade processor stopped");
        })
    }
}

impl Default for StdTradeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Trade fan-out over a Tokio unbounded channel.
pub struct TokioTradeDispatcher {
    /// Sender cloned into every listener this dispatcher hands out
    sender: tokio::sync::mpsc::UnboundedSender<TradeEvent>,
    /// Receiver for the processor (taken when the processor starts)
    receiver: Option<tokio::sync::mpsc::UnboundedReceiver<TradeEvent>>,
}

impl TokioTradeDispatcher {
    /// Create a dispatcher with an unbounded Tokio channel.
    pub fn new() -> Self {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Some(receiver),
        }
    }

    /// A trade listener that forwards each trade into the dispatch channel.
    pub fn listener(&self) -> TradeListener {
        let sender = self.sender.clone();
        Arc::new(move |trade| {
            let event = TradeEvent {
                trade: trade.clone(),
                received_at_ms: current_time_millis(),
            };
            if let Err(e) = sender.send(event) {
                error!(symbol = %trade.symbol, "failed to queue trade event: {e}");
            }
        })
    }

    /// Start the processor task, draining events into `handler`.
    ///
    /// Must be called from within a Tokio runtime. Panics if the processor
    /// was already started.
    pub fn start_processor<F>(&mut self, handler: F) -> tokio::task::JoinHandle<()>
    where
        F: Fn(TradeEvent) + Send + 'static,
    {
        let mut receiver = self
            .receiver
            .take()
            .expect("trade processor already started");

        tokio::spawn(async move {
            info!("trade processor started (tokio)");
            while let Some(event) = receiver.recv().await {
                handler(event);
            }
            info!("trade processor stopped (tokio)");
        })
    }
}

impl Default for TokioTradeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
