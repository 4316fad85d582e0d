//! Multi-symbol matching engine: validation, routing, statistics, and
//! event dispatch.

pub mod config;
/// Channel-based trade event fan-out (std and Tokio variants).
pub mod dispatch;
pub mod error;
pub mod matching_engine;
/// Engine-wide and per-symbol activity counters.
pub mod statistics;
pub mod submission;

pub use config::{ConfigError, EngineConfig};
pub use dispatch::{StdTradeDispatcher, TokioTradeDispatcher};
pub use error::{EngineError, ValidationError};
pub use matching_engine::MatchingEngine;
pub use statistics::{StatisticsSnapshot, SymbolStatisticsSnapshot};
pub use submission::{OrderRequest, SubmissionResult};
