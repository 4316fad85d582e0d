//! Book update events for subscribers tracking order book state.

use crate::orderbook::snapshot::DepthSnapshot;
use std::sync::Arc;

/// Callback invoked once per completed book mutation (submission or cancel)
/// with a depth snapshot of the affected symbol.
///
/// The snapshot is built inside the book's critical section and handed to
/// listeners by reference to an immutable value; listeners never see live
/// book state.
pub type BookUpdateListener = Arc<dyn Fn(&DepthSnapshot) + Send + Sync>;
