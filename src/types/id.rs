//! Opaque identifiers for orders and trades.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Globally unique, opaque order identifier.
///
/// Callers may supply their own identifiers at submission; otherwise the
/// engine mints a UUID-v4 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh collision-resistant identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique trade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(Uuid);

impl TradeId {
    /// The identifier as a UUID.
    #[inline]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generator for trade identifiers.
///
/// Identifiers are UUID-v5 values derived from a namespace and a
/// monotonically increasing counter: for a given namespace the produced
/// sequence is fully deterministic, which makes seeded generators suitable
/// for replayable tests, while fresh random namespaces keep production ids
/// collision-resistant.
#[derive(Debug)]
pub struct TradeIdGenerator {
    namespace: Uuid,
    counter: AtomicU64,
}

impl TradeIdGenerator {
    /// Create a generator scoped to the given namespace.
    pub fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            counter: AtomicU64::new(0),
        }
    }

    /// Create a deterministic generator from a numeric seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed.to_be_bytes()))
    }

    /// Create a deterministic generator for a symbol under a numeric seed.
    ///
    /// Two books seeded identically but serving different symbols produce
    /// disjoint id sequences.
    pub fn for_symbol(seed: u64, symbol: &str) -> Self {
        let seed_namespace = Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed.to_be_bytes());
        Self::new(Uuid::new_v5(&seed_namespace, symbol.as_bytes()))
    }

    /// Produce the next identifier in the sequence.
    pub fn next_id(&self) -> TradeId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        TradeId(Uuid::new_v5(&self.namespace, &n.to_be_bytes()))
    }
}

impl Default for TradeIdGenerator {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}
