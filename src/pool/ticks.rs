//! Access to initialized ticks.
//!
//! On chain the initialized ticks form a doubly linked list keyed by index;
//! the swap estimator only ever asks for specific entries, so backends can be
//! anything from a prefetched map to an indexer query. [`TickProvider`] is
//! the seam, [`MapTickIndex`] the in-memory implementation used in tests and
//! for fully prefetched pools.

use async_trait::async_trait;
use num_bigint::BigInt;

use crate::error::ProviderError;
use crate::hash::FastMap;

/// One initialized tick as stored by the pool contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickElement {
    pub index: i32,
    /// Closest initialized tick below this one.
    pub prev_index: i32,
    /// Closest initialized tick above this one.
    pub next_index: i32,
    /// Exact x80 sqrt price at `index`.
    pub sqrt_price: BigInt,
    /// Liquidity added when the price crosses this tick upward, removed when
    /// it crosses downward.
    pub liquidity_net: BigInt,
}

/// Source of initialized tick data for swap estimation.
#[async_trait]
pub trait TickProvider {
    async fn get_tick(&self, index: i32) -> Result<TickElement, ProviderError>;
}

/// Tick storage backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct MapTickIndex {
    ticks: FastMap<i32, TickElement>,
}

impl MapTickIndex {
    pub fn new() -> Self {
        Self {
            ticks: FastMap::default(),
        }
    }

    pub fn insert(&mut self, tick: TickElement) {
        self.ticks.insert(tick.index, tick);
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

#[async_trait]
impl TickProvider for MapTickIndex {
    async fn get_tick(&self, index: i32) -> Result<TickElement, ProviderError> {
        self.ticks
            .get(&index)
            .cloned()
            .ok_or(ProviderError::TickNotFound(index))
    }
}
