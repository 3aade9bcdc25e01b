//! Routing-key lookup.
//!
//! Key allocation and routing-table computation happen elsewhere; generation
//! consumes them through the read-only [`KeyLookup`] trait. The table is
//! populated once before any generation pass starts and never mutated, so
//! one instance can serve many concurrent passes.

use std::collections::HashMap;

use crate::graph::{EdgeId, VertexId};

/// Partition id for a heat element's primary outgoing traffic.
pub const DATA_PARTITION: &str = "DATA";

/// An opaque routing key. Valid keys are non-negative 32-bit values;
/// absence of a key is expressed by `Option`, never by key 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingKey(
    /// The raw key value.
    pub u32,
);

/// A (key, mask) pair describing a contiguous block of routing keys.
///
/// Bits set in `mask` are fixed by `key`; clear bits are free and enumerate
/// the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMask {
    /// Base key. Free-bit positions are ignored.
    pub key: u32,
    /// Mask: 1 = fixed bit, 0 = free bit.
    pub mask: u32,
}

impl KeyMask {
    /// Number of concrete keys the pair spans.
    #[must_use]
    pub fn span(&self) -> usize {
        let free_bits = self.mask.count_zeros();
        if free_bits >= usize::BITS {
            usize::MAX
        } else {
            1 << free_bits
        }
    }

    /// Enumerate up to `n` concrete keys, ascending.
    ///
    /// A counter is scattered across the mask's free bits, lowest bit first,
    /// so successive keys are strictly increasing.
    #[must_use]
    pub fn keys(&self, n: usize) -> Vec<u32> {
        let free: Vec<u32> = (0..32).filter(|bit| self.mask & (1 << bit) == 0).collect();
        let count = n.min(self.span());
        (0..count as u64)
            .map(|counter| {
                let mut key = self.key & self.mask;
                for (position, bit) in free.iter().enumerate() {
                    if counter >> position & 1 == 1 {
                        key |= 1 << bit;
                    }
                }
                key
            })
            .collect()
    }
}

/// Read-only routing-key lookup consumed by generation.
///
/// `Send + Sync` is the concurrency contract: one populated lookup is shared
/// by all concurrently generating cores and never observes a half-updated
/// table.
pub trait KeyLookup: Send + Sync {
    /// Key a vertex transmits with on one of its outgoing partitions.
    fn partition_key(&self, vertex: VertexId, partition: &str) -> Option<RoutingKey>;

    /// Key carried by one edge.
    fn edge_key(&self, edge: EdgeId) -> Option<RoutingKey>;

    /// Key groups for a multi-key edge such as a command channel.
    fn edge_key_groups(&self, edge: EdgeId) -> Option<&[KeyMask]>;
}

/// Map-backed [`KeyLookup`], populated by the placement stage (or, here, by
/// the demo lattice builder and tests).
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    partition_keys: HashMap<(VertexId, String), RoutingKey>,
    edge_keys: HashMap<EdgeId, RoutingKey>,
    edge_groups: HashMap<EdgeId, Vec<KeyMask>>,
}

impl RoutingTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a vertex's outgoing partition to a key.
    pub fn set_partition_key(
        &mut self,
        vertex: VertexId,
        partition: impl Into<String>,
        key: RoutingKey,
    ) {
        self.partition_keys.insert((vertex, partition.into()), key);
    }

    /// Bind an edge to a key.
    pub fn set_edge_key(&mut self, edge: EdgeId, key: RoutingKey) {
        self.edge_keys.insert(edge, key);
    }

    /// Bind an edge to a group of (key, mask) pairs.
    pub fn set_edge_key_groups(&mut self, edge: EdgeId, groups: Vec<KeyMask>) {
        self.edge_groups.insert(edge, groups);
    }
}

impl KeyLookup for RoutingTable {
    fn partition_key(&self, vertex: VertexId, partition: &str) -> Option<RoutingKey> {
        self.partition_keys
            .get(&(vertex, partition.to_string()))
            .copied()
    }

    fn edge_key(&self, edge: EdgeId) -> Option<RoutingKey> {
        self.edge_keys.get(&edge).copied()
    }

    fn edge_key_groups(&self, edge: EdgeId) -> Option<&[KeyMask]> {
        self.edge_groups.get(&edge).map(Vec::as_slice)
    }
}
