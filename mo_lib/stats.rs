//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Lookup statistics
//!
//! Monotonic counters recorded on the query path, compiled in by the
//! `stats` feature. Without the feature every recording call is an empty
//! inlineable no-op, so the strategy code can record unconditionally.

#[cfg(feature = "stats")]
use std::cell::Cell;

/// A snapshot of the catalog's counters.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Queries answered, including cache hits and misses of every kind
    pub total_lookups: u64,
    /// Queries answered from the direct-mapped cache
    pub cache_hits: u64,
    /// Queries that fell through to the search strategy
    pub cache_misses: u64,
    /// Occupied, non-matching slots probed (hash strategy)
    pub hash_collisions: u64,
    /// Pairs examined (linear and binary strategies)
    pub comparisons: u64,
}

/// The live counters held by a catalog. Plain `Cell`s: a catalog is
/// single-writer, and the cells keep the query path `&self`.
#[derive(Debug, Default)]
pub struct StatCounters {
    #[cfg(feature = "stats")]
    total_lookups: Cell<u64>,
    #[cfg(feature = "stats")]
    cache_hits: Cell<u64>,
    #[cfg(feature = "stats")]
    cache_misses: Cell<u64>,
    #[cfg(feature = "stats")]
    hash_collisions: Cell<u64>,
    #[cfg(feature = "stats")]
    comparisons: Cell<u64>,
}

#[cfg(feature = "stats")]
fn bump(cell: &Cell<u64>) {
    cell.set(cell.get() + 1);
}

impl StatCounters {
    pub fn record_lookup(&self) {
        #[cfg(feature = "stats")]
        bump(&self.total_lookups);
    }

    pub fn record_cache_hit(&self) {
        #[cfg(feature = "stats")]
        bump(&self.cache_hits);
    }

    pub fn record_cache_miss(&self) {
        #[cfg(feature = "stats")]
        bump(&self.cache_misses);
    }

    pub fn record_collision(&self) {
        #[cfg(feature = "stats")]
        bump(&self.hash_collisions);
    }

    pub fn record_comparison(&self) {
        #[cfg(feature = "stats")]
        bump(&self.comparisons);
    }

    /// Copy the current counter values out.
    #[cfg(feature = "stats")]
    pub fn snapshot(&self) -> Stats {
        Stats {
            total_lookups: self.total_lookups.get(),
            cache_hits: self.cache_hits.get(),
            cache_misses: self.cache_misses.get(),
            hash_collisions: self.hash_collisions.get(),
            comparisons: self.comparisons.get(),
        }
    }
}
