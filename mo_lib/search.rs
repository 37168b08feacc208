//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Lookup strategies
//!
//! Exactly one strategy is compiled into a build, selected by cargo
//! feature: `search-linear` (no preprocessing, full scan),
//! `search-binary` (pair index sorted by length then bytes, midpoint
//! search), or `search-hash` (djb2-keyed open-addressing table).
//!
//! Each strategy answers `find*` with an index that is only meaningful
//! against its own backing store: the pair array for linear and binary,
//! the slot array for hash.

use crate::mo_lib::mo_file::StringPair;
use crate::mo_lib::stats::StatCounters;

#[cfg(not(any(
    feature = "search-linear",
    feature = "search-binary",
    feature = "search-hash"
)))]
compile_error!(
    "no search strategy selected: enable exactly one of the features \
     `search-linear`, `search-binary`, or `search-hash`"
);

#[cfg(any(
    all(feature = "search-linear", feature = "search-binary"),
    all(feature = "search-linear", feature = "search-hash"),
    all(feature = "search-binary", feature = "search-hash"),
))]
compile_error!(
    "multiple search strategies selected: the features `search-linear`, \
     `search-binary`, and `search-hash` are mutually exclusive"
);

/// Name of the compiled-in strategy.
#[cfg(feature = "search-linear")]
pub const METHOD_NAME: &str = "LINEAR";
#[cfg(feature = "search-binary")]
pub const METHOD_NAME: &str = "BINARY";
#[cfg(feature = "search-hash")]
pub const METHOD_NAME: &str = "HASH";

/// Scan the pair index from the front; first match wins.
#[cfg(feature = "search-linear")]
pub fn find_linear(
    data: &[u8],
    pairs: &[StringPair],
    query: &[u8],
    counters: &StatCounters,
) -> Option<usize> {
    for (i, pair) in pairs.iter().enumerate() {
        counters.record_comparison();

        if pair.orig_len as usize != query.len() {
            continue;
        }
        if pair.original(data) == query {
            return Some(i);
        }
    }
    None
}

/// Sort the pair index by original length, then original bytes.
///
/// Well-formed catalogs carry no duplicate originals, so the order is
/// total in practice.
#[cfg(feature = "search-binary")]
pub fn sort_pairs(data: &[u8], pairs: &mut [StringPair]) {
    pairs.sort_by(|a, b| {
        a.orig_len
            .cmp(&b.orig_len)
            .then_with(|| a.original(data).cmp(b.original(data)))
    });
}

/// Midpoint search over a pair index prepared by `sort_pairs`.
#[cfg(feature = "search-binary")]
pub fn find_binary(
    data: &[u8],
    pairs: &[StringPair],
    query: &[u8],
    counters: &StatCounters,
) -> Option<usize> {
    use std::cmp::Ordering;

    let mut lo = 0;
    let mut hi = pairs.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let pair = &pairs[mid];
        counters.record_comparison();

        let order = (pair.orig_len as usize)
            .cmp(&query.len())
            .then_with(|| pair.original(data).cmp(query));
        match order {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return Some(mid),
        }
    }
    None
}

/// djb2 over bytes: h = 5381, then h = h * 33 + b with wrapping u32
/// arithmetic.
#[cfg(feature = "search-hash")]
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 5381;
    for &b in bytes {
        hash = hash.wrapping_mul(33).wrapping_add(b as u32);
    }
    hash
}

/// State of an open-addressing slot. Catalogs are immutable after build,
/// so no tombstone state exists.
#[cfg(feature = "search-hash")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Occupied,
}

/// One open-addressing slot: the entry it holds plus its full 32-bit
/// hash, kept so probes can reject non-matches without touching bytes.
#[cfg(feature = "search-hash")]
#[derive(Debug, Clone, Copy)]
pub struct HashSlot {
    pub state: SlotState,
    pub hash: u32,
    pub entry: StringPair,
}

/// The open-addressing table: a power-of-two slot array and its mask.
#[cfg(feature = "search-hash")]
#[derive(Debug)]
pub struct HashTable {
    pub slots: Vec<HashSlot>,
    pub mask: u32,
}

/// Build the table over a pair index.
///
/// Size is the smallest power of two that keeps the load factor at or
/// under 0.75 (minimum 1, so an empty catalog still builds). The load
/// factor stays strictly below 1, so probing always terminates.
#[cfg(feature = "search-hash")]
pub fn build_table(data: &[u8], pairs: &[StringPair]) -> HashTable {
    let target = (pairs.len() * 4).div_ceil(3).max(1);
    let size = target.next_power_of_two();
    let mask = (size - 1) as u32;

    let empty = HashSlot {
        state: SlotState::Empty,
        hash: 0,
        entry: StringPair::default(),
    };
    let mut slots = vec![empty; size];

    for pair in pairs {
        let hash = hash_bytes(pair.original(data));
        let mut index = (hash & mask) as usize;
        while slots[index].state == SlotState::Occupied {
            index = (index + 1) & mask as usize;
        }
        slots[index] = HashSlot {
            state: SlotState::Occupied,
            hash,
            entry: *pair,
        };
    }

    tracing::debug!(
        size,
        items = pairs.len(),
        load = pairs.len() as f64 / size as f64,
        "hash table built"
    );

    HashTable { slots, mask }
}

/// Probe for a query whose djb2 hash is `hash`.
///
/// Stops at the first empty slot (miss) or at an occupied slot whose
/// hash, length, and bytes all match. Every occupied non-matching probe
/// counts as a collision.
#[cfg(feature = "search-hash")]
pub fn find_hash(
    table: &HashTable,
    data: &[u8],
    query: &[u8],
    hash: u32,
    counters: &StatCounters,
) -> Option<usize> {
    let start = (hash & table.mask) as usize;
    let mut index = start;
    loop {
        let slot = &table.slots[index];
        match slot.state {
            SlotState::Empty => return None,
            SlotState::Occupied => {
                if slot.hash == hash
                    && slot.entry.orig_len as usize == query.len()
                    && slot.entry.original(data) == query
                {
                    return Some(index);
                }
                counters.record_collision();
            }
        }

        index = (index + 1) & table.mask as usize;
        if index == start {
            return None;
        }
    }
}
