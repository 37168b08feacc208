//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Direct-mapped result cache
//!
//! A fixed array of 64 slots memoizing the last translation seen per
//! slot. The slot index is `key & 63`, where the key is the query's
//! pointer value under the linear and binary strategies and the query's
//! djb2 hash under the hash strategy. The common call pattern is
//! `translate(LITERAL)` with the same literal address passed repeatedly,
//! so the pointer comparison catches most repeats without hashing.
//!
//! The pointer is only a fast-path filter: a hit additionally requires
//! the slot's stored original to be byte-equal to the query, so an
//! address reused for different contents (the context-key scratch
//! buffer, say) can never return a stale translation. Misses are never
//! stored; a colliding store simply overwrites the slot.
//!
//! Slots are `Cell`s, keeping the query path `&self` at the price of
//! making the catalog single-writer.

use std::cell::Cell;

use crate::mo_lib::mo_file::StringPair;

/// Number of cache slots. Must be a power of two.
pub const CACHE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
struct CacheSlot {
    occupied: bool,
    /// Address of the query that filled this slot
    key_ptr: usize,
    /// djb2 hash of that query
    #[cfg(feature = "search-hash")]
    hash: u32,
    entry: StringPair,
}

/// The per-catalog cache.
#[derive(Debug)]
pub struct TranslationCache {
    slots: [Cell<CacheSlot>; CACHE_SIZE],
}

impl TranslationCache {
    pub fn new() -> Self {
        TranslationCache {
            slots: std::array::from_fn(|_| Cell::new(CacheSlot::default())),
        }
    }

    /// Look the query up; `data` is the catalog buffer the stored entry
    /// points into.
    #[cfg(not(feature = "search-hash"))]
    pub fn lookup(&self, data: &[u8], query: &[u8]) -> Option<StringPair> {
        let key = query.as_ptr() as usize;
        let slot = self.slots[key & (CACHE_SIZE - 1)].get();
        if slot.occupied && slot.key_ptr == key && verify(data, &slot.entry, query) {
            Some(slot.entry)
        } else {
            None
        }
    }

    /// Look the query up by its precomputed hash.
    #[cfg(feature = "search-hash")]
    pub fn lookup(&self, data: &[u8], query: &[u8], hash: u32) -> Option<StringPair> {
        let key = query.as_ptr() as usize;
        let slot = self.slots[hash as usize & (CACHE_SIZE - 1)].get();
        if slot.occupied && slot.key_ptr == key && slot.hash == hash && verify(data, &slot.entry, query)
        {
            Some(slot.entry)
        } else {
            None
        }
    }

    /// Record a found translation, overwriting the slot's previous
    /// occupant.
    #[cfg(not(feature = "search-hash"))]
    pub fn store(&self, query: &[u8], entry: StringPair) {
        let key = query.as_ptr() as usize;
        self.slots[key & (CACHE_SIZE - 1)].set(CacheSlot {
            occupied: true,
            key_ptr: key,
            entry,
        });
    }

    /// Record a found translation under its hash slot.
    #[cfg(feature = "search-hash")]
    pub fn store(&self, query: &[u8], hash: u32, entry: StringPair) {
        self.slots[hash as usize & (CACHE_SIZE - 1)].set(CacheSlot {
            occupied: true,
            key_ptr: query.as_ptr() as usize,
            hash,
            entry,
        });
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A hit requires the stored original's bytes to equal the query.
fn verify(data: &[u8], entry: &StringPair, query: &[u8]) -> bool {
    entry.orig_len as usize == query.len() && entry.original(data) == query
}
