//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Loaded message catalog and its query surface
//!
//! A `Catalog` owns the raw file bytes and every table derived from
//! them. Queries borrow results straight out of that buffer: a found
//! translation lives as long as the catalog, and a miss hands the
//! caller's own slice back, which is the gettext contract.
//!
//! Mutable state is limited to the result cache and the optional
//! counters, both `Cell`-based. That keeps queries `&self` while making
//! the type deliberately `!Sync`: one catalog serves one thread, any
//! number of catalogs may run in parallel.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::mo_lib::cache::TranslationCache;
use crate::mo_lib::endian::Endian;
use crate::mo_lib::mo_file::{self, MoError, Result, StringPair};
use crate::mo_lib::search;
use crate::mo_lib::stats::StatCounters;
#[cfg(feature = "stats")]
use crate::mo_lib::stats::Stats;

/// Context separator: gettext prefixes a disambiguating context onto a
/// key as `context EOT msgid`.
pub const CONTEXT_SEPARATOR: u8 = 0x04;

/// Longest context-qualified key the plural surface will build. Keys
/// that would not fit are not looked up; the input comes back unchanged.
pub const MAX_KEY_LEN: usize = 4096;

/// A loaded, immutable message catalog.
pub struct Catalog {
    /// Raw file bytes; every string lives in here
    data: Vec<u8>,
    /// One entry per catalog string, in file order (sorted order under
    /// the binary strategy)
    pairs: Vec<StringPair>,
    /// Byte order the file declared
    endian: Endian,
    #[cfg(feature = "search-hash")]
    table: search::HashTable,
    cache: TranslationCache,
    counters: StatCounters,
}

impl Catalog {
    /// Load a catalog from a `.mo` file.
    ///
    /// Reads the whole file into memory; this is the only blocking
    /// operation in the crate.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                MoError::FileNotFound(path.to_path_buf())
            } else {
                MoError::Io(e)
            }
        })?;
        Self::from_bytes(data)
    }

    /// Build a catalog over an in-memory `.mo` image, taking ownership
    /// of the bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let parsed = mo_file::parse(&data)?;
        let endian = parsed.endian;

        #[allow(unused_mut)]
        let mut pairs = parsed.pairs;

        #[cfg(feature = "search-binary")]
        {
            search::sort_pairs(&data, &mut pairs);
            debug!(strings = pairs.len(), "pair index sorted");
        }

        #[cfg(feature = "search-hash")]
        let table = search::build_table(&data, &pairs);

        debug!(
            strings = pairs.len(),
            method = search::METHOD_NAME,
            little_endian = endian.is_little(),
            "catalog loaded"
        );

        Ok(Catalog {
            data,
            pairs,
            endian,
            #[cfg(feature = "search-hash")]
            table,
            cache: TranslationCache::new(),
            counters: StatCounters::default(),
        })
    }

    /// Translate `msgid`, returning the caller's slice unchanged when
    /// the catalog has no entry for it.
    pub fn translate<'a>(&'a self, msgid: &'a [u8]) -> &'a [u8] {
        self.lookup(msgid).unwrap_or(msgid)
    }

    /// Context- and plural-qualified translation.
    ///
    /// With a context, the key `msgctxt \x04 msgid` is tried first and
    /// the bare `msgid` second. With a plural form and `n != 1` the same
    /// two-step lookup runs for `msgid_plural` and decides the result.
    /// Only the `n != 1` rule is applied; `Plural-Forms:` catalog
    /// metadata is not interpreted.
    pub fn translate_plural<'a>(
        &'a self,
        msgctxt: Option<&[u8]>,
        msgid: &'a [u8],
        msgid_plural: Option<&'a [u8]>,
        n: u64,
    ) -> &'a [u8] {
        let mut key = [0u8; MAX_KEY_LEN];

        // qualified key first, bare msgid second; a key that does not
        // fit the scratch buffer ends the query with the input unchanged
        let singular = match msgctxt {
            Some(ctx) => match context_key(&mut key, ctx, msgid) {
                Some(k) => self.lookup(k).or_else(|| self.lookup(msgid)),
                None => return msgid,
            },
            None => self.lookup(msgid),
        };

        if let Some(plural) = msgid_plural {
            if n != 1 {
                let found = match msgctxt {
                    Some(ctx) => match context_key(&mut key, ctx, plural) {
                        Some(k) => self.lookup(k).or_else(|| self.lookup(plural)),
                        None => return plural,
                    },
                    None => self.lookup(plural),
                };
                return found.unwrap_or(plural);
            }
        }
        singular.unwrap_or(msgid)
    }

    /// Cache-then-search lookup. `None` means the catalog has no entry;
    /// the translation surface turns that into input passthrough.
    fn lookup(&self, msgid: &[u8]) -> Option<&[u8]> {
        self.counters.record_lookup();

        #[cfg(feature = "search-hash")]
        let hash = search::hash_bytes(msgid);

        #[cfg(not(feature = "search-hash"))]
        let cached = self.cache.lookup(&self.data, msgid);
        #[cfg(feature = "search-hash")]
        let cached = self.cache.lookup(&self.data, msgid, hash);

        if let Some(entry) = cached {
            self.counters.record_cache_hit();
            return Some(entry.translation(&self.data));
        }
        self.counters.record_cache_miss();

        #[cfg(feature = "search-linear")]
        let found = search::find_linear(&self.data, &self.pairs, msgid, &self.counters)
            .map(|i| self.pairs[i]);
        #[cfg(feature = "search-binary")]
        let found = search::find_binary(&self.data, &self.pairs, msgid, &self.counters)
            .map(|i| self.pairs[i]);
        #[cfg(feature = "search-hash")]
        let found = search::find_hash(&self.table, &self.data, msgid, hash, &self.counters)
            .map(|i| self.table.slots[i].entry);

        let entry = found?;

        #[cfg(not(feature = "search-hash"))]
        self.cache.store(msgid, entry);
        #[cfg(feature = "search-hash")]
        self.cache.store(msgid, hash, entry);

        Some(entry.translation(&self.data))
    }

    /// Number of string pairs in the catalog.
    pub fn string_count(&self) -> u32 {
        self.pairs.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Name of the compiled-in lookup strategy.
    pub fn search_method(&self) -> &'static str {
        search::METHOD_NAME
    }

    /// Byte order the file declared through its magic word.
    pub fn is_little_endian(&self) -> bool {
        self.endian.is_little()
    }

    /// Iterate the loaded `(original, translation)` pairs in index
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.pairs
            .iter()
            .map(|p| (p.original(&self.data), p.translation(&self.data)))
    }

    /// Snapshot of the lookup counters.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> Stats {
        self.counters.snapshot()
    }
}

/// Assemble `ctx \x04 msgid` in the scratch buffer, or `None` when the
/// key would not fit.
fn context_key<'k>(key: &'k mut [u8; MAX_KEY_LEN], ctx: &[u8], msgid: &[u8]) -> Option<&'k [u8]> {
    let total = ctx.len() + 1 + msgid.len();
    if total >= MAX_KEY_LEN {
        return None;
    }

    key[..ctx.len()].copy_from_slice(ctx);
    key[ctx.len()] = CONTEXT_SEPARATOR;
    key[ctx.len() + 1..total].copy_from_slice(msgid);
    Some(&key[..total])
}

impl Drop for Catalog {
    fn drop(&mut self) {
        #[cfg(feature = "stats")]
        {
            let stats = self.counters.snapshot();
            debug!(
                total_lookups = stats.total_lookups,
                cache_hits = stats.cache_hits,
                cache_misses = stats.cache_misses,
                "catalog dropped"
            );
        }
        #[cfg(not(feature = "stats"))]
        debug!("catalog dropped");
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("strings", &self.pairs.len())
            .field("method", &search::METHOD_NAME)
            .field("little_endian", &self.endian.is_little())
            .finish_non_exhaustive()
    }
}
