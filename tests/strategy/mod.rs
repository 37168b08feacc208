//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use mocat::Catalog;

use crate::common::{menu_fixture, MoImage};

#[test]
fn test_search_method_matches_build() {
    let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

    #[cfg(feature = "search-linear")]
    assert_eq!(cat.search_method(), "LINEAR");
    #[cfg(feature = "search-binary")]
    assert_eq!(cat.search_method(), "BINARY");
    #[cfg(feature = "search-hash")]
    assert_eq!(cat.search_method(), "HASH");
}

/// Under the binary strategy the pair index is kept sorted by original
/// length, then bytes; the other strategies keep file order.
#[test]
fn test_entry_order() {
    let image = MoImage::new()
        .entry("zz", "1")
        .entry("a", "2")
        .entry("ab", "3")
        .entry("b", "4");
    let cat = Catalog::from_bytes(image.build_le()).unwrap();

    let order: Vec<Vec<u8>> = cat.entries().map(|(o, _)| o.to_vec()).collect();

    #[cfg(feature = "search-binary")]
    assert_eq!(order, vec![b"a".to_vec(), b"b".to_vec(), b"ab".to_vec(), b"zz".to_vec()]);
    #[cfg(not(feature = "search-binary"))]
    assert_eq!(order, vec![b"zz".to_vec(), b"a".to_vec(), b"ab".to_vec(), b"b".to_vec()]);
}

/// Duplicate byte content under different addresses still resolves by
/// content; the pointer-keyed cache never changes an answer.
#[test]
fn test_same_bytes_different_addresses() {
    let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

    let first = b"Open".to_vec();
    let second = b"Open".to_vec();
    assert_ne!(first.as_ptr(), second.as_ptr());
    assert_eq!(cat.translate(&first), b"Ouvrir");
    assert_eq!(cat.translate(&second), b"Ouvrir");
}

#[cfg(feature = "stats")]
mod stats {
    use super::*;

    #[test]
    fn test_lookup_counts() {
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

        cat.translate(b"Open");
        let stats = cat.stats();
        assert_eq!(stats.total_lookups, 1);
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 1);

        cat.translate(b"Open");
        let stats = cat.stats();
        assert_eq!(stats.total_lookups, 2);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
    }

    #[test]
    fn test_repeated_literal() {
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

        for _ in 0..10_000 {
            assert_eq!(cat.translate(b"Close"), b"Fermer");
        }
        let stats = cat.stats();
        assert_eq!(stats.total_lookups, 10_000);
        assert_eq!(stats.cache_hits, 9_999);
        assert_eq!(stats.cache_misses, 1);
    }

    /// A miss is never cached: repeating an unknown query keeps missing
    /// the cache and re-running the search.
    #[test]
    fn test_misses_are_not_cached() {
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

        for _ in 0..3 {
            cat.translate(b"Welcome");
        }
        let stats = cat.stats();
        assert_eq!(stats.total_lookups, 3);
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 3);
    }

    #[cfg(any(feature = "search-linear", feature = "search-binary"))]
    #[test]
    fn test_comparisons_counted() {
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

        cat.translate(b"Open");
        let stats = cat.stats();
        assert!(stats.comparisons > 0);
        assert_eq!(stats.hash_collisions, 0);
    }

    #[cfg(feature = "search-hash")]
    #[test]
    fn test_hash_mode_counts_no_comparisons() {
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();

        cat.translate(b"Open");
        cat.translate(b"Welcome");
        assert_eq!(cat.stats().comparisons, 0);
    }

    #[cfg(feature = "search-linear")]
    #[test]
    fn test_linear_comparison_count_exact() {
        // "Open" is the first entry: one pair examined.
        let cat = Catalog::from_bytes(menu_fixture().build_le()).unwrap();
        cat.translate(b"Open");
        assert_eq!(cat.stats().comparisons, 1);

        // a miss examines every pair
        cat.translate(b"Welcome");
        assert_eq!(cat.stats().comparisons, 1 + cat.string_count() as u64);
    }
}
