//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! mocat library
//!
//! A reader and lookup engine for GNU gettext binary message catalogs
//! (`.mo` files). A catalog is loaded once into an owned buffer and then
//! answers translation queries without further allocation:
//! - plain lookups (`translate`)
//! - context- and plural-qualified lookups (`translate_plural`)
//!
//! The lookup strategy is fixed at build time through cargo features:
//! `search-linear`, `search-binary`, or `search-hash`. All three share a
//! direct-mapped result cache. The optional `stats` feature adds lookup,
//! cache, and probe counters.

pub mod mo_lib;

pub use mo_lib::catalog::Catalog;
pub use mo_lib::mo_file::MoError;
#[cfg(feature = "stats")]
pub use mo_lib::stats::Stats;
