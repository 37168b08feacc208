//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! MO catalog engine
//!
//! This module provides the pieces of the catalog engine:
//! - `mo_file`: binary format parsing and validation
//! - `search`: the build-time selected lookup strategy
//! - `cache`: the direct-mapped result cache
//! - `catalog`: the owned catalog and its query surface

pub mod cache;
pub mod catalog;
pub mod endian;
pub mod mo_file;
pub mod search;
pub mod stats;
