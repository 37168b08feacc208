//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Test fixtures: an in-memory `.mo` image builder.
//!
//! Layout written: 28-byte header, original descriptor table,
//! translation descriptor table, then the string payloads, each followed
//! by a single NUL byte. Both byte orders can be emitted from the same
//! entries so endianness equivalence can be checked.

/// Magic number of a `.mo` file, written in the image's byte order
const MO_MAGIC: u32 = 0x950412de;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ImageOrder {
    Little,
    Big,
}

/// Builder for `.mo` images used throughout the integration tests.
#[derive(Default)]
pub struct MoImage {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl MoImage {
    pub fn new() -> Self {
        MoImage::default()
    }

    pub fn entry(mut self, original: impl AsRef<[u8]>, translation: impl AsRef<[u8]>) -> Self {
        self.entries.push((
            original.as_ref().to_vec(),
            translation.as_ref().to_vec(),
        ));
        self
    }

    pub fn build_le(&self) -> Vec<u8> {
        self.build(ImageOrder::Little)
    }

    pub fn build_be(&self) -> Vec<u8> {
        self.build(ImageOrder::Big)
    }

    fn build(&self, order: ImageOrder) -> Vec<u8> {
        let word = |value: u32| -> [u8; 4] {
            match order {
                ImageOrder::Little => value.to_le_bytes(),
                ImageOrder::Big => value.to_be_bytes(),
            }
        };

        let n = self.entries.len() as u32;
        let orig_tab = 28u32;
        let trans_tab = orig_tab + n * 8;
        let payload_base = trans_tab + n * 8;

        let mut payload = Vec::new();
        let mut orig_descs = Vec::new();
        let mut trans_descs = Vec::new();
        for (original, translation) in &self.entries {
            orig_descs.push((original.len() as u32, payload_base + payload.len() as u32));
            payload.extend_from_slice(original);
            payload.push(0);
            trans_descs.push((translation.len() as u32, payload_base + payload.len() as u32));
            payload.extend_from_slice(translation);
            payload.push(0);
        }

        let mut data = Vec::new();
        for value in [MO_MAGIC, 0, n, orig_tab, trans_tab, 0, 0] {
            data.extend_from_slice(&word(value));
        }
        for (length, offset) in orig_descs.iter().chain(trans_descs.iter()) {
            data.extend_from_slice(&word(*length));
            data.extend_from_slice(&word(*offset));
        }
        data.extend_from_slice(&payload);
        data
    }

    /// The originals in insertion order, for query sets.
    pub fn originals(&self) -> Vec<Vec<u8>> {
        self.entries.iter().map(|(o, _)| o.clone()).collect()
    }

    /// The `(original, translation)` list in insertion order.
    pub fn pairs(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries.clone()
    }
}

/// The menu fixture used across the suite: plain, plural, and
/// context-qualified entries.
pub fn menu_fixture() -> MoImage {
    MoImage::new()
        .entry("Open", "Ouvrir")
        .entry("Close", "Fermer")
        .entry("%d file", "%d fichier")
        .entry("%d files", "%d fichiers")
        .entry("menu\x04Open", "Ouvrir le menu")
        .entry("menu\x04%d files", "%d fichiers du menu")
}
