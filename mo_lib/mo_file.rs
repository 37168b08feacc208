//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the mocat project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! GNU .mo file format reader
//!
//! The .mo (Machine Object) file format is the binary format used by GNU
//! gettext for storing translated message catalogs. This module parses
//! the fixed-size header, validates the two parallel string-descriptor
//! tables against the buffer, and materializes one `StringPair` per
//! catalog entry. String payloads are never copied; pairs hold offsets
//! into the buffer the caller owns.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::mo_lib::endian::Endian;

/// Magic number of a little-endian .mo file, as read in file order
pub const MO_MAGIC: u32 = 0x950412de;

/// The same magic with its bytes reversed, marking the opposite order
pub const MO_MAGIC_SWAPPED: u32 = 0xde120495;

/// Error type for catalog loading
#[derive(Debug, Error)]
pub enum MoError {
    /// The path could not be opened
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bad magic, or an offset/length escaping the buffer
    #[error("invalid MO file format: {0}")]
    InvalidFormat(&'static str),
}

/// Result type for catalog loading
pub type Result<T> = std::result::Result<T, MoError>;

/// Header of a .mo file
#[derive(Debug, Clone, Copy)]
pub struct MoHeader {
    /// Magic number (determines endianness)
    pub magic: u32,
    /// File format revision; read but not interpreted
    pub revision: u32,
    /// Number of string pairs
    pub num_strings: u32,
    /// Offset of the original-string descriptor table
    pub orig_tab_offset: u32,
    /// Offset of the translation descriptor table
    pub trans_tab_offset: u32,
    /// Size of the on-disk hash table; read but not consulted
    pub hash_tab_size: u32,
    /// Offset of the on-disk hash table; read but not consulted
    pub hash_tab_offset: u32,
}

impl MoHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 28;
}

/// A string descriptor (length + offset pair) as stored in the file
#[derive(Debug, Clone, Copy)]
pub struct StringDescriptor {
    /// Length of the string, excluding the trailing NUL
    pub length: u32,
    /// Offset of the string from the start of the file
    pub offset: u32,
}

impl StringDescriptor {
    /// Size of a string descriptor in bytes
    pub const SIZE: usize = 8;
}

/// One catalog entry: offsets of an original string and its translation
/// inside the catalog's byte buffer.
///
/// The format guarantees a NUL byte after each declared length; the
/// parser validates that the NUL position is in bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringPair {
    pub orig_off: u32,
    pub orig_len: u32,
    pub trans_off: u32,
    pub trans_len: u32,
}

impl StringPair {
    /// The original (source-language) bytes of this entry.
    pub fn original<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = self.orig_off as usize;
        &data[start..start + self.orig_len as usize]
    }

    /// The translated bytes of this entry.
    pub fn translation<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = self.trans_off as usize;
        &data[start..start + self.trans_len as usize]
    }
}

/// A fully validated catalog image: header, byte order, and the pair
/// index referencing the caller's buffer.
#[derive(Debug)]
pub struct ParsedMo {
    pub header: MoHeader,
    pub endian: Endian,
    pub pairs: Vec<StringPair>,
}

/// Parse and validate a .mo image.
///
/// Rejects a buffer shorter than the header, an unknown magic, a
/// descriptor table extending past the buffer, and any string whose
/// declared `(offset, length)` plus the trailing NUL escapes the buffer.
/// The first violation wins. All offset sums are widened to u64 so a
/// hostile 32-bit descriptor cannot wrap past the size check.
pub fn parse(data: &[u8]) -> Result<ParsedMo> {
    if data.len() < MoHeader::SIZE {
        return Err(MoError::InvalidFormat("file shorter than header"));
    }

    let endian = detect_endian(data)?;
    let header = read_header(data, endian);

    let size = data.len() as u64;
    let table_bytes = header.num_strings as u64 * StringDescriptor::SIZE as u64;
    if header.orig_tab_offset as u64 + table_bytes > size {
        return Err(MoError::InvalidFormat("original table out of bounds"));
    }
    if header.trans_tab_offset as u64 + table_bytes > size {
        return Err(MoError::InvalidFormat("translation table out of bounds"));
    }

    let mut pairs = Vec::with_capacity(header.num_strings as usize);
    for i in 0..header.num_strings as usize {
        let orig = read_descriptor(data, header.orig_tab_offset as usize, i, endian);
        let trans = read_descriptor(data, header.trans_tab_offset as usize, i, endian);

        // each payload is followed by a single NUL byte
        if orig.offset as u64 + orig.length as u64 + 1 > size {
            return Err(MoError::InvalidFormat("original string out of bounds"));
        }
        if trans.offset as u64 + trans.length as u64 + 1 > size {
            return Err(MoError::InvalidFormat("translation string out of bounds"));
        }

        pairs.push(StringPair {
            orig_off: orig.offset,
            orig_len: orig.length,
            trans_off: trans.offset,
            trans_len: trans.length,
        });
    }

    Ok(ParsedMo {
        header,
        endian,
        pairs,
    })
}

/// Determine the file's byte order from the magic word as stored.
fn detect_endian(data: &[u8]) -> Result<Endian> {
    if Endian::Little.read_u32(data, 0) == MO_MAGIC {
        Ok(Endian::Little)
    } else if Endian::Big.read_u32(data, 0) == MO_MAGIC {
        Ok(Endian::Big)
    } else {
        Err(MoError::InvalidFormat("bad magic number"))
    }
}

fn read_header(data: &[u8], endian: Endian) -> MoHeader {
    MoHeader {
        magic: MO_MAGIC,
        revision: endian.read_u32(data, 4),
        num_strings: endian.read_u32(data, 8),
        orig_tab_offset: endian.read_u32(data, 12),
        trans_tab_offset: endian.read_u32(data, 16),
        hash_tab_size: endian.read_u32(data, 20),
        hash_tab_offset: endian.read_u32(data, 24),
    }
}

fn read_descriptor(data: &[u8], table: usize, index: usize, endian: Endian) -> StringDescriptor {
    let at = table + index * StringDescriptor::SIZE;
    StringDescriptor {
        length: endian.read_u32(data, at),
        offset: endian.read_u32(data, at + 4),
    }
}
