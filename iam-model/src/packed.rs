//! Width and size-table primitives shared by listings and mappings
//!
//! Every IAM section is carved out of a 4-byte-word blob: element columns are
//! packed little-endian at 8/16/32 bits, and item boundaries come either from
//! a fixed per-item length or from an unsigned prefix-sum offset table. This
//! module holds the two building blocks both containers dispatch over.

use crate::array::IntWidth;
use crate::error::{Error, Result};
use crate::region::ByteRegion;
use byteorder::{ByteOrder, LittleEndian};

/// Largest representable count/length: 2^30 - 1 (the upper bits of size
/// words are reserved for tags).
pub(crate) const MAX_COUNT: u32 = 0x3FFF_FFFF;

/// Read the `index`-th 32-bit word of a blob, 0 when out of range.
pub(crate) fn word(bytes: &[u8], index: usize) -> u32 {
    match bytes.get(index * 4..index * 4 + 4) {
        Some(chunk) => LittleEndian::read_u32(chunk),
        None => 0,
    }
}

/// Number of 32-bit words needed to hold `byte_count` bytes (4-byte padding).
pub(crate) fn words_for(byte_count: u64) -> u64 {
    byte_count.div_ceil(4)
}

/// Item boundaries of a packed array section.
///
/// The encoded form overloads one field as either an inline fixed length or
/// a pointer to an offset table; here the two cases are an explicit enum.
#[derive(Debug, Clone)]
pub(crate) enum SizeTable {
    /// Every item has the same length.
    Fixed(u32),
    /// `count + 1` unsigned prefix-sum offsets; item `i` spans
    /// `[offset(i), offset(i+1))`.
    Offsets { table: ByteRegion, width: IntWidth },
}

impl SizeTable {
    /// Element offset of item `i`.
    pub(crate) fn offset(&self, index: u32) -> u64 {
        match self {
            SizeTable::Fixed(len) => u64::from(index) * u64::from(*len),
            SizeTable::Offsets { table, width } => {
                u64::from(width.read_u32(table.bytes(), index as usize))
            }
        }
    }

    /// Element length of item `i`.
    pub(crate) fn length(&self, index: u32) -> u32 {
        match self {
            SizeTable::Fixed(len) => *len,
            SizeTable::Offsets { table, width } => {
                let bytes = table.bytes();
                let start = width.read_u32(bytes, index as usize);
                let end = width.read_u32(bytes, index as usize + 1);
                end.saturating_sub(start)
            }
        }
    }

    /// Total number of packed elements across `count` items.
    pub(crate) fn total(&self, count: u32) -> u64 {
        self.offset(count)
    }

    /// Verify that an offset table starts at zero and is monotone
    /// non-decreasing through index `count`. Fixed layouts are always valid.
    pub(crate) fn check(&self, count: u32) -> Result<()> {
        let SizeTable::Offsets { table, width } = self else {
            return Ok(());
        };
        let bytes = table.bytes();
        if width.read_u32(bytes, 0) != 0 {
            return Err(Error::InvalidOffset("size table does not start at 0"));
        }
        let mut previous = 0;
        for index in 1..=count as usize {
            let value = width.read_u32(bytes, index);
            if value < previous {
                return Err(Error::InvalidOffset("size table is not monotone"));
            }
            previous = value;
        }
        Ok(())
    }
}
