//! Ordered listings of integer arrays
//!
//! A listing stores `item_count` integer arrays in one shared encoding:
//! a data width (8/16/32-bit signed elements) and a size strategy (one fixed
//! length for every item, or an unsigned prefix-sum offset table). Items are
//! decoded on demand as views into the backing region; nothing is
//! materialized at construction beyond the carved section handles.

use crate::array::{IntArray, IntWidth};
use crate::error::{Error, Result};
use crate::packed::{self, SizeTable, MAX_COUNT};
use crate::region::ByteRegion;
use tracing::trace;

/// High 28 bits of every listing header word.
const LISTING_MAGIC: u32 = 0xF00D_2000;

/// A read-only, ordered collection of [`IntArray`]s decoded from one blob.
#[derive(Debug, Clone)]
pub struct Listing {
    width: IntWidth,
    sizes: SizeTable,
    data: ByteRegion,
    count: u32,
}

impl Listing {
    /// Decode a listing from a word-aligned blob.
    ///
    /// The blob must be consumed exactly: header, item count, size section,
    /// and padded data section must add up to the region's length.
    pub fn parse(region: &ByteRegion) -> Result<Self> {
        let bytes = region.bytes();
        let words = bytes.len() / 4;
        if words < 3 {
            return Err(Error::InvalidLength("listing blob too small"));
        }

        let header = packed::word(bytes, 0);
        if header & 0xFFFF_FFF0 != LISTING_MAGIC {
            return Err(Error::InvalidHeader("listing magic mismatch"));
        }
        let width = IntWidth::from_code((header >> 2) & 3)
            .ok_or(Error::InvalidHeader("listing data width is zero"))?;
        let size_code = header & 3;

        let count = packed::word(bytes, 1);
        if count > MAX_COUNT {
            return Err(Error::InvalidValue("listing item count out of range"));
        }

        let mut cursor = 2usize;
        let sizes = match IntWidth::from_code(size_code) {
            None => {
                let item_length = packed::word(bytes, 2);
                cursor = 3;
                if item_length > MAX_COUNT {
                    return Err(Error::InvalidValue("listing item length out of range"));
                }
                SizeTable::Fixed(item_length)
            }
            Some(size_width) => {
                let logical = (u64::from(count) + 1) * size_width.bytes() as u64;
                let table = region.slice(cursor * 4, logical as usize);
                cursor += packed::words_for(logical) as usize;
                if words < cursor {
                    return Err(Error::InvalidLength("listing size table overruns blob"));
                }
                SizeTable::Offsets {
                    table,
                    width: size_width,
                }
            }
        };

        let total_elements = sizes.total(count);
        let data_logical = total_elements * width.bytes() as u64;
        let data = region.slice(cursor * 4, data_logical as usize);
        cursor += packed::words_for(data_logical) as usize;
        if words != cursor {
            return Err(Error::InvalidLength("listing blob length mismatch"));
        }

        trace!(
            items = count,
            elements = total_elements,
            width = width.bytes(),
            "parsed listing"
        );
        Ok(Self {
            width,
            sizes,
            data,
            count,
        })
    }

    /// The `index`-th item, or the empty array when `index` is out of range.
    pub fn item(&self, index: i32) -> IntArray {
        if index < 0 || index as u32 >= self.count {
            return IntArray::empty();
        }
        let index = index as u32;
        let element_bytes = self.width.bytes() as u64;
        let start = self.sizes.offset(index) * element_bytes;
        let length = u64::from(self.sizes.length(index)) * element_bytes;
        IntArray::view(self.data.slice(start as usize, length as usize), self.width)
    }

    /// Element `element` of item `index`; 0 when either is out of range.
    pub fn item_at(&self, index: i32, element: i32) -> i32 {
        if index < 0 || element < 0 || index as u32 >= self.count {
            return 0;
        }
        let index = index as u32;
        if element as u32 >= self.sizes.length(index) {
            return 0;
        }
        let at = self.sizes.offset(index) + u64::from(element as u32);
        self.width.read_i32(self.data.bytes(), at as usize)
    }

    /// Length of item `index`; 0 when out of range.
    pub fn item_length(&self, index: i32) -> i32 {
        if index < 0 || index as u32 >= self.count {
            return 0;
        }
        self.sizes.length(index as u32) as i32
    }

    /// Number of items.
    pub fn item_count(&self) -> u32 {
        self.count
    }

    /// Index of the first item equal to `item`, scanning linearly; −1 on
    /// miss.
    pub fn find(&self, item: &IntArray) -> i32 {
        for index in 0..self.count {
            if self.item(index as i32) == *item {
                return index as i32;
            }
        }
        -1
    }

    /// Iterate over all items in order.
    pub fn items(&self) -> impl Iterator<Item = IntArray> + '_ {
        (0..self.count).map(|index| self.item(index as i32))
    }

    /// Verify the monotonicity of the size prefix table.
    ///
    /// Constructors skip this scan; callers handling untrusted input invoke
    /// it once after parse.
    pub fn check(&self) -> Result<()> {
        self.sizes.check(self.count)
    }
}
