//! Key→value tables of integer arrays with indexed lookup
//!
//! A mapping stores `entry_count` (key, value) pairs of integer arrays. Keys
//! and values carry independent width and size strategies; lookup is either
//! a binary search over keys sorted ascending (range strategy 0) or a
//! hash-bucket scan over `range_mask + 1` buckets described by an unsigned
//! prefix-sum table. The decoder trusts the build tool's bucket placement by
//! `hash(key) & range_mask`.

use crate::array::{IntArray, IntWidth};
use crate::error::{Error, Result};
use crate::packed::{self, SizeTable, MAX_COUNT};
use crate::region::ByteRegion;
use std::cmp::Ordering;
use tracing::trace;

/// High 22 bits of every mapping header word.
const MAPPING_MAGIC: u32 = 0xF00D_1000;

/// One (key, value) pair read out of a [`Mapping`].
#[derive(Debug, Clone, Default)]
pub struct Entry {
    key: IntArray,
    value: IntArray,
}

impl Entry {
    pub fn key(&self) -> &IntArray {
        &self.key
    }

    pub fn key_at(&self, index: i32) -> i32 {
        self.key.get(index)
    }

    pub fn key_length(&self) -> u32 {
        self.key.len()
    }

    pub fn value(&self) -> &IntArray {
        &self.value
    }

    pub fn value_at(&self, index: i32) -> i32 {
        self.value.get(index)
    }

    pub fn value_length(&self) -> u32 {
        self.value.len()
    }
}

/// Hash-bucket spans: bucket `b` holds entries `[offset(b), offset(b+1))`.
#[derive(Debug, Clone)]
struct RangeTable {
    mask: u32,
    offsets: SizeTable,
}

/// A read-only key→value table decoded from one blob.
#[derive(Debug, Clone)]
pub struct Mapping {
    key_width: IntWidth,
    key_sizes: SizeTable,
    key_data: ByteRegion,
    value_width: IntWidth,
    value_sizes: SizeTable,
    value_data: ByteRegion,
    ranges: Option<RangeTable>,
    count: u32,
}

impl Mapping {
    /// Decode a mapping from a word-aligned blob.
    ///
    /// Section order: header, entry count, optional range mask + bucket
    /// table, key sizes, key data, value sizes, value data. The blob must be
    /// consumed exactly.
    pub fn parse(region: &ByteRegion) -> Result<Self> {
        let bytes = region.bytes();
        let words = bytes.len() / 4;
        if words < 4 {
            return Err(Error::InvalidLength("mapping blob too small"));
        }

        let header = packed::word(bytes, 0);
        if header & 0xFFFF_FC00 != MAPPING_MAGIC {
            return Err(Error::InvalidHeader("mapping magic mismatch"));
        }
        let key_width = IntWidth::from_code((header >> 8) & 3)
            .ok_or(Error::InvalidHeader("mapping key width is zero"))?;
        let key_size_code = (header >> 6) & 3;
        let range_size_code = (header >> 4) & 3;
        let value_width = IntWidth::from_code((header >> 2) & 3)
            .ok_or(Error::InvalidHeader("mapping value width is zero"))?;
        let value_size_code = header & 3;

        let count = packed::word(bytes, 1);
        if count > MAX_COUNT {
            return Err(Error::InvalidValue("mapping entry count out of range"));
        }

        let mut cursor = 2usize;
        let ranges = match IntWidth::from_code(range_size_code) {
            None => None,
            Some(range_width) => {
                if words <= cursor {
                    return Err(Error::InvalidLength("mapping range section missing"));
                }
                let mask = packed::word(bytes, cursor);
                cursor += 1;
                if mask < 1 || mask > 0x1FFF_FFFF || (mask + 1) & mask != 0 {
                    return Err(Error::InvalidValue("mapping range mask is not 2^n - 1"));
                }

                let logical = (u64::from(mask) + 2) * range_width.bytes() as u64;
                let table = region.slice(cursor * 4, logical as usize);
                cursor += packed::words_for(logical) as usize;
                if words <= cursor {
                    return Err(Error::InvalidLength("mapping range table overruns blob"));
                }

                let offsets = SizeTable::Offsets {
                    table,
                    width: range_width,
                };
                if offsets.total(mask + 1) != u64::from(count) {
                    return Err(Error::InvalidOffset(
                        "mapping range total does not equal entry count",
                    ));
                }
                Some(RangeTable { mask, offsets })
            }
        };
        if words <= cursor {
            return Err(Error::InvalidLength("mapping key section missing"));
        }

        let (key_sizes, key_total) =
            Self::parse_sizes(region, &mut cursor, words, key_size_code, count, true)?;
        if key_total > u64::from(MAX_COUNT) {
            return Err(Error::InvalidValue("mapping key data out of range"));
        }
        let key_logical = key_total * key_width.bytes() as u64;
        let key_data = region.slice(cursor * 4, key_logical as usize);
        cursor += packed::words_for(key_logical) as usize;
        if words < cursor {
            return Err(Error::InvalidLength("mapping key data overruns blob"));
        }

        let (value_sizes, value_total) =
            Self::parse_sizes(region, &mut cursor, words, value_size_code, count, false)?;
        if value_total > u64::from(MAX_COUNT) {
            return Err(Error::InvalidValue("mapping value data out of range"));
        }
        let value_logical = value_total * value_width.bytes() as u64;
        let value_data = region.slice(cursor * 4, value_logical as usize);
        cursor += packed::words_for(value_logical) as usize;
        if words != cursor {
            return Err(Error::InvalidLength("mapping blob length mismatch"));
        }

        trace!(
            entries = count,
            hashed = ranges.is_some(),
            "parsed mapping"
        );
        Ok(Self {
            key_width,
            key_sizes,
            key_data,
            value_width,
            value_sizes,
            value_data,
            ranges,
            count,
        })
    }

    /// Carve a key or value size section. `more_follows` marks sections that
    /// cannot be the last thing in the blob.
    fn parse_sizes(
        region: &ByteRegion,
        cursor: &mut usize,
        words: usize,
        size_code: u32,
        count: u32,
        more_follows: bool,
    ) -> Result<(SizeTable, u64)> {
        let bytes = region.bytes();
        let sizes = match IntWidth::from_code(size_code) {
            None => {
                let length = packed::word(bytes, *cursor);
                *cursor += 1;
                SizeTable::Fixed(length)
            }
            Some(size_width) => {
                let logical = (u64::from(count) + 1) * size_width.bytes() as u64;
                let table = region.slice(*cursor * 4, logical as usize);
                *cursor += packed::words_for(logical) as usize;
                SizeTable::Offsets {
                    table,
                    width: size_width,
                }
            }
        };
        let exhausted = if more_follows {
            words <= *cursor
        } else {
            words < *cursor
        };
        if exhausted {
            return Err(Error::InvalidLength("mapping size section overruns blob"));
        }
        let total = sizes.total(count);
        Ok((sizes, total))
    }

    /// Key of entry `index`, or the empty array when out of range.
    pub fn key(&self, index: i32) -> IntArray {
        self.array_at(&self.key_sizes, &self.key_data, self.key_width, index)
    }

    /// Element `element` of the key of entry `index`; 0 when out of range.
    pub fn key_at(&self, index: i32, element: i32) -> i32 {
        self.element_at(&self.key_sizes, &self.key_data, self.key_width, index, element)
    }

    /// Key length of entry `index`; 0 when out of range.
    pub fn key_length(&self, index: i32) -> i32 {
        if index < 0 || index as u32 >= self.count {
            return 0;
        }
        self.key_sizes.length(index as u32) as i32
    }

    /// Value of entry `index`, or the empty array when out of range.
    pub fn value(&self, index: i32) -> IntArray {
        self.array_at(&self.value_sizes, &self.value_data, self.value_width, index)
    }

    /// Element `element` of the value of entry `index`; 0 when out of range.
    pub fn value_at(&self, index: i32, element: i32) -> i32 {
        self.element_at(
            &self.value_sizes,
            &self.value_data,
            self.value_width,
            index,
            element,
        )
    }

    /// Value length of entry `index`; 0 when out of range.
    pub fn value_length(&self, index: i32) -> i32 {
        if index < 0 || index as u32 >= self.count {
            return 0;
        }
        self.value_sizes.length(index as u32) as i32
    }

    /// Entry `index` as a pair cursor; the empty entry when out of range.
    pub fn entry(&self, index: i32) -> Entry {
        if index < 0 || index as u32 >= self.count {
            return Entry::default();
        }
        Entry {
            key: self.key(index),
            value: self.value(index),
        }
    }

    /// Number of entries.
    pub fn entry_count(&self) -> u32 {
        self.count
    }

    /// Iterate over all entries in storage order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        (0..self.count).map(|index| self.entry(index as i32))
    }

    /// Index of the entry whose key equals `key`; −1 on miss.
    ///
    /// Sorted mappings bisect over ascending keys; hashed mappings scan the
    /// single bucket selected by `hash(key) & range_mask`.
    pub fn find(&self, key: &IntArray) -> i32 {
        if let SizeTable::Fixed(length) = &self.key_sizes {
            if key.len() != *length {
                return -1;
            }
        }
        match &self.ranges {
            Some(ranges) => {
                let bucket = (key.hash() as u32) & ranges.mask;
                let lo = ranges.offsets.offset(bucket).min(u64::from(self.count)) as u32;
                let hi = ranges.offsets.offset(bucket + 1).min(u64::from(self.count)) as u32;
                for index in lo..hi {
                    if self.key(index as i32) == *key {
                        return index as i32;
                    }
                }
                -1
            }
            None => {
                let (mut lo, mut hi) = (0u32, self.count);
                while lo < hi {
                    let mid = (lo + hi) >> 1;
                    match self.key(mid as i32).compare(key) {
                        Ordering::Less => lo = mid + 1,
                        Ordering::Greater => hi = mid,
                        Ordering::Equal => return mid as i32,
                    }
                }
                -1
            }
        }
    }

    /// Verify the monotonicity of the range, key, and value prefix tables.
    pub fn check(&self) -> Result<()> {
        if let Some(ranges) = &self.ranges {
            ranges.offsets.check(ranges.mask + 1)?;
        }
        self.key_sizes.check(self.count)?;
        self.value_sizes.check(self.count)
    }

    fn array_at(
        &self,
        sizes: &SizeTable,
        data: &ByteRegion,
        width: IntWidth,
        index: i32,
    ) -> IntArray {
        if index < 0 || index as u32 >= self.count {
            return IntArray::empty();
        }
        let index = index as u32;
        let element_bytes = width.bytes() as u64;
        let start = sizes.offset(index) * element_bytes;
        let length = u64::from(sizes.length(index)) * element_bytes;
        IntArray::view(data.slice(start as usize, length as usize), width)
    }

    fn element_at(
        &self,
        sizes: &SizeTable,
        data: &ByteRegion,
        width: IntWidth,
        index: i32,
        element: i32,
    ) -> i32 {
        if index < 0 || element < 0 || index as u32 >= self.count {
            return 0;
        }
        let index = index as u32;
        if element as u32 >= sizes.length(index) {
            return 0;
        }
        let at = sizes.offset(index) + u64::from(element as u32);
        width.read_i32(data.bytes(), at as usize)
    }
}
