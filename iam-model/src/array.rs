//! Integer sequences: zero-copy views into a region or owned 32-bit copies

use crate::region::ByteRegion;
use byteorder::{ByteOrder, LittleEndian};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Element width of a borrowed integer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
}

impl IntWidth {
    /// Decode the 2-bit width field of a container header
    /// (1 = 8-bit, 2 = 16-bit, 3 = 32-bit; 0 has no width).
    pub(crate) fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(IntWidth::I8),
            2 => Some(IntWidth::I16),
            3 => Some(IntWidth::I32),
            _ => None,
        }
    }

    /// Size of one element in bytes.
    pub fn bytes(self) -> usize {
        match self {
            IntWidth::I8 => 1,
            IntWidth::I16 => 2,
            IntWidth::I32 => 4,
        }
    }

    /// Sign-extending little-endian element read; 0 when out of range.
    pub(crate) fn read_i32(self, bytes: &[u8], index: usize) -> i32 {
        let at = index * self.bytes();
        match self {
            IntWidth::I8 => bytes.get(at).map_or(0, |b| i32::from(*b as i8)),
            IntWidth::I16 => bytes
                .get(at..at + 2)
                .map_or(0, |chunk| i32::from(LittleEndian::read_i16(chunk))),
            IntWidth::I32 => bytes
                .get(at..at + 4)
                .map_or(0, LittleEndian::read_i32),
        }
    }

    /// Zero-extending little-endian element read; 0 when out of range.
    /// Size and range prefix tables are unsigned.
    pub(crate) fn read_u32(self, bytes: &[u8], index: usize) -> u32 {
        let at = index * self.bytes();
        match self {
            IntWidth::I8 => bytes.get(at).map_or(0, |b| u32::from(*b)),
            IntWidth::I16 => bytes
                .get(at..at + 2)
                .map_or(0, |chunk| u32::from(LittleEndian::read_u16(chunk))),
            IntWidth::I32 => bytes
                .get(at..at + 4)
                .map_or(0, LittleEndian::read_u32),
        }
    }
}

/// Length cap for any integer sequence: 2^30 - 1.
const MAX_LEN: u32 = crate::packed::MAX_COUNT;

#[derive(Clone)]
enum Repr {
    /// Heap copy, widened to 32 bits, shared by atomic refcount.
    Owned(Arc<[i32]>),
    /// Borrowed little-endian span of a shared region.
    View { bytes: ByteRegion, width: IntWidth },
}

/// An immutable integer sequence.
///
/// Elements sign-extend to 32 bits on read regardless of the stored width,
/// and equality, ordering, and hashing are defined over those widened values,
/// so arrays of different widths compare interchangeably. Cloning is cheap:
/// views share their region handle, owned copies bump a refcount.
#[derive(Clone)]
pub struct IntArray {
    repr: Repr,
}

impl IntArray {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self {
            repr: Repr::View {
                bytes: ByteRegion::empty(),
                width: IntWidth::I8,
            },
        }
    }

    /// Borrow a packed span of a shared region.
    ///
    /// The element count is `region.len() / width.bytes()`, capped at
    /// 2^30 - 1; a trailing partial element is ignored.
    pub fn view(bytes: ByteRegion, width: IntWidth) -> Self {
        let max_bytes = MAX_LEN as usize * width.bytes();
        let bytes = if bytes.len() > max_bytes {
            bytes.slice(0, max_bytes)
        } else {
            bytes
        };
        Self {
            repr: Repr::View { bytes, width },
        }
    }

    /// Allocate an owned, 32-bit-widened copy of the given values.
    pub fn copied_from(values: &[i32]) -> Self {
        let values = &values[..values.len().min(MAX_LEN as usize)];
        Self {
            repr: Repr::Owned(Arc::from(values)),
        }
    }

    /// Allocate an owned copy widened from 8-bit values.
    pub fn copied_from_i8(values: &[i8]) -> Self {
        let widened: Vec<i32> = values.iter().map(|value| i32::from(*value)).collect();
        Self::copied_from(&widened)
    }

    /// Allocate an owned copy widened from 16-bit values.
    pub fn copied_from_i16(values: &[i16]) -> Self {
        let widened: Vec<i32> = values.iter().map(|value| i32::from(*value)).collect();
        Self::copied_from(&widened)
    }

    /// Number of elements.
    pub fn len(&self) -> u32 {
        match &self.repr {
            Repr::Owned(values) => values.len() as u32,
            Repr::View { bytes, width } => (bytes.len() / width.bytes()) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of one stored element in bytes (owned copies are 32-bit).
    pub fn element_width(&self) -> u8 {
        match &self.repr {
            Repr::Owned(_) => 4,
            Repr::View { width, .. } => width.bytes() as u8,
        }
    }

    /// The `index`-th element, or 0 when `index` is out of range.
    pub fn get(&self, index: i32) -> i32 {
        if index < 0 || index as u32 >= self.len() {
            return 0;
        }
        self.raw(index as u32)
    }

    /// In-range element read.
    fn raw(&self, index: u32) -> i32 {
        match &self.repr {
            Repr::Owned(values) => values[index as usize],
            Repr::View { bytes, width } => width.read_i32(bytes.bytes(), index as usize),
        }
    }

    /// FNV-1a over the 32-bit-widened element stream.
    ///
    /// Equal sequences hash equal regardless of their stored widths.
    pub fn hash(&self) -> i32 {
        let mut result = 0x811C_9DC5_u32 as i32;
        for index in 0..self.len() {
            result = result.wrapping_mul(0x0100_0193) ^ self.raw(index);
        }
        result
    }

    /// Lexicographic order over widened elements; the shorter sequence wins
    /// a tie.
    pub fn compare(&self, other: &IntArray) -> Ordering {
        let (len1, len2) = (self.len(), other.len());
        for index in 0..len1.min(len2) {
            match self.raw(index).cmp(&other.raw(index)) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        len1.cmp(&len2)
    }

    /// A sub-sequence of `length` elements starting at `offset`.
    ///
    /// Out-of-range requests (including non-positive lengths) yield the
    /// empty sequence. A section of an owned copy is a fresh owned copy, so
    /// no view ever points into the middle of a shared heap buffer; a
    /// section of a view is a narrower view.
    pub fn section(&self, offset: i32, length: i32) -> IntArray {
        if offset < 0 || length <= 0 {
            return IntArray::empty();
        }
        let (offset, length) = (offset as u32, length as u32);
        let Some(end) = offset.checked_add(length) else {
            return IntArray::empty();
        };
        if end > self.len() {
            return IntArray::empty();
        }
        match &self.repr {
            Repr::Owned(values) => {
                IntArray::copied_from(&values[offset as usize..end as usize])
            }
            Repr::View { bytes, width } => {
                let w = width.bytes();
                IntArray::view(bytes.slice(offset as usize * w, length as usize * w), *width)
            }
        }
    }
}

impl Default for IntArray {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for IntArray {
    fn eq(&self, other: &Self) -> bool {
        let len = self.len();
        if len != other.len() {
            return false;
        }
        (0..len).all(|index| self.raw(index) == other.raw(index))
    }
}

impl Eq for IntArray {}

impl PartialOrd for IntArray {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for IntArray {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for IntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len()).map(|index| self.raw(index)))
            .finish()
    }
}
