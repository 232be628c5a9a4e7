//! Packed 32-bit cursor keys
//!
//! Every node and list is identified by `(ref << 3) | tag`, where `ref` is a
//! row index into the node or attribute table and `tag` selects the entity
//! kind. Keys are part of the public API: a key read from a cursor resolves
//! back to the same entity through [`BexFile::node`] and [`BexFile::list`].
//!
//! [`BexFile::node`]: crate::BexFile::node
//! [`BexFile::list`]: crate::BexFile::list

/// Absent node or list.
pub(crate) const VOID: u8 = 0;
/// Attribute table row.
pub(crate) const ATTR_NODE: u8 = 1;
/// Node table row with a non-zero name: an element.
pub(crate) const ELEM_NODE: u8 = 2;
/// Node table row with name reference 0: a text node.
pub(crate) const TEXT_NODE: u8 = 3;
/// Virtual text child of an element whose content is an inline string.
pub(crate) const ELTX_NODE: u8 = 4;
/// Attribute list of an element.
pub(crate) const ATTR_LIST: u8 = 5;
/// Child list of an element.
pub(crate) const CHLD_LIST: u8 = 6;
/// Single-entry virtual child list holding an element's inline text.
pub(crate) const CHTX_LIST: u8 = 7;

pub(crate) fn pack(tag: u8, row: u32) -> u32 {
    (row << 3) | u32::from(tag)
}

pub(crate) fn tag(key: u32) -> u8 {
    (key & 7) as u8
}

pub(crate) fn row(key: u32) -> i32 {
    (key >> 3) as i32
}

/// Kind of a [`BexNode`](crate::BexNode), as exposed to the public API.
///
/// The virtual inline-text tag collapses to [`NodeKind::Text`]; only the
/// packed key distinguishes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeKind {
    Void = 0,
    Element = 1,
    Attribute = 2,
    Text = 3,
}

/// Kind of a [`BexList`](crate::BexList).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ListKind {
    Void = 0,
    Attributes = 1,
    Children = 2,
}
