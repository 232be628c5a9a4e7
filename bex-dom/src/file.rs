//! BEX document handle: schema validation and key-based lookup
//!
//! A BEX document is an IAM index with exactly 18 listings and no mappings.
//! Listing 0 holds the document header (magic word and root row); listings
//! 1–6 are text dictionaries; listings 7–17 are single-item columns indexed
//! by attribute or node row. All columns are validated once here, then every
//! cursor read is plain array arithmetic.

use crate::key::{self, ATTR_LIST, ATTR_NODE, CHLD_LIST, CHTX_LIST, ELEM_NODE, ELTX_NODE, TEXT_NODE};
use crate::list::BexList;
use crate::node::BexNode;
use iam_model::{ByteRegion, Error, Index, IntArray, Listing, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Magic word of the `head_root` item.
const BEX_MAGIC: u32 = 0xBE10_BA5E;

#[derive(Debug)]
pub(crate) struct FileInner {
    /// Keeps the backing region alive for every column view below.
    pub(crate) index: Index,
    pub(crate) root_ref: i32,
    pub(crate) attr_uri_text: Listing,
    pub(crate) attr_name_text: Listing,
    pub(crate) attr_value_text: Listing,
    pub(crate) chld_uri_text: Listing,
    pub(crate) chld_name_text: Listing,
    pub(crate) chld_value_text: Listing,
    pub(crate) attr_uri_ref: IntArray,
    pub(crate) attr_name_ref: IntArray,
    pub(crate) attr_value_ref: IntArray,
    pub(crate) attr_parent_ref: IntArray,
    pub(crate) chld_uri_ref: IntArray,
    pub(crate) chld_name_ref: IntArray,
    pub(crate) chld_content_ref: IntArray,
    pub(crate) chld_attributes_ref: IntArray,
    pub(crate) chld_parent_ref: IntArray,
    pub(crate) attr_list_range: IntArray,
    pub(crate) chld_list_range: IntArray,
}

/// A read-only BEX document. Cloning shares the decoded state.
#[derive(Debug, Clone)]
pub struct BexFile {
    pub(crate) inner: Arc<FileInner>,
}

impl BexFile {
    /// Memory-map a file and decode it as a BEX document.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_region(ByteRegion::map_file(path, true)?)
    }

    /// Decode a BEX document from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_region(ByteRegion::from_vec(bytes))
    }

    /// Decode a BEX document from a byte region.
    pub fn from_region(region: ByteRegion) -> Result<Self> {
        Self::from_index(Index::from_region(region)?)
    }

    /// Project a BEX document over an already-decoded index.
    ///
    /// Fails with [`Error::InvalidValue`] on any schema mismatch: member
    /// counts, column cardinalities, the document magic, or a root row
    /// outside the node table.
    pub fn from_index(index: Index) -> Result<Self> {
        if index.mapping_count() != 0 || index.listing_count() != 18 {
            return Err(Error::InvalidValue("bex document needs 18 listings, 0 mappings"));
        }
        let listing = |at: u32| -> Result<Listing> {
            index
                .listing(at)
                .cloned()
                .ok_or(Error::InvalidValue("bex listing missing"))
        };

        let head_root_listing = listing(0)?;
        let attr_uri_text = listing(1)?;
        let attr_name_text = listing(2)?;
        let attr_value_text = listing(3)?;
        let chld_uri_text = listing(4)?;
        let chld_name_text = listing(5)?;
        let chld_value_text = listing(6)?;
        let attr_uri_ref_listing = listing(7)?;
        let attr_name_ref_listing = listing(8)?;
        let attr_value_ref_listing = listing(9)?;
        let attr_parent_ref_listing = listing(10)?;
        let chld_uri_ref_listing = listing(11)?;
        let chld_name_ref_listing = listing(12)?;
        let chld_content_ref_listing = listing(13)?;
        let chld_attributes_ref_listing = listing(14)?;
        let chld_parent_ref_listing = listing(15)?;
        let attr_list_range_listing = listing(16)?;
        let chld_list_range_listing = listing(17)?;

        for column in [
            &head_root_listing,
            &attr_uri_ref_listing,
            &attr_name_ref_listing,
            &attr_value_ref_listing,
            &attr_parent_ref_listing,
            &chld_uri_ref_listing,
            &chld_name_ref_listing,
            &chld_content_ref_listing,
            &chld_attributes_ref_listing,
            &chld_parent_ref_listing,
            &attr_list_range_listing,
            &chld_list_range_listing,
        ] {
            if column.item_count() != 1 {
                return Err(Error::InvalidValue("bex column listing must hold one item"));
            }
        }

        let head_root = head_root_listing.item(0);
        let attr_uri_ref = attr_uri_ref_listing.item(0);
        let attr_name_ref = attr_name_ref_listing.item(0);
        let attr_value_ref = attr_value_ref_listing.item(0);
        let attr_parent_ref = attr_parent_ref_listing.item(0);
        let chld_uri_ref = chld_uri_ref_listing.item(0);
        let chld_name_ref = chld_name_ref_listing.item(0);
        let chld_content_ref = chld_content_ref_listing.item(0);
        let chld_attributes_ref = chld_attributes_ref_listing.item(0);
        let chld_parent_ref = chld_parent_ref_listing.item(0);
        let attr_list_range = attr_list_range_listing.item(0);
        let chld_list_range = chld_list_range_listing.item(0);

        let attr_count = attr_name_ref.len();
        let chld_count = chld_name_ref.len();
        let root_ref = head_root.get(1);

        if head_root.get(0) as u32 != BEX_MAGIC {
            return Err(Error::InvalidValue("bex document magic mismatch"));
        }
        if root_ref < 0 || root_ref as u32 >= chld_count {
            return Err(Error::InvalidValue("bex root row outside the node table"));
        }
        let full_or_absent = |column: &IntArray, count: u32| {
            column.len() == count || column.is_empty()
        };
        if !full_or_absent(&attr_uri_ref, attr_count)
            || attr_value_ref.len() != attr_count
            || !full_or_absent(&attr_parent_ref, attr_count)
            || !full_or_absent(&chld_uri_ref, chld_count)
            || chld_content_ref.len() != chld_count
            || chld_attributes_ref.len() != chld_count
            || !full_or_absent(&chld_parent_ref, chld_count)
        {
            return Err(Error::InvalidValue("bex column length mismatch"));
        }
        if chld_list_range.len() < 3 || attr_list_range.len() < 2 {
            return Err(Error::InvalidValue("bex range column too short"));
        }

        debug!(
            nodes = chld_count,
            attributes = attr_count,
            root = root_ref,
            "validated bex schema"
        );
        Ok(Self {
            inner: Arc::new(FileInner {
                index,
                root_ref,
                attr_uri_text,
                attr_name_text,
                attr_value_text,
                chld_uri_text,
                chld_name_text,
                chld_value_text,
                attr_uri_ref,
                attr_name_ref,
                attr_value_ref,
                attr_parent_ref,
                chld_uri_ref,
                chld_name_ref,
                chld_content_ref,
                chld_attributes_ref,
                chld_parent_ref,
                attr_list_range,
                chld_list_range,
            }),
        })
    }

    /// The document element.
    pub fn root(&self) -> BexNode {
        let root_ref = self.inner.root_ref;
        if root_ref < 0 {
            return BexNode::void(self.clone());
        }
        BexNode::new(self.clone(), key::pack(ELEM_NODE, root_ref as u32))
    }

    /// Resolve a packed node key, returning the void node on any mismatch.
    ///
    /// The key is validated against the table bounds and the element/text
    /// discriminator, so a stale or hand-built key narrows to void instead
    /// of aliasing another node kind.
    pub fn node(&self, node_key: u32) -> BexNode {
        let inner = &self.inner;
        let row = key::row(node_key);
        match key::tag(node_key) {
            ATTR_NODE => {
                if row as u32 >= inner.attr_name_ref.len() {
                    return BexNode::void(self.clone());
                }
                BexNode::new(self.clone(), key::pack(ATTR_NODE, row as u32))
            }
            ELEM_NODE => {
                if inner.chld_name_ref.get(row) == 0 {
                    return BexNode::void(self.clone());
                }
                BexNode::new(self.clone(), key::pack(ELEM_NODE, row as u32))
            }
            TEXT_NODE => {
                if row as u32 >= inner.chld_name_ref.len() || inner.chld_name_ref.get(row) != 0 {
                    return BexNode::void(self.clone());
                }
                BexNode::new(self.clone(), key::pack(TEXT_NODE, row as u32))
            }
            ELTX_NODE => {
                if inner.chld_name_ref.get(row) == 0 || inner.chld_content_ref.get(row) < 0 {
                    return BexNode::void(self.clone());
                }
                BexNode::new(self.clone(), key::pack(ELTX_NODE, row as u32))
            }
            _ => BexNode::void(self.clone()),
        }
    }

    /// Resolve a packed list key, returning the void list on any mismatch.
    pub fn list(&self, list_key: u32) -> BexList {
        let row = key::row(list_key);
        match key::tag(list_key) {
            ATTR_LIST => self.node(key::pack(ELEM_NODE, row as u32)).attributes(),
            CHLD_LIST | CHTX_LIST => self.node(key::pack(ELEM_NODE, row as u32)).children(),
            _ => BexList::void(self.clone()),
        }
    }

    /// The underlying IAM index.
    pub fn index(&self) -> &Index {
        &self.inner.index
    }
}

/// Decode a dictionary entry as a byte string, stopping at the NUL
/// terminator. A missing row or an empty dictionary yields the empty string.
pub(crate) fn text(listing: &Listing, row: i32) -> Vec<u8> {
    let item = listing.item(row);
    let mut out = Vec::with_capacity(item.len() as usize);
    for index in 0..item.len() as i32 {
        let value = item.get(index);
        if value == 0 {
            break;
        }
        out.push(value as u8);
    }
    out
}

/// NUL-pad a query string into the integer form stored in the dictionaries.
pub(crate) fn query(text: &[u8]) -> IntArray {
    let mut values: Vec<i8> = text.iter().map(|byte| *byte as i8).collect();
    values.push(0);
    IntArray::copied_from_i8(&values)
}
