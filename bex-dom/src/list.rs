//! List cursors: attribute lists, child lists, and the virtual inline-text
//! list

use crate::file::{self, BexFile};
use crate::key::ListKind;
use crate::key::{
    self, ATTR_LIST, ATTR_NODE, CHLD_LIST, CHTX_LIST, ELEM_NODE, ELTX_NODE, TEXT_NODE, VOID,
};
use crate::node::BexNode;

/// A lightweight cursor identifying one node list of a [`BexFile`].
///
/// Ordinary lists span a range of the attribute or node table selected by a
/// range key; the virtual inline-text list always has length 1 and yields
/// the owning element's text child.
#[derive(Debug, Clone)]
pub struct BexList {
    file: BexFile,
    key: u32,
    range: u32,
}

impl BexList {
    pub(crate) fn new(file: BexFile, key: u32, range: u32) -> Self {
        Self { file, key, range }
    }

    pub(crate) fn void(file: BexFile) -> Self {
        Self {
            file,
            key: key::pack(VOID, 0),
            range: 0,
        }
    }

    /// The packed `(row << 3) | tag` key identifying this list.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The document this list belongs to.
    pub fn owner(&self) -> BexFile {
        self.file.clone()
    }

    /// The public kind of this list.
    pub fn kind(&self) -> ListKind {
        match key::tag(self.key) {
            ATTR_LIST => ListKind::Attributes,
            CHLD_LIST | CHTX_LIST => ListKind::Children,
            _ => ListKind::Void,
        }
    }

    /// Number of nodes in this list.
    pub fn length(&self) -> i32 {
        let inner = &self.file.inner;
        let range = self.range as i32;
        match key::tag(self.key) {
            ATTR_LIST => inner
                .attr_list_range
                .get(range.wrapping_add(1))
                .wrapping_sub(inner.attr_list_range.get(range)),
            CHLD_LIST => inner
                .chld_list_range
                .get(range.wrapping_add(1))
                .wrapping_sub(inner.chld_list_range.get(range)),
            CHTX_LIST => 1,
            _ => 0,
        }
    }

    /// The `index`-th node, or the void node when `index` is out of range.
    ///
    /// Child lists discriminate elements from text nodes by the name column:
    /// a row with name reference 0 is text.
    pub fn get(&self, index: i32) -> BexNode {
        let inner = &self.file.inner;
        let range = self.range as i32;
        match key::tag(self.key) {
            ATTR_LIST => {
                if index < 0 {
                    return BexNode::void(self.file.clone());
                }
                let row = inner.attr_list_range.get(range).saturating_add(index);
                if row >= inner.attr_list_range.get(range.wrapping_add(1)) {
                    return BexNode::void(self.file.clone());
                }
                BexNode::new(self.file.clone(), key::pack(ATTR_NODE, row as u32))
            }
            CHLD_LIST => {
                if index < 0 {
                    return BexNode::void(self.file.clone());
                }
                let row = inner.chld_list_range.get(range).saturating_add(index);
                if row >= inner.chld_list_range.get(range.wrapping_add(1)) {
                    return BexNode::void(self.file.clone());
                }
                if inner.chld_name_ref.get(row) == 0 {
                    BexNode::new(self.file.clone(), key::pack(TEXT_NODE, row as u32))
                } else {
                    BexNode::new(self.file.clone(), key::pack(ELEM_NODE, row as u32))
                }
            }
            CHTX_LIST => {
                if index != 0 {
                    return BexNode::void(self.file.clone());
                }
                BexNode::new(
                    self.file.clone(),
                    key::pack(ELTX_NODE, key::row(self.key) as u32),
                )
            }
            _ => BexNode::void(self.file.clone()),
        }
    }

    /// Index of the first node matching `uri` and `name`, scanning from
    /// `start`; −1 on miss or negative `start`.
    ///
    /// An empty `uri` or `name` acts as a wildcard for that component.
    /// Strings compare as raw bytes including the NUL terminator. Child
    /// lists skip text rows; the virtual inline-text list never matches.
    pub fn find(&self, uri: &[u8], name: &[u8], start: i32) -> i32 {
        if start < 0 {
            return -1;
        }
        let inner = &self.file.inner;
        let range = self.range as i32;
        let use_uri = !uri.is_empty();
        let use_name = !name.is_empty();
        let uri_query = file::query(uri);
        let name_query = file::query(name);
        match key::tag(self.key) {
            ATTR_LIST => {
                let first = inner.attr_list_range.get(range);
                let last = inner.attr_list_range.get(range.wrapping_add(1));
                for row in first.saturating_add(start)..last {
                    if use_uri
                        && inner.attr_uri_text.item(inner.attr_uri_ref.get(row)) != uri_query
                    {
                        continue;
                    }
                    if use_name
                        && inner.attr_name_text.item(inner.attr_name_ref.get(row)) != name_query
                    {
                        continue;
                    }
                    return row - first;
                }
                -1
            }
            CHLD_LIST => {
                let first = inner.chld_list_range.get(range);
                let last = inner.chld_list_range.get(range.wrapping_add(1));
                for row in first.saturating_add(start)..last {
                    if inner.chld_name_ref.get(row) == 0 {
                        continue;
                    }
                    if use_uri
                        && inner.chld_uri_text.item(inner.chld_uri_ref.get(row)) != uri_query
                    {
                        continue;
                    }
                    if use_name
                        && inner.chld_name_text.item(inner.chld_name_ref.get(row)) != name_query
                    {
                        continue;
                    }
                    return row - first;
                }
                -1
            }
            _ => -1,
        }
    }

    /// The element owning this list, or the void node for the void list.
    pub fn parent(&self) -> BexNode {
        match key::tag(self.key) {
            ATTR_LIST | CHLD_LIST | CHTX_LIST => BexNode::new(
                self.file.clone(),
                key::pack(ELEM_NODE, key::row(self.key) as u32),
            ),
            _ => BexNode::void(self.file.clone()),
        }
    }
}
