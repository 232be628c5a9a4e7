//! Node cursors: elements, attributes, and text

use crate::file::{self, BexFile};
use crate::key::NodeKind;
use crate::key::{
    self, ATTR_LIST, ATTR_NODE, CHLD_LIST, CHTX_LIST, ELEM_NODE, ELTX_NODE, TEXT_NODE, VOID,
};
use crate::list::BexList;

/// A lightweight cursor identifying one node of a [`BexFile`].
///
/// Nodes are value types: they carry an owner share of the document and a
/// packed key, nothing else. Every accessor decodes on demand and degrades
/// to a safe default (empty string, −1, void) instead of failing.
#[derive(Debug, Clone)]
pub struct BexNode {
    file: BexFile,
    key: u32,
}

impl BexNode {
    pub(crate) fn new(file: BexFile, key: u32) -> Self {
        Self { file, key }
    }

    pub(crate) fn void(file: BexFile) -> Self {
        Self {
            file,
            key: key::pack(VOID, 0),
        }
    }

    /// The packed `(row << 3) | tag` key identifying this node.
    ///
    /// Keys round-trip: `file.node(node.key())` resolves back to this node.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The document this node belongs to.
    pub fn owner(&self) -> BexFile {
        self.file.clone()
    }

    /// The public kind of this node.
    pub fn kind(&self) -> NodeKind {
        match key::tag(self.key) {
            ATTR_NODE => NodeKind::Attribute,
            ELEM_NODE => NodeKind::Element,
            TEXT_NODE | ELTX_NODE => NodeKind::Text,
            _ => NodeKind::Void,
        }
    }

    /// Namespace URI of an element or attribute; empty for everything else.
    pub fn uri(&self) -> Vec<u8> {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ATTR_NODE => file::text(&inner.attr_uri_text, inner.attr_uri_ref.get(row)),
            ELEM_NODE => file::text(&inner.chld_uri_text, inner.chld_uri_ref.get(row)),
            _ => Vec::new(),
        }
    }

    /// Name of an element or attribute; empty for text and void nodes.
    pub fn name(&self) -> Vec<u8> {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ATTR_NODE => file::text(&inner.attr_name_text, inner.attr_name_ref.get(row)),
            ELEM_NODE => file::text(&inner.chld_name_text, inner.chld_name_ref.get(row)),
            _ => Vec::new(),
        }
    }

    /// Value of this node.
    ///
    /// Attributes yield their value string, text nodes their content. An
    /// element with inline content yields that string directly; an element
    /// with a child list delegates to its first child (the empty string when
    /// the list is empty).
    pub fn value(&self) -> Vec<u8> {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ATTR_NODE => file::text(&inner.attr_value_text, inner.attr_value_ref.get(row)),
            ELEM_NODE => {
                let content = inner.chld_content_ref.get(row);
                if content >= 0 {
                    file::text(&inner.chld_value_text, content)
                } else {
                    BexList::new(
                        self.file.clone(),
                        key::pack(CHLD_LIST, row as u32),
                        content.wrapping_neg() as u32,
                    )
                    .get(0)
                    .value()
                }
            }
            TEXT_NODE | ELTX_NODE => {
                file::text(&inner.chld_value_text, inner.chld_content_ref.get(row))
            }
            _ => Vec::new(),
        }
    }

    /// Position of this node within its parent's attribute or child list.
    ///
    /// −1 for void nodes and for documents written without back-pointer
    /// columns; 0 for the virtual inline-text child.
    pub fn index(&self) -> i32 {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ATTR_NODE => {
                if inner.attr_parent_ref.is_empty() {
                    return -1;
                }
                let parent = inner.attr_parent_ref.get(row);
                row.wrapping_sub(
                    inner
                        .attr_list_range
                        .get(inner.chld_attributes_ref.get(parent)),
                )
            }
            ELEM_NODE => {
                if inner.chld_parent_ref.is_empty() {
                    return -1;
                }
                let parent = inner.chld_parent_ref.get(row);
                if parent == row {
                    return -1;
                }
                row.wrapping_sub(
                    inner
                        .chld_list_range
                        .get(inner.chld_content_ref.get(parent).wrapping_neg()),
                )
            }
            TEXT_NODE => {
                if inner.chld_parent_ref.is_empty() {
                    return -1;
                }
                let parent = inner.chld_parent_ref.get(row);
                row.wrapping_sub(
                    inner
                        .chld_list_range
                        .get(inner.chld_content_ref.get(parent).wrapping_neg()),
                )
            }
            ELTX_NODE => 0,
            _ => -1,
        }
    }

    /// The element containing this node.
    ///
    /// Void for the document root (marked by a self-referencing parent
    /// entry), for void nodes, and when back-pointers are disabled.
    pub fn parent(&self) -> BexNode {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ATTR_NODE => {
                if inner.attr_parent_ref.is_empty() {
                    return BexNode::void(self.file.clone());
                }
                let parent = inner.attr_parent_ref.get(row);
                BexNode::new(self.file.clone(), key::pack(ELEM_NODE, parent as u32))
            }
            ELEM_NODE => {
                if inner.chld_parent_ref.is_empty() {
                    return BexNode::void(self.file.clone());
                }
                let parent = inner.chld_parent_ref.get(row);
                if parent == row {
                    return BexNode::void(self.file.clone());
                }
                BexNode::new(self.file.clone(), key::pack(ELEM_NODE, parent as u32))
            }
            TEXT_NODE => {
                if inner.chld_parent_ref.is_empty() {
                    return BexNode::void(self.file.clone());
                }
                let parent = inner.chld_parent_ref.get(row);
                BexNode::new(self.file.clone(), key::pack(ELEM_NODE, parent as u32))
            }
            ELTX_NODE => BexNode::new(self.file.clone(), key::pack(ELEM_NODE, row as u32)),
            _ => BexNode::void(self.file.clone()),
        }
    }

    /// Child list of an element; the void list for every other kind.
    ///
    /// An element with inline content exposes it as a single-entry virtual
    /// list holding one text node.
    pub fn children(&self) -> BexList {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ELEM_NODE => {
                let content = inner.chld_content_ref.get(row);
                if content >= 0 {
                    BexList::new(self.file.clone(), key::pack(CHTX_LIST, row as u32), 0)
                } else {
                    BexList::new(
                        self.file.clone(),
                        key::pack(CHLD_LIST, row as u32),
                        content.wrapping_neg() as u32,
                    )
                }
            }
            _ => BexList::void(self.file.clone()),
        }
    }

    /// Attribute list of an element; the void list for every other kind.
    pub fn attributes(&self) -> BexList {
        let inner = &self.file.inner;
        let row = key::row(self.key);
        match key::tag(self.key) {
            ELEM_NODE => BexList::new(
                self.file.clone(),
                key::pack(ATTR_LIST, row as u32),
                inner.chld_attributes_ref.get(row) as u32,
            ),
            _ => BexList::void(self.file.clone()),
        }
    }
}
