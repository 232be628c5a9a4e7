//! Navigation tests over hand-built BEX documents

mod common;

use bex_dom::{BexFile, ListKind, NodeKind};
use common::{attributed_tree_listings, index_blob, inline_text_listings, sample_tree_listings};
use pretty_assertions::assert_eq;

fn sample_tree() -> BexFile {
    BexFile::from_bytes(index_blob(&sample_tree_listings())).unwrap()
}

fn inline_text() -> BexFile {
    BexFile::from_bytes(index_blob(&inline_text_listings())).unwrap()
}

fn attributed_tree() -> BexFile {
    BexFile::from_bytes(index_blob(&attributed_tree_listings())).unwrap()
}

#[test]
fn root_is_an_element_with_void_parent() {
    let doc = sample_tree();
    let root = doc.root();

    assert_eq!(root.kind(), NodeKind::Element);
    assert_eq!(root.name(), b"a");
    assert_eq!(root.uri(), b"");
    assert_eq!(root.parent().kind(), NodeKind::Void);
    assert_eq!(root.index(), -1);
}

#[test]
fn child_list_discriminates_elements_from_text() {
    let doc = sample_tree();
    let children = doc.root().children();

    assert_eq!(children.kind(), ListKind::Children);
    assert_eq!(children.length(), 2);
    assert_eq!(children.get(0).kind(), NodeKind::Element);
    assert_eq!(children.get(0).name(), b"b");
    assert_eq!(children.get(1).kind(), NodeKind::Text);
    assert_eq!(children.get(1).value(), b"text");
    assert_eq!(children.get(1).name(), b"");
    assert_eq!(children.get(2).kind(), NodeKind::Void);
    assert_eq!(children.get(-1).kind(), NodeKind::Void);
}

#[test]
fn element_value_delegates_to_first_child() {
    let doc = sample_tree();

    // `<a>` holds a child list; its first child `<b/>` carries the empty
    // inline string.
    assert_eq!(doc.root().value(), b"");
    assert_eq!(doc.root().children().get(0).value(), b"");
}

#[test]
fn empty_element_exposes_a_virtual_text_child() {
    let doc = sample_tree();
    let empty = doc.root().children().get(0);

    let children = empty.children();
    assert_eq!(children.kind(), ListKind::Children);
    assert_eq!(children.length(), 1);
    let text = children.get(0);
    assert_eq!(text.kind(), NodeKind::Text);
    assert_eq!(text.value(), b"");
    assert_eq!(text.index(), 0);
    assert_eq!(text.parent().key(), empty.key());
    assert_eq!(children.get(1).kind(), NodeKind::Void);
}

#[test]
fn parents_and_indices_round_trip() {
    let doc = sample_tree();
    let children = doc.root().children();

    for at in 0..children.length() {
        let node = children.get(at);
        assert_eq!(node.index(), at);
        assert_eq!(node.parent().key(), doc.root().key());
        assert_eq!(
            node.parent().children().get(node.index()).key(),
            node.key()
        );
    }
}

#[test]
fn child_find_skips_text_and_honors_wildcards() {
    let doc = sample_tree();
    let children = doc.root().children();

    assert_eq!(children.find(b"", b"b", 0), 0);
    assert_eq!(children.find(b"", b"", 0), 0);
    assert_eq!(children.find(b"", b"", 1), -1); // only a text row remains
    assert_eq!(children.find(b"", b"a", 0), -1);
    assert_eq!(children.find(b"", b"b", -1), -1);
    assert_eq!(children.parent().key(), doc.root().key());
}

#[test]
fn inline_text_element_yields_its_string() {
    let doc = inline_text();
    let root = doc.root();

    assert_eq!(root.name(), b"x");
    assert_eq!(root.value(), b"hello");

    let children = root.children();
    assert_eq!(children.length(), 1);
    let text = children.get(0);
    assert_eq!(text.kind(), NodeKind::Text);
    assert_eq!(text.value(), b"hello");
    assert_eq!(text.index(), 0);
    assert_eq!(text.parent().key(), root.key());
    assert_eq!(children.find(b"", b"x", 0), -1);
    assert_eq!(children.parent().name(), b"x");
}

#[test]
fn attributes_decode_names_values_and_positions() {
    let doc = attributed_tree();
    let root = doc.root();
    let attributes = root.attributes();

    assert_eq!(attributes.kind(), ListKind::Attributes);
    assert_eq!(attributes.length(), 2);

    let x = attributes.get(0);
    assert_eq!(x.kind(), NodeKind::Attribute);
    assert_eq!(x.name(), b"x");
    assert_eq!(x.value(), b"1");
    assert_eq!(x.uri(), b"");
    assert_eq!(x.index(), 0);
    assert_eq!(x.parent().key(), root.key());

    let y = attributes.get(1);
    assert_eq!(y.name(), b"y");
    assert_eq!(y.index(), 1);
    assert_eq!(y.parent().attributes().get(y.index()).key(), y.key());

    assert_eq!(attributes.get(2).kind(), NodeKind::Void);
}

#[test]
fn nested_element_attributes_are_independent() {
    let doc = attributed_tree();
    let nested = doc.root().children().get(0);
    assert_eq!(nested.name(), b"b");

    let attributes = nested.attributes();
    assert_eq!(attributes.length(), 1);
    let z = attributes.get(0);
    assert_eq!(z.name(), b"z");
    assert_eq!(z.value(), b"3");
    assert_eq!(z.index(), 0);
    assert_eq!(z.parent().name(), b"b");
}

#[test]
fn attribute_find_matches_by_name() {
    let doc = attributed_tree();
    let attributes = doc.root().attributes();

    assert_eq!(attributes.find(b"", b"y", 0), 1);
    assert_eq!(attributes.find(b"", b"x", 0), 0);
    assert_eq!(attributes.find(b"", b"x", 1), -1);
    assert_eq!(attributes.find(b"", b"q", 0), -1);
    assert_eq!(attributes.find(b"", b"", 0), 0);
}

#[test]
fn non_elements_have_void_lists() {
    let doc = attributed_tree();
    let x = doc.root().attributes().get(0);

    assert_eq!(x.children().kind(), ListKind::Void);
    assert_eq!(x.children().length(), 0);
    assert_eq!(x.attributes().kind(), ListKind::Void);
    assert_eq!(x.children().get(0).kind(), NodeKind::Void);
    assert_eq!(x.children().find(b"", b"", 0), -1);
    assert_eq!(x.children().parent().kind(), NodeKind::Void);

    let text = sample_tree().root().children().get(1);
    assert_eq!(text.children().kind(), ListKind::Void);
    assert_eq!(text.attributes().kind(), ListKind::Void);
    assert_eq!(text.uri(), b"");
}

#[test]
fn node_keys_resolve_back_to_the_same_node() {
    let doc = attributed_tree();
    let root = doc.root();

    let mut nodes = vec![root.clone()];
    for at in 0..root.children().length() {
        nodes.push(root.children().get(at));
    }
    for at in 0..root.attributes().length() {
        nodes.push(root.attributes().get(at));
    }
    for node in nodes {
        let resolved = doc.node(node.key());
        assert_eq!(resolved.key(), node.key());
        assert_eq!(resolved.kind(), node.kind());
        assert_eq!(resolved.name(), node.name());
    }
}

#[test]
fn list_keys_resolve_back_to_the_same_list() {
    let doc = attributed_tree();
    let root = doc.root();

    let children = doc.list(root.children().key());
    assert_eq!(children.kind(), ListKind::Children);
    assert_eq!(children.length(), root.children().length());

    let attributes = doc.list(root.attributes().key());
    assert_eq!(attributes.kind(), ListKind::Attributes);
    assert_eq!(attributes.length(), 2);

    let inline = inline_text();
    let virtual_list = inline.list(inline.root().children().key());
    assert_eq!(virtual_list.length(), 1);
    assert_eq!(virtual_list.get(0).value(), b"hello");

    assert_eq!(doc.list(root.key()).kind(), ListKind::Void);
}

#[test]
fn stale_keys_narrow_to_void() {
    let doc = sample_tree();
    let text_row = 2u32;
    let elem_row = 1u32;

    // An element key pointing at a text row, and vice versa.
    assert_eq!(doc.node((text_row << 3) | 2).kind(), NodeKind::Void);
    assert_eq!(doc.node((elem_row << 3) | 3).kind(), NodeKind::Void);
    // An inline-text key at an element whose content is a child list.
    assert_eq!(doc.node(4).kind(), NodeKind::Void);
    // An attribute key beyond the attribute table.
    assert_eq!(doc.node(1).kind(), NodeKind::Void);
    // Void and list tags never resolve to nodes.
    assert_eq!(doc.node(0).kind(), NodeKind::Void);
    assert_eq!(doc.node(5).kind(), NodeKind::Void);

    // The virtual text child of `<x>hello</x>` resolves, though.
    let inline = inline_text();
    assert_eq!(inline.node(4).kind(), NodeKind::Text);
    assert_eq!(inline.node(4).value(), b"hello");
}

#[test]
fn cursors_share_one_document() {
    let doc = sample_tree();
    let child = doc.root().children().get(0);
    drop(doc);
    // The cursor keeps the document (and its region) alive.
    assert_eq!(child.name(), b"b");
    assert_eq!(child.owner().root().name(), b"a");
}
