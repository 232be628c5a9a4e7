//! Shared builders assembling BEX index blobs for tests

/// Encode words little-endian.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// A dictionary listing of NUL-terminated byte strings: 8-bit data with a
/// 32-bit offset table.
pub fn text_listing(strings: &[&[u8]]) -> Vec<u32> {
    let mut offsets: Vec<u32> = vec![0];
    let mut data: Vec<u8> = Vec::new();
    for string in strings {
        data.extend_from_slice(string);
        data.push(0);
        offsets.push(data.len() as u32);
    }

    let mut words = vec![0xF00D2007, strings.len() as u32];
    words.extend_from_slice(&offsets);
    data.resize(data.len().next_multiple_of(4), 0);
    for chunk in data.chunks(4) {
        words.push(u32::from_le_bytes(chunk.try_into().unwrap()));
    }
    words
}

/// A single-item column listing: 32-bit data with a static item length.
pub fn column_listing(values: &[i32]) -> Vec<u32> {
    let mut words = vec![0xF00D200C, 1, values.len() as u32];
    words.extend(values.iter().map(|value| *value as u32));
    words
}

/// An index blob holding the given listings and no mappings.
pub fn index_blob(listings: &[Vec<u32>]) -> Vec<u8> {
    // Magic, counts, the one-entry mapping offset table, then the listing
    // offset table.
    let mut words = vec![0xF00DBA5E, 0, listings.len() as u32, 0, 0];
    let mut end = 0u32;
    for listing in listings {
        end += listing.len() as u32;
        words.push(end);
    }
    for listing in listings {
        words.extend_from_slice(listing);
    }
    words_to_bytes(&words)
}

/// The 18 listings of `<a><b/>text</a>`: node rows [a, b, "text"], no
/// attributes, back-pointer columns present.
pub fn sample_tree_listings() -> Vec<Vec<u32>> {
    vec![
        column_listing(&[0xBE10_BA5E_u32 as i32, 0]), // head_root
        text_listing(&[]),                            // attr_uri_text
        text_listing(&[]),                            // attr_name_text
        text_listing(&[]),                            // attr_value_text
        text_listing(&[]),                            // chld_uri_text
        text_listing(&[b"", b"a", b"b"]),             // chld_name_text
        text_listing(&[b"", b"text"]),                // chld_value_text
        column_listing(&[]),                          // attr_uri_ref (absent)
        column_listing(&[]),                          // attr_name_ref
        column_listing(&[]),                          // attr_value_ref
        column_listing(&[]),                          // attr_parent_ref (absent)
        column_listing(&[]),                          // chld_uri_ref (absent)
        column_listing(&[1, 2, 0]),                   // chld_name_ref
        column_listing(&[-1, 0, 1]),                  // chld_content_ref
        column_listing(&[0, 0, 0]),                   // chld_attributes_ref
        column_listing(&[0, 0, 0]),                   // chld_parent_ref
        column_listing(&[0, 0]),                      // attr_list_range
        column_listing(&[0, 1, 3]),                   // chld_list_range
    ]
}

/// The 18 listings of `<x>hello</x>`: one element row with inline text.
pub fn inline_text_listings() -> Vec<Vec<u32>> {
    vec![
        column_listing(&[0xBE10_BA5E_u32 as i32, 0]),
        text_listing(&[]),
        text_listing(&[]),
        text_listing(&[]),
        text_listing(&[]),
        text_listing(&[b"", b"x"]),
        text_listing(&[b"", b"hello"]),
        column_listing(&[]),
        column_listing(&[]),
        column_listing(&[]),
        column_listing(&[]),
        column_listing(&[]),
        column_listing(&[1]),
        column_listing(&[1]),
        column_listing(&[0]),
        column_listing(&[0]),
        column_listing(&[0, 0]),
        column_listing(&[0, 0, 0]),
    ]
}

/// The 18 listings of `<a x="1" y="2"><b z="3"/></a>`.
pub fn attributed_tree_listings() -> Vec<Vec<u32>> {
    vec![
        column_listing(&[0xBE10_BA5E_u32 as i32, 0]),
        text_listing(&[]),                      // attr_uri_text
        text_listing(&[b"x", b"y", b"z"]),      // attr_name_text
        text_listing(&[b"1", b"2", b"3"]),      // attr_value_text
        text_listing(&[]),                      // chld_uri_text
        text_listing(&[b"", b"a", b"b"]),       // chld_name_text
        text_listing(&[b""]),                   // chld_value_text
        column_listing(&[]),                    // attr_uri_ref (absent)
        column_listing(&[0, 1, 2]),             // attr_name_ref
        column_listing(&[0, 1, 2]),             // attr_value_ref
        column_listing(&[0, 0, 1]),             // attr_parent_ref
        column_listing(&[]),                    // chld_uri_ref (absent)
        column_listing(&[1, 2]),                // chld_name_ref
        column_listing(&[-1, 0]),               // chld_content_ref
        column_listing(&[1, 2]),                // chld_attributes_ref
        column_listing(&[0, 0]),                // chld_parent_ref
        column_listing(&[0, 0, 2, 3]),          // attr_list_range
        column_listing(&[0, 1, 2]),             // chld_list_range
    ]
}
