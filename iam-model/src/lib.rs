//! # IAM Model
//!
//! Read-only, zero-copy decoder for the IAM (Integer Array Model) binary
//! container format.
//!
//! An IAM file bundles *listings* (ordered sequences of integer arrays) and
//! *mappings* (indexed key→value tables of integer arrays) into a single
//! blob designed to be memory-mapped and queried in place. This crate
//! validates the container structure once at construction and then serves
//! every read as O(1) arithmetic over the mapped bytes; nothing is copied or
//! materialized beyond the carved section handles.
//!
//! ## Quick Start
//!
//! ```
//! use iam_model::Index;
//!
//! // An index with one listing of two 3-element byte arrays.
//! let words: [u32; 11] = [
//!     0xF00DBA5E, 0, 1, 0, 0, 5, // index header, counts, offset tables
//!     0xF00D2004, 2, 3, 0x4242_4141, 0x0000_4342, // the listing blob
//! ];
//! let mut bytes = Vec::new();
//! for word in words {
//!     bytes.extend_from_slice(&word.to_le_bytes());
//! }
//!
//! let index = Index::from_bytes(bytes)?;
//! let listing = index.listing(0).unwrap();
//! assert_eq!(listing.item_count(), 2);
//! assert_eq!(listing.item(0).get(0), 0x41);
//! assert_eq!(listing.item(1).get(2), 0x43);
//! # Ok::<(), iam_model::Error>(())
//! ```
//!
//! ## Structure
//!
//! - [`ByteRegion`]: a shared handle to a memory-mapped file or heap buffer
//! - [`IntArray`]: an 8/16/32-bit integer sequence view, or an owned copy
//! - [`Listing`]: an ordered collection of arrays in one packed encoding
//! - [`Mapping`]: a key→value table with binary or hashed lookup
//! - [`Index`]: the top-level container bundling listings and mappings
//!
//! Every decoded structure is immutable and safe to share across threads;
//! clones are cheap reference-count bumps.

mod array;
mod error;
mod index;
mod listing;
mod mapping;
mod packed;
mod region;

pub use array::{IntArray, IntWidth};
pub use error::{Error, Result};
pub use index::Index;
pub use listing::Listing;
pub use mapping::{Entry, Mapping};
pub use region::{open_file, ByteRegion};
