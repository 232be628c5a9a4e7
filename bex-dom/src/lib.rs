//! # BEX DOM
//!
//! Read-only DOM projection over BEX (Binary Encoded XML) documents.
//!
//! A BEX file is an IAM container with a fixed schema of 18 listings
//! encoding string dictionaries and node/attribute tables. This crate
//! validates that schema once, then exposes the document through cheap
//! cursor values: [`BexNode`] and [`BexList`] carry nothing but an owner
//! share and a packed 32-bit key, so navigation allocates only when a
//! string is decoded. The whole document stays memory-mapped; no tree is
//! ever materialized.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bex_dom::{BexFile, NodeKind};
//! use std::path::Path;
//!
//! # fn example() -> bex_dom::Result<()> {
//! let doc = BexFile::open(Path::new("document.bex"))?;
//! let root = doc.root();
//! println!("root element: {}", String::from_utf8_lossy(&root.name()));
//!
//! let children = root.children();
//! for index in 0..children.length() {
//!     let child = children.get(index);
//!     if child.kind() == NodeKind::Element {
//!         println!("child: {}", String::from_utf8_lossy(&child.name()));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Keys
//!
//! Every node and list is identified by a packed `(row << 3) | tag` key
//! available through `key()`. Keys round-trip: [`BexFile::node`] and
//! [`BexFile::list`] resolve a stored key back to the same entity, narrowing
//! to the void node/list if the key no longer matches the table it points
//! into. All navigation is infallible; out-of-range access yields void
//! cursors, empty strings, and −1 instead of errors.

mod file;
mod key;
mod list;
mod node;

pub use file::BexFile;
pub use iam_model::{Error, Index, Result};
pub use key::{ListKind, NodeKind};
pub use list::BexList;
pub use node::BexNode;
