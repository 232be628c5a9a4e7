//! The top-level IAM container: any number of listings and mappings
//!
//! An index blob starts with a magic word and two member counts, followed by
//! signed word-offset tables carving a mapping pool and a listing pool into
//! member blobs. Every member is decoded at construction; the index keeps a
//! share of the backing region alive for all views handed out.

use crate::error::{Error, Result};
use crate::listing::Listing;
use crate::mapping::Mapping;
use crate::packed::{self, MAX_COUNT};
use crate::region::ByteRegion;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Magic word of an index blob.
const INDEX_MAGIC: u32 = 0xF00D_BA5E;

#[derive(Debug)]
struct IndexInner {
    /// Backing storage; members hold slices of it, this share keeps the
    /// mapping alive even if every member is dropped.
    #[allow(dead_code)]
    region: ByteRegion,
    listings: Vec<Listing>,
    mappings: Vec<Mapping>,
}

/// A decoded IAM container. Cloning shares the decoded state.
#[derive(Debug, Clone)]
pub struct Index {
    inner: Arc<IndexInner>,
}

impl Index {
    /// Memory-map a file and decode it as an index.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_region(ByteRegion::map_file(path, true)?)
    }

    /// Decode an index from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_region(ByteRegion::from_vec(bytes))
    }

    /// Decode an index from a byte region.
    ///
    /// The region length must be a multiple of 4 and the blob must be
    /// consumed exactly by the header, offset tables, and member pools.
    pub fn from_region(region: ByteRegion) -> Result<Self> {
        if region.len() % 4 != 0 {
            return Err(Error::InvalidLength("index region is not word aligned"));
        }
        let bytes = region.bytes();
        let words = bytes.len() / 4;
        if words < 5 {
            return Err(Error::InvalidLength("index blob too small"));
        }

        if packed::word(bytes, 0) != INDEX_MAGIC {
            return Err(Error::InvalidHeader("index magic mismatch"));
        }
        let mapping_count = packed::word(bytes, 1);
        if mapping_count > MAX_COUNT {
            return Err(Error::InvalidValue("index mapping count out of range"));
        }
        let listing_count = packed::word(bytes, 2);
        if listing_count > MAX_COUNT {
            return Err(Error::InvalidValue("index listing count out of range"));
        }

        let mut cursor = 3usize;
        let mapping_offsets = cursor;
        cursor += mapping_count as usize + 1;
        if words < cursor {
            return Err(Error::InvalidLength("index mapping offsets overrun blob"));
        }
        let mapping_pool_len = packed::word(bytes, mapping_offsets + mapping_count as usize);
        if mapping_pool_len > MAX_COUNT {
            return Err(Error::InvalidValue("index mapping pool length out of range"));
        }

        let listing_offsets = cursor;
        cursor += listing_count as usize + 1;
        if words < cursor {
            return Err(Error::InvalidLength("index listing offsets overrun blob"));
        }
        let listing_pool_len = packed::word(bytes, listing_offsets + listing_count as usize);
        if listing_pool_len > MAX_COUNT {
            return Err(Error::InvalidValue("index listing pool length out of range"));
        }

        let mapping_pool = region.slice(cursor * 4, mapping_pool_len as usize * 4);
        cursor += mapping_pool_len as usize;
        if words < cursor {
            return Err(Error::InvalidLength("index mapping pool overruns blob"));
        }
        let listing_pool = region.slice(cursor * 4, listing_pool_len as usize * 4);
        cursor += listing_pool_len as usize;
        if words != cursor {
            return Err(Error::InvalidLength("index blob length mismatch"));
        }

        let mappings = (0..mapping_count)
            .map(|index| {
                let blob = member_region(bytes, mapping_offsets, index, &mapping_pool)?;
                Mapping::parse(&blob)
            })
            .collect::<Result<Vec<_>>>()?;
        let listings = (0..listing_count)
            .map(|index| {
                let blob = member_region(bytes, listing_offsets, index, &listing_pool)?;
                Listing::parse(&blob)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            listings = listing_count,
            mappings = mapping_count,
            bytes = region.len(),
            "parsed index"
        );
        Ok(Self {
            inner: Arc::new(IndexInner {
                region,
                listings,
                mappings,
            }),
        })
    }

    /// The `index`-th listing.
    pub fn listing(&self, index: u32) -> Option<&Listing> {
        self.inner.listings.get(index as usize)
    }

    /// The `index`-th mapping.
    pub fn mapping(&self, index: u32) -> Option<&Mapping> {
        self.inner.mappings.get(index as usize)
    }

    pub fn listing_count(&self) -> u32 {
        self.inner.listings.len() as u32
    }

    pub fn mapping_count(&self) -> u32 {
        self.inner.mappings.len() as u32
    }

    /// Verify the size prefix tables of every contained listing and mapping.
    pub fn check(&self) -> Result<()> {
        for listing in &self.inner.listings {
            listing.check()?;
        }
        for mapping in &self.inner.mappings {
            mapping.check()?;
        }
        Ok(())
    }
}

/// Carve member `index` out of its pool using the signed word offsets at
/// `offsets`.
fn member_region(
    bytes: &[u8],
    offsets: usize,
    index: u32,
    pool: &ByteRegion,
) -> Result<ByteRegion> {
    let start = packed::word(bytes, offsets + index as usize) as i32;
    let end = packed::word(bytes, offsets + index as usize + 1) as i32;
    if start < 0 || end < start {
        return Err(Error::InvalidOffset("index member offsets are not monotone"));
    }
    Ok(pool.slice(start as usize * 4, (end - start) as usize * 4))
}
