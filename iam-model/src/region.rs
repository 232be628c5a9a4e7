//! Shared byte regions backed by a memory-mapped file or a heap buffer
//!
//! A [`ByteRegion`] is either a *root* (it owns the mapping or the buffer and
//! releases it when the last reference drops) or a *slice* of a root. Every
//! live slice keeps its root alive through a shared handle, so views handed
//! out by the decoder stay valid for as long as anything holds them.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    Heap(Vec<u8>),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            Backing::Mapped(map) => map,
            Backing::Heap(buf) => buf,
        }
    }
}

/// A contiguous byte range sharing ownership of its backing storage.
///
/// Cloning is cheap (one atomic increment) and never copies data. The
/// backing mapping or buffer is released exactly once, when the last clone
/// of the last slice drops.
#[derive(Debug, Clone, Default)]
pub struct ByteRegion {
    backing: Option<Arc<Backing>>,
    offset: usize,
    len: usize,
}

impl ByteRegion {
    /// The empty region: zero length, no backing storage.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Open and memory-map an entire file.
    ///
    /// Zero-length files map to the empty region. `read_only` controls the
    /// mode the file handle is opened with; the mapping itself is always a
    /// read-only view.
    #[allow(unsafe_code)]
    pub fn map_file(path: &Path, read_only: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(!read_only)
            .open(path)?;
        let size = file.metadata()?.len();
        if size == 0 {
            debug!("mapping zero-length file {:?} as the empty region", path);
            return Ok(Self::empty());
        }

        let map = unsafe { Mmap::map(&file) }?;
        debug!("mapped {:?} ({} bytes)", path, map.len());
        Ok(Self::from_backing(Backing::Mapped(map)))
    }

    /// Wrap a caller-provided buffer as a root region.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        if buf.is_empty() {
            return Self::empty();
        }
        Self::from_backing(Backing::Heap(buf))
    }

    fn from_backing(backing: Backing) -> Self {
        let len = backing.bytes().len();
        Self {
            backing: Some(Arc::new(backing)),
            offset: 0,
            len,
        }
    }

    /// Number of bytes in this region.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes of this region.
    pub fn bytes(&self) -> &[u8] {
        match &self.backing {
            Some(backing) => &backing.bytes()[self.offset..self.offset + self.len],
            None => &[],
        }
    }

    /// A sub-region sharing this region's root.
    ///
    /// An out-of-range request degrades to the empty region rather than
    /// failing; callers that need a hard error check `len()` afterwards.
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        let Some(end) = offset.checked_add(len) else {
            return Self::empty();
        };
        if end > self.len {
            return Self::empty();
        }
        Self {
            backing: self.backing.clone(),
            offset: self.offset + offset,
            len,
        }
    }
}

/// Open and map a file, degrading to the empty region on any failure.
///
/// This is the lenient entry point: unreadable, missing, and zero-length
/// files all yield a region with `len() == 0` instead of an error. Use
/// [`ByteRegion::map_file`] to observe the underlying IO failure.
pub fn open_file(path: &Path, read_only: bool) -> ByteRegion {
    match ByteRegion::map_file(path, read_only) {
        Ok(region) => region,
        Err(err) => {
            debug!("failed to map {:?}: {}", path, err);
            ByteRegion::empty()
        }
    }
}
