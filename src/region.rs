//! Region file geometry and the bounds-checked byte view every reader goes
//! through.
//!
//! # Layout
//! A region file is a sequence of 4096-byte sectors.  Sector 0 holds the
//! allocation offset table, sector 1 the timestamp table; chunk records live
//! in the sectors after that.  All multi-byte integers are big-endian.
//!
//! # Bounds
//! [`RegionView`] never indexes past the end of its buffer.  Every read
//! returns a [`BoundsError`] instead, so a hostile offset table can at worst
//! cause a diagnostic, never a panic.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

/// Size of one allocation unit.
pub const SECTOR_SIZE: usize = 4096;
/// Offset table + timestamp table.
pub const HEADER_SIZE: usize = 2 * SECTOR_SIZE;
/// Chunks per region edge.
pub const GRID_SIZE:   usize = 32;
/// Number of allocation entries in the offset table.
pub const ENTRY_COUNT: usize = GRID_SIZE * GRID_SIZE;

// ── Errors ───────────────────────────────────────────────────────────────────

/// The file as a whole does not have the expected shape.  Reported, never
/// fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is of invalid length {len}, not a multiple of {}", SECTOR_SIZE)]
    InvalidLength { len: usize },
    #[error("file has {len} bytes, fewer than the {} byte header", HEADER_SIZE)]
    TruncatedHeader { len: usize },
}

/// A read would have left the buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("byte range {start}..{end} lies outside the {len} byte file")]
pub struct BoundsError {
    pub start: usize,
    pub end:   usize,
    pub len:   usize,
}

// ── View ─────────────────────────────────────────────────────────────────────

/// Immutable view over the full contents of one region file.
#[derive(Debug, Clone, Copy)]
pub struct RegionView<'a> {
    bytes: &'a [u8],
}

impl<'a> RegionView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Whole sectors in the file; a trailing partial sector is not counted.
    pub fn sector_count(&self) -> usize {
        self.bytes.len() / SECTOR_SIZE
    }

    /// `Some(InvalidLength)` when the length is not sector-aligned.
    pub fn length_error(&self) -> Option<FormatError> {
        if self.bytes.len() % SECTOR_SIZE != 0 {
            Some(FormatError::InvalidLength { len: self.bytes.len() })
        } else {
            None
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<&'a [u8], BoundsError> {
        let bytes = self.bytes;
        if start > end || end > bytes.len() {
            return Err(BoundsError { start, end, len: bytes.len() });
        }
        Ok(&bytes[start..end])
    }

    /// The bytes of `count` sectors starting at sector `first`.
    pub fn sectors(&self, first: usize, count: usize) -> Result<&'a [u8], BoundsError> {
        let start = first.saturating_mul(SECTOR_SIZE);
        let end   = first.saturating_add(count).saturating_mul(SECTOR_SIZE);
        self.slice(start, end)
    }

    /// The fixed 8192-byte header region (offset table followed by timestamps).
    pub fn header(&self) -> Result<&'a [u8], FormatError> {
        self.slice(0, HEADER_SIZE)
            .map_err(|_| FormatError::TruncatedHeader { len: self.bytes.len() })
    }
}

/// Big-endian `u32` at `offset` within `bytes`.
pub fn read_u32_be(bytes: &[u8], offset: usize) -> Result<u32, BoundsError> {
    let end = offset.saturating_add(4);
    match bytes.get(offset..end) {
        Some(b) => Ok(BigEndian::read_u32(b)),
        None    => Err(BoundsError { start: offset, end, len: bytes.len() }),
    }
}

/// Single byte at `offset` within `bytes`.
pub fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, BoundsError> {
    bytes.get(offset).copied().ok_or(BoundsError {
        start: offset,
        end:   offset.saturating_add(1),
        len:   bytes.len(),
    })
}
