use std::fmt;

use crate::codec::CodecError;
use crate::offsets::AllocationEntry;
use crate::region::{FormatError, SECTOR_SIZE};
use crate::sector_map::{ChunkLabel, Owner};

/// One structural anomaly found while checking an allocation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The allocation extends past the last whole sector.
    OutOfFile { needed: usize, available: usize },
    /// The sector was already owned when this entry claimed it.
    Collision { sector: usize, incoming: Owner, existing: Owner },
    /// Record size (declared length + 4) exceeds the allocation.
    Overrun { record_len: u64, sector_count: usize },
    /// Record size leaves more than one whole sector unused.
    Underrun { record_len: u64, sector_count: usize },
    /// The allocation is too small to hold the 5-byte chunk header.
    TruncatedHeader { available: usize },
    /// Marker 1: valid but never written in practice.
    UnusedCompression,
    ZlibError(CodecError),
    UnknownCompression(u8),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OutOfFile { needed, available } => write!(
                f,
                "!!OUT OF FILE!! Chunk sectors were found to overrun the file length. (Needed {}, has {})",
                needed, available
            ),
            Diagnostic::Collision { sector, incoming, existing } => write!(
                f,
                "!!COLLISION!! Collision found! At sector {}, ({}) and ({}) collided.",
                sector, incoming, existing
            ),
            Diagnostic::Overrun { record_len, sector_count } => write!(
                f,
                "!!OVERRUN!! Length reported longer than sectors allocated for it. (Length: {}, Sectors: {}, Sectors Bytes: {})",
                record_len, sector_count, sector_count * SECTOR_SIZE
            ),
            Diagnostic::Underrun { record_len, sector_count } => write!(
                f,
                "!!UNDERRUN!! Length reported shorter than the sectors allocated for it. (Length: {}, Sectors: {}, Sectors Bytes: {})",
                record_len, sector_count, sector_count * SECTOR_SIZE
            ),
            Diagnostic::TruncatedHeader { available } => write!(
                f,
                "!!TRUNCATED HEADER!! Chunk allocation holds {} bytes, fewer than the 5 byte chunk header.",
                available
            ),
            Diagnostic::UnusedCompression => f.write_str(
                "!!UNUSED COMPRESSION!! While this is a valid compression type, this is typically an error since no one uses it (GZip, 1)!",
            ),
            Diagnostic::ZlibError(e) => write!(
                f,
                "!!ZLIB ERROR!! ZLib wasn't able to properly decompress the data stream - may be indicative of a corrupted chunk. ({})",
                e
            ),
            Diagnostic::UnknownCompression(id) => write!(
                f,
                "!!UNKNOWN COMPRESSION!! We couldn't figure out how this chunk was compressed! It had this ID: {}",
                id
            ),
        }
    }
}

/// Diagnostics collected for a single allocation entry, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub label:       ChunkLabel,
    pub entry:       AllocationEntry,
    pub diagnostics: Vec<Diagnostic>,
}

impl EntryReport {
    pub fn new(label: ChunkLabel, entry: AllocationEntry) -> Self {
        Self { label, entry, diagnostics: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The line printed once before this entry's diagnostics.
    pub fn header_line(&self) -> String {
        let e = &self.entry;
        format!(
            "{} Offset: {} ({}) Count: {} ({}) (to {})",
            self.label,
            e.sector_offset,
            e.byte_offset(),
            e.sector_count,
            e.byte_len(),
            e.byte_end()
        )
    }
}

/// Everything one validation pass learned about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub byte_len:        usize,
    pub sector_count:    usize,
    /// File-level shape problems, in the order they were found.
    pub format_errors:   Vec<FormatError>,
    /// Entries that produced at least one diagnostic, in entry-index order.
    pub entries:         Vec<EntryReport>,
    /// Unclaimed sectors whose marker byte looks like a gzip chunk header.
    pub orphan_sectors:  Vec<usize>,
    /// Ownership per sector in `0..sector_count`.
    pub occupancy:       Vec<bool>,
}

impl FileReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().flat_map(|e| e.diagnostics.iter())
    }

    /// No format errors, entry diagnostics, or orphan notes.
    pub fn is_clean(&self) -> bool {
        self.format_errors.is_empty() && self.entries.is_empty() && self.orphan_sectors.is_empty()
    }
}
