use crate::region::{read_u32_be, FormatError, RegionView, ENTRY_COUNT, GRID_SIZE, SECTOR_SIZE};

/// One decoded slot of the offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Chunk column within the region, 0..32.
    pub x:             usize,
    /// Chunk row within the region, 0..32.
    pub z:             usize,
    /// First sector of the record (24 bits on disk).
    pub sector_offset: usize,
    /// Sectors allocated to the record (8 bits on disk).
    pub sector_count:  usize,
}

impl AllocationEntry {
    /// Split a raw table word into `(offset, count)`.
    pub fn from_word(x: usize, z: usize, word: u32) -> Self {
        Self {
            x,
            z,
            sector_offset: (word >> 8) as usize,
            sector_count:  (word & 0xFF) as usize,
        }
    }

    /// `(0, 0)` marks a slot with no chunk.
    pub fn is_empty(&self) -> bool {
        self.sector_offset == 0 && self.sector_count == 0
    }

    /// One past the last allocated sector.
    pub fn end_sector(&self) -> usize {
        self.sector_offset + self.sector_count
    }

    pub fn byte_offset(&self) -> usize {
        self.sector_offset * SECTOR_SIZE
    }

    pub fn byte_len(&self) -> usize {
        self.sector_count * SECTOR_SIZE
    }

    pub fn byte_end(&self) -> usize {
        self.end_sector() * SECTOR_SIZE
    }
}

/// Decode all 1024 entries of the offset table, ordered by entry index
/// (`x + z * 32`, so z-major).
///
/// The table lives in the first sector but a file without the timestamp
/// sector as well is rejected as a truncated header.
pub fn decode_offset_table(view: &RegionView<'_>) -> Result<Vec<AllocationEntry>, FormatError> {
    let header = view.header()?;
    let mut entries = Vec::with_capacity(ENTRY_COUNT);
    for z in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let index = x + z * GRID_SIZE;
            let word = read_u32_be(header, index * 4)
                .map_err(|_| FormatError::TruncatedHeader { len: view.byte_len() })?;
            entries.push(AllocationEntry::from_word(x, z, word));
        }
    }
    Ok(entries)
}
