//! Per-entry checks: bounds, sector claims, declared length, compression.

use log::debug;

use crate::codec::{probe_zlib, CompressionId};
use crate::diagnostic::{Diagnostic, EntryReport};
use crate::offsets::AllocationEntry;
use crate::region::{read_u32_be, read_u8, RegionView, SECTOR_SIZE};
use crate::sector_map::{ChunkLabel, Owner, SectorMap};

/// Length field plus compression marker.
pub const CHUNK_HEADER_SIZE: usize = 5;
/// Offset of the compression marker within a chunk record.
pub const MARKER_OFFSET:     usize = 4;

/// Checks one allocation entry against the file.
pub struct ChunkValidator<'v, 'm> {
    view:    RegionView<'v>,
    sectors: &'m mut SectorMap,
}

impl<'v, 'm> ChunkValidator<'v, 'm> {
    pub fn new(view: RegionView<'v>, sectors: &'m mut SectorMap) -> Self {
        Self { view, sectors }
    }

    /// Run every check for `entry`, claiming its sectors as a side effect.
    /// Empty entries are not looked at.
    pub fn check(&mut self, entry: AllocationEntry, label: ChunkLabel) -> EntryReport {
        let mut report = EntryReport::new(label, entry);
        if entry.is_empty() {
            return report;
        }

        let available = self.view.sector_count();
        if entry.end_sector() > available {
            report.push(Diagnostic::OutOfFile { needed: entry.end_sector(), available });
        }

        let collisions = self.sectors.claim(entry.sector_offset..entry.end_sector(), Owner::Chunk(label));
        for c in collisions {
            report.push(Diagnostic::Collision { sector: c.sector, incoming: c.incoming, existing: c.existing });
        }

        let record = match self.view.sectors(entry.sector_offset, entry.sector_count) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("{}: skipping payload checks, {}", label, e);
                return report;
            }
        };

        let (declared, marker) = match (read_u32_be(record, 0), read_u8(record, MARKER_OFFSET)) {
            (Ok(len), Ok(marker)) => (len, marker),
            _ => {
                report.push(Diagnostic::TruncatedHeader { available: record.len() });
                return report;
            }
        };

        check_length(&mut report, declared, entry.sector_count);
        check_compression(&mut report, record, declared, marker);
        report
    }
}

/// A record fits when it is no larger than its allocation and leaves less
/// than one whole sector unused.
fn check_length(report: &mut EntryReport, declared: u32, sector_count: usize) {
    let record_len = declared as u64 + 4;
    let capacity   = (sector_count * SECTOR_SIZE) as u64;
    let floor      = (sector_count.saturating_sub(1) * SECTOR_SIZE) as u64;

    if record_len > capacity {
        report.push(Diagnostic::Overrun { record_len, sector_count });
    } else if record_len < floor {
        report.push(Diagnostic::Underrun { record_len, sector_count });
    }
}

fn check_compression(report: &mut EntryReport, record: &[u8], declared: u32, marker: u8) {
    match CompressionId::from_marker(marker) {
        CompressionId::Gzip => report.push(Diagnostic::UnusedCompression),
        CompressionId::Zlib => {
            // The body stops at the declared end, clipped to the allocation.
            let end  = (declared as usize).saturating_add(4).min(record.len());
            let body = record.get(CHUNK_HEADER_SIZE..end).unwrap_or_default();
            if let Err(e) = probe_zlib(body) {
                report.push(Diagnostic::ZlibError(e));
            }
        }
        CompressionId::Unknown(id) => report.push(Diagnostic::UnknownCompression(id)),
    }
}
