//! The single validation pass over one region file.
//!
//! # Order of work
//! 1. Note a length that is not sector-aligned.
//! 2. Decode the offset table.  A file too short for the header stops here,
//!    with the header sectors as the only owners.
//! 3. Check every non-empty entry in entry-index order ([`ChunkValidator`]).
//! 4. Sweep the sectors nobody claimed ([`scan_unclaimed`]).
//! 5. Snapshot ownership for the sector bitmap.
//!
//! Nothing in the pass fails.  Every anomaly ends up in the returned
//! [`FileReport`], and the same bytes always produce the same report.

pub mod chunk;
pub mod scanner;

pub use chunk::ChunkValidator;
pub use scanner::scan_unclaimed;

use log::debug;

use crate::coords::RegionCoords;
use crate::diagnostic::FileReport;
use crate::offsets::decode_offset_table;
use crate::region::RegionView;
use crate::sector_map::{ChunkLabel, SectorMap};

/// Validate the full contents of one region file.
///
/// `region` only affects how chunks are labelled in diagnostics.
pub fn validate(bytes: &[u8], region: RegionCoords) -> FileReport {
    let view = RegionView::new(bytes);
    let sector_count = view.sector_count();
    debug!("validating {} bytes ({} sectors)", view.byte_len(), sector_count);

    let mut format_errors = Vec::new();
    format_errors.extend(view.length_error());

    let mut sectors = SectorMap::default();
    let mut entries = Vec::new();

    match decode_offset_table(&view) {
        Ok(table) => {
            let mut checker = ChunkValidator::new(view, &mut sectors);
            for entry in table.into_iter().filter(|e| !e.is_empty()) {
                let report = checker.check(entry, ChunkLabel::new(entry.x, entry.z, region));
                if !report.is_clean() {
                    entries.push(report);
                }
            }
        }
        Err(e) => {
            debug!("offset table unreadable: {}", e);
            format_errors.push(e);
        }
    }

    let orphan_sectors = scan_unclaimed(&view, &sectors);
    let occupancy = (0..sector_count).map(|s| sectors.is_owned(s)).collect();

    FileReport {
        byte_len: view.byte_len(),
        sector_count,
        format_errors,
        entries,
        orphan_sectors,
        occupancy,
    }
}
