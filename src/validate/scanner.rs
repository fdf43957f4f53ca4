//! Heuristic sweep over sectors no allocation claimed.
//!
//! A sector whose fifth byte is `1` looks like the start of a gzip-marked
//! chunk record that lost its offset table entry.  Plenty of unrelated data
//! has a `1` there too, so a hit is a hint, never a verdict.

use crate::codec::MARKER_GZIP;
use crate::region::{read_u8, RegionView};
use crate::sector_map::SectorMap;
use crate::validate::chunk::MARKER_OFFSET;

/// Unclaimed sectors in `0..view.sector_count()` that look like orphaned
/// chunk records, ascending.
pub fn scan_unclaimed(view: &RegionView<'_>, sectors: &SectorMap) -> Vec<usize> {
    sectors
        .unclaimed(view.sector_count())
        .into_iter()
        .filter(|&sector| {
            view.sectors(sector, 1)
                .and_then(|bytes| read_u8(bytes, MARKER_OFFSET))
                .map(|marker| marker == MARKER_GZIP)
                .unwrap_or(false)
        })
        .collect()
}
