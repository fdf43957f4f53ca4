mod common;

use anvilcheck::report::sector_bitmap;
use anvilcheck::{render, validate, Diagnostic, RegionCoords, SECTOR_SIZE};
use common::RegionBuilder;
use proptest::prelude::*;

/// A region with up to 16 data sectors of random content and a handful of
/// small, possibly overlapping or out-of-file allocations.
fn arb_region() -> impl Strategy<Value = Vec<u8>> {
    (
        0usize..16,
        prop::collection::vec((0usize..32, 0usize..32, 0u32..24, 0u8..5), 0..12),
        prop::collection::vec(any::<u8>(), 0..SECTOR_SIZE),
        0usize..SECTOR_SIZE,
    )
        .prop_map(|(extra, entries, noise, tail)| {
            let mut builder = RegionBuilder::new(extra);
            for (x, z, offset, count) in entries {
                builder = builder.entry(x, z, offset, count);
            }
            let mut bytes = builder.build();
            // Scatter the noise over the data sectors only.
            for (i, b) in noise.iter().enumerate() {
                let at = 2 * SECTOR_SIZE + i * 37;
                if at < bytes.len() {
                    bytes[at] = *b;
                }
            }
            bytes.extend(std::iter::repeat(0u8).take(tail % 3 * 700));
            bytes
        })
}

proptest! {
    #[test]
    fn prop_empty_table_never_diagnoses(extra in 0usize..8, fill in any::<u8>()) {
        let mut bytes = RegionBuilder::new(extra).build();
        for b in bytes.iter_mut().skip(2 * SECTOR_SIZE) {
            *b = fill;
        }
        let report = validate(&bytes, RegionCoords::default());
        prop_assert!(report.entries.is_empty());
        prop_assert!(report.occupancy.iter().skip(2).all(|owned| !owned));
    }

    #[test]
    fn prop_length_inside_band_is_accepted(count in 1usize..5, slack in 0usize..SECTOR_SIZE) {
        // Record size (declared + 4) anywhere in [(count - 1) * 4096, count * 4096].
        let record_len = (count - 1) * SECTOR_SIZE + slack;
        let record_len = record_len.max(4);
        let bytes = RegionBuilder::new(count)
            .entry(0, 0, 2, count as u8)
            .record(2, (record_len - 4) as u32, 7, &[])
            .build();

        let report = validate(&bytes, RegionCoords::default());
        let length_issue = report.diagnostics().any(|d| {
            matches!(d, Diagnostic::Overrun { .. } | Diagnostic::Underrun { .. })
        });
        prop_assert!(!length_issue);
    }

    #[test]
    fn prop_bitmap_has_one_marker_per_sector(bytes in arb_region()) {
        let report = validate(&bytes, RegionCoords::default());
        let bitmap = sector_bitmap(&report.occupancy);
        let markers = bitmap.chars().filter(|c| *c == '+' || *c == '.').count();
        prop_assert_eq!(markers, bytes.len() / SECTOR_SIZE);
        prop_assert_eq!(report.occupancy.len(), report.sector_count);
    }

    #[test]
    fn prop_validation_is_deterministic(bytes in arb_region(), rx in -3i32..3, rz in -3i32..3) {
        let coords = RegionCoords { x: rx, z: rz };
        prop_assert_eq!(render(&validate(&bytes, coords)).unwrap(), render(&validate(&bytes, coords)).unwrap());
    }
}
