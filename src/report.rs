//! Text rendering of a [`FileReport`].

use std::io::{self, Write};

use crate::diagnostic::FileReport;
use crate::region::{FormatError, HEADER_SIZE};

/// Bitmap characters per line.
pub const BITMAP_WIDTH: usize = 50;

/// Write the full report for one file: summary, entry diagnostics, orphan
/// notes, then the sector bitmap.
pub fn write_report<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    for e in &report.format_errors {
        if let FormatError::InvalidLength { len } = e {
            writeln!(out, "!!INVALID LENGTH!! File is of invalid length {}!", len)?;
        }
    }
    writeln!(out, "File has {} bytes for {} sectors.", report.byte_len, report.sector_count)?;
    for e in &report.format_errors {
        if let FormatError::TruncatedHeader { len } = e {
            writeln!(
                out,
                "!!TRUNCATED HEADER!! File has {} bytes, too short for the {} byte offset and timestamp tables.",
                len, HEADER_SIZE
            )?;
        }
    }

    for entry in report.entries.iter().filter(|e| !e.is_clean()) {
        writeln!(out, "{}", entry.header_line())?;
        for d in &entry.diagnostics {
            writeln!(out, "{}", d)?;
        }
    }

    for sector in &report.orphan_sectors {
        writeln!(out, "--Unused sector {} had 1 as compression... mislabeled section?", sector)?;
    }

    writeln!(out, "{}", sector_bitmap(&report.occupancy))
}

/// `+` per owned sector, `.` per free one, with a line break after every
/// [`BITMAP_WIDTH`] sectors.
pub fn sector_bitmap(occupancy: &[bool]) -> String {
    let mut s = String::with_capacity(occupancy.len() + occupancy.len() / BITMAP_WIDTH);
    for (i, owned) in occupancy.iter().enumerate() {
        s.push(if *owned { '+' } else { '.' });
        if (i + 1) % BITMAP_WIDTH == 0 {
            s.push('\n');
        }
    }
    s
}

/// Render to a `String`.
pub fn render(report: &FileReport) -> io::Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, report)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::RegionCoords;
    use crate::validate::validate;

    #[test]
    fn test_bitmap_wraps_every_fifty() {
        let bitmap = sector_bitmap(&vec![true; 120]);
        let lines: Vec<&str> = bitmap.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 50);
        assert_eq!(lines[1].len(), 50);
        assert_eq!(lines[2].len(), 20);
    }

    #[test]
    fn test_bitmap_exact_multiple_ends_with_newline() {
        assert_eq!(sector_bitmap(&vec![false; 50]), format!("{}\n", ".".repeat(50)));
    }

    #[test]
    fn test_header_only_render() {
        let report = validate(&vec![0u8; HEADER_SIZE], RegionCoords::default());
        assert_eq!(render(&report).unwrap(), "File has 8192 bytes for 2 sectors.\n++\n");
    }

    #[test]
    fn test_short_file_render() {
        let report = validate(&vec![0u8; 5000], RegionCoords::default());
        assert_eq!(
            render(&report).unwrap(),
            "!!INVALID LENGTH!! File is of invalid length 5000!\n\
             File has 5000 bytes for 1 sectors.\n\
             !!TRUNCATED HEADER!! File has 5000 bytes, too short for the 8192 byte offset and timestamp tables.\n\
             +\n"
        );
    }
}
