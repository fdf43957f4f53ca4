//! Getting region bytes off disk and walking a directory of region files.
//!
//! Files are mapped read-only and never written.  A directory is checked one
//! file at a time, non-recursively, in file-name order; a file that cannot be
//! opened is reported and skipped.

use std::fs::{self, File};
use std::io::{self, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use memmap2::{Mmap, MmapOptions};
use thiserror::Error;

use crate::coords::region_coords_for;
use crate::diagnostic::FileReport;
use crate::report::write_report;
use crate::validate::validate;

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}

impl CheckError {
    fn io(path: &Path, source: io::Error) -> Self {
        CheckError::Io { path: path.to_path_buf(), source }
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// The complete contents of one region file.
#[derive(Debug)]
pub enum RegionBytes {
    Mapped(Mmap),
    /// Zero-length files cannot be mapped.
    Empty,
}

impl Deref for RegionBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            RegionBytes::Mapped(m) => &m[..],
            RegionBytes::Empty     => &[],
        }
    }
}

/// Map `path` read-only.
pub fn load(path: &Path) -> Result<RegionBytes, CheckError> {
    let file = File::open(path).map_err(|e| CheckError::io(path, e))?;
    let len  = file.metadata().map_err(|e| CheckError::io(path, e))?.len();
    if len == 0 {
        return Ok(RegionBytes::Empty);
    }

    // SAFETY: read-only mapping; the validator only reads through
    // bounds-checked slices of it.
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| CheckError::io(path, e))?;
    Ok(RegionBytes::Mapped(mmap))
}

// ── Checking ─────────────────────────────────────────────────────────────────

/// Files visited by [`check_path`] or [`check_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub checked:    usize,
    pub unreadable: usize,
}

/// Validate one file and write its report to `out`.
pub fn check_file<W: Write>(out: &mut W, path: &Path) -> Result<FileReport, CheckError> {
    writeln!(out, "Checking file {}", path.display())?;
    let bytes  = load(path)?;
    let report = validate(&bytes, region_coords_for(path));
    debug!("{}: {} entries with diagnostics", path.display(), report.entries.len());
    write_report(out, &report)?;
    Ok(report)
}

/// Validate `path`, or every regular file directly inside it when it is a
/// directory.
///
/// Only an unreadable `path` itself (or a failing `out`) is an error.
pub fn check_path<W: Write>(out: &mut W, path: &Path) -> Result<CheckSummary, CheckError> {
    if !path.is_dir() {
        check_file(out, path)?;
        return Ok(CheckSummary { checked: 1, unreadable: 0 });
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| CheckError::io(path, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    check_files(out, &files)
}

/// Validate each of `files` in order.  A file that cannot be read gets an
/// `!!UNREADABLE!!` line and the rest are still checked.
pub fn check_files<W: Write>(out: &mut W, files: &[PathBuf]) -> Result<CheckSummary, CheckError> {
    let mut summary = CheckSummary::default();
    for file in files {
        match check_file(out, file) {
            Ok(_) => summary.checked += 1,
            Err(CheckError::Io { path, source }) => {
                warn!("skipping {}: {}", path.display(), source);
                writeln!(out, "!!UNREADABLE!! Could not check {}: {}", path.display(), source)?;
                summary.unreadable += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::HEADER_SIZE;
    use tempfile::tempdir;

    #[test]
    fn test_load_empty_file() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("empty.mca");
        fs::write(&path, b"").unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_maps_contents() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");
        fs::write(&path, vec![7u8; HEADER_SIZE]).unwrap();
        let bytes = load(&path).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert!(bytes.iter().all(|b| *b == 7));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = check_path(&mut out, &dir.path().join("nope.mca")).unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }
}
