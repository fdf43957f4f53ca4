//! Chunk compression markers and the zlib validity probe.
//!
//! # Markers
//! The fifth byte of every chunk record names its compression scheme.  Only
//! two values are recognised:
//!   - `1` — gzip.  Legal, but nothing writes it in practice, so it is
//!     reported as suspicious and not probed.
//!   - `2` — zlib.  The body is run through a full inflate to prove it is a
//!     complete, uncorrupted stream.
//!
//! Every other value is reported as unknown.  The inflated bytes are thrown
//! away; only the outcome matters.

use flate2::{Decompress, DecompressError, FlushDecompress, Status};
use thiserror::Error;

pub const MARKER_GZIP: u8 = 1;
pub const MARKER_ZLIB: u8 = 2;

/// Scratch output size for the probe.  Output is discarded after every call.
const PROBE_BUFFER_SIZE: usize = 32 * 1024;

// ── CompressionId ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionId {
    Gzip,
    Zlib,
    Unknown(u8),
}

impl CompressionId {
    pub fn from_marker(marker: u8) -> Self {
        match marker {
            MARKER_GZIP => CompressionId::Gzip,
            MARKER_ZLIB => CompressionId::Zlib,
            other       => CompressionId::Unknown(other),
        }
    }

}

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("corrupt deflate stream: {0}")]
    Corrupt(String),
    #[error("stream ended after {consumed} input bytes without a terminator")]
    Truncated { consumed: u64 },
}

impl From<DecompressError> for CodecError {
    fn from(e: DecompressError) -> Self {
        CodecError::Corrupt(e.to_string())
    }
}

// ── Probe ────────────────────────────────────────────────────────────────────

/// Inflate `body` as a zlib stream and report how many bytes it expands to.
///
/// Succeeds only when the stream reaches its end marker.  Bytes after the end
/// marker are ignored.
pub fn probe_zlib(body: &[u8]) -> Result<u64, CodecError> {
    let mut inflater = Decompress::new(true);
    let mut scratch  = vec![0u8; PROBE_BUFFER_SIZE];

    loop {
        let consumed   = inflater.total_in() as usize;
        let out_before = inflater.total_out();
        let input      = body.get(consumed..).unwrap_or_default();

        match inflater.decompress(input, &mut scratch, FlushDecompress::None)? {
            Status::StreamEnd => return Ok(inflater.total_out()),
            Status::Ok | Status::BufError => {
                let progressed = inflater.total_in() as usize != consumed
                    || inflater.total_out() != out_before;
                if !progressed {
                    return Err(CodecError::Truncated { consumed: inflater.total_in() });
                }
            }
        }
    }
}
