#![allow(dead_code)]

use anvilcheck::{HEADER_SIZE, SECTOR_SIZE};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Builds region file images sector by sector.
pub struct RegionBuilder {
    pub bytes: Vec<u8>,
}

impl RegionBuilder {
    /// Header plus `extra_sectors` zeroed sectors.
    pub fn new(extra_sectors: usize) -> Self {
        Self { bytes: vec![0u8; HEADER_SIZE + extra_sectors * SECTOR_SIZE] }
    }

    pub fn entry(mut self, x: usize, z: usize, offset: u32, count: u8) -> Self {
        let at = (x + z * 32) * 4;
        let word = (offset << 8) | count as u32;
        self.bytes[at..at + 4].copy_from_slice(&word.to_be_bytes());
        self
    }

    /// Raw record header at the start of `sector`.
    pub fn record(mut self, sector: usize, declared: u32, marker: u8, body: &[u8]) -> Self {
        let at = sector * SECTOR_SIZE;
        self.bytes[at..at + 4].copy_from_slice(&declared.to_be_bytes());
        self.bytes[at + 4] = marker;
        self.bytes[at + 5..at + 5 + body.len()].copy_from_slice(body);
        self
    }

    /// A well-formed zlib chunk record for `payload` at `sector`.
    pub fn zlib_chunk(self, sector: usize, payload: &[u8]) -> Self {
        let body = zlib(payload);
        self.record(sector, body.len() as u32 + 1, 2, &body)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}
