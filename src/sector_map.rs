//! Sector ownership bookkeeping.
//!
//! Claims are never refused: a sector claimed twice is reported as a
//! [`Collision`] and then handed to the newer claimant, so the final map
//! always reflects the last writer.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::coords::RegionCoords;
use crate::region::GRID_SIZE;

/// Identifies a chunk slot in diagnostics and ownership records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLabel {
    pub x:      usize,
    pub z:      usize,
    /// Region the file belongs to; absolute coordinates are shown only when
    /// this is not the origin.
    pub region: RegionCoords,
}

impl ChunkLabel {
    pub fn new(x: usize, z: usize, region: RegionCoords) -> Self {
        Self { x, z, region }
    }

    /// World chunk coordinates of this slot.
    pub fn absolute(&self) -> (i64, i64) {
        let edge = GRID_SIZE as i64;
        (
            self.x as i64 + self.region.x as i64 * edge,
            self.z as i64 + self.region.z as i64 * edge,
        )
    }
}

impl fmt::Display for ChunkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.z)?;
        if !self.region.is_origin() {
            let (ax, az) = self.absolute();
            write!(f, " ({}, {})", ax, az)?;
        }
        Ok(())
    }
}

/// Who a sector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Offsets,
    Timestamps,
    Chunk(ChunkLabel),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Offsets      => f.write_str("Offsets"),
            Owner::Timestamps   => f.write_str("Timestamps"),
            Owner::Chunk(label) => write!(f, "{}", label),
        }
    }
}

/// A sector that was already owned when a new claim arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub sector:   usize,
    pub incoming: Owner,
    pub existing: Owner,
}

#[derive(Debug, Clone)]
pub struct SectorMap {
    owners: BTreeMap<usize, Owner>,
}

impl Default for SectorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SectorMap {
    /// A map with the two header sectors already owned.
    pub fn new() -> Self {
        let mut owners = BTreeMap::new();
        owners.insert(0, Owner::Offsets);
        owners.insert(1, Owner::Timestamps);
        Self { owners }
    }

    /// Assign every sector in `range` to `owner`, returning one [`Collision`]
    /// per sector that already had an owner.  The new owner wins either way.
    pub fn claim(&mut self, range: Range<usize>, owner: Owner) -> Vec<Collision> {
        let mut collisions = Vec::new();
        for sector in range {
            if let Some(existing) = self.owners.insert(sector, owner) {
                collisions.push(Collision { sector, incoming: owner, existing });
            }
        }
        collisions
    }

    pub fn owner(&self, sector: usize) -> Option<&Owner> {
        self.owners.get(&sector)
    }

    pub fn is_owned(&self, sector: usize) -> bool {
        self.owner(sector).is_some()
    }

    /// Sectors in `0..total_sectors` nobody claimed, ascending.
    pub fn unclaimed(&self, total_sectors: usize) -> Vec<usize> {
        (0..total_sectors).filter(|s| !self.is_owned(*s)).collect()
    }
}
