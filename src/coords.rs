use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static REGION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"r\.(-?[0-9]+)\.(-?[0-9]+)\.mca").unwrap()
});

/// Region position in region units (one region = 32×32 chunks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionCoords {
    pub x: i32,
    pub z: i32,
}

impl RegionCoords {
    pub fn is_origin(&self) -> bool {
        self.x == 0 && self.z == 0
    }
}

/// Extract `(x, z)` from a name containing `r.<X>.<Z>.mca`.
pub fn parse_region_name(name: &str) -> Option<RegionCoords> {
    let caps = REGION_NAME.captures(name)?;
    let x = caps[1].parse().ok()?;
    let z = caps[2].parse().ok()?;
    Some(RegionCoords { x, z })
}

/// Region coordinates from the final component of `path`, or the origin.
pub fn region_coords_for(path: &Path) -> RegionCoords {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(parse_region_name)
        .unwrap_or_default()
}
