pub mod region;
pub mod offsets;
pub mod sector_map;
pub mod codec;
pub mod coords;
pub mod diagnostic;
pub mod validate;
pub mod report;
pub mod source;

pub use region::{RegionView, FormatError, BoundsError, SECTOR_SIZE, HEADER_SIZE};
pub use offsets::{AllocationEntry, decode_offset_table};
pub use sector_map::{SectorMap, Owner, ChunkLabel};
pub use coords::{RegionCoords, parse_region_name};
pub use diagnostic::{Diagnostic, EntryReport, FileReport};
pub use validate::validate;
pub use report::{render, write_report};
pub use source::{check_path, check_file, check_files, CheckError, CheckSummary};
