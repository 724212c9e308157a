//! Binary layout constants for the TRKD track document.

pub const MAGIC: [u8; 4] = [b'T', b'R', b'K', b'D'];

pub const FILE_VERSION: u32 = 1;
pub const CORE_VERSION: u32 = 1;
pub const POINTS_VERSION: u32 = 1;
pub const CONFIG_VERSION: u32 = 1;

pub const CHUNK_CORE: [u8; 4] = [b'C', b'O', b'R', b'E'];
pub const CHUNK_PNTS: [u8; 4] = [b'P', b'N', b'T', b'S'];
pub const CHUNK_CONF: [u8; 4] = [b'C', b'O', b'N', b'F'];

pub const FILE_HEADER_SIZE: usize = 8; // 4 magic + 4 version
pub const CHUNK_HEADER_SIZE: usize = 12; // 4 type + 4 version + 4 length
pub const FLOAT3_SIZE: usize = 12;
