//! Binary persistence for the TRKD track format.
//!
//! Layout: magic `TRKD`, u32 file version, then a `CORE` chunk holding a
//! `PNTS` sub-chunk (control points and up-vectors) and a `CONF` sub-chunk
//! (track config). Everything is little-endian; unknown chunks are skipped.

mod chunk;
mod document;
mod format;
mod track_codec;

pub use chunk::{ChunkHeader, ChunkReader, ChunkWriter};
pub use document::TrackDocument;
pub use format::*;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("invalid file magic (expected TRKD)")]
    InvalidMagic,
    #[error("unsupported version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },
    #[error("truncated data")]
    TruncatedData,
    #[error("invalid chunk type")]
    InvalidChunkType,
    #[error("corrupted data")]
    CorruptedData,
}

/// Serialize a document to TRKD bytes.
pub fn serialize(doc: &TrackDocument) -> Vec<u8> {
    let mut writer = ChunkWriter::new();

    writer.write_bytes(&MAGIC);
    writer.write_u32(FILE_VERSION);

    writer.begin_chunk(CHUNK_CORE, CORE_VERSION);

    writer.begin_chunk(CHUNK_PNTS, POINTS_VERSION);
    track_codec::write_points(&mut writer, &doc.control_points, &doc.up_vectors);
    writer.end_chunk();

    writer.begin_chunk(CHUNK_CONF, CONFIG_VERSION);
    track_codec::write_config(&mut writer, &doc.config);
    writer.end_chunk();

    writer.end_chunk(); // CORE

    let bytes = writer.into_bytes();
    log::debug!(
        "serialized track document: {} points, {} bytes",
        doc.control_points.len(),
        bytes.len()
    );
    bytes
}

/// Deserialize a document from TRKD bytes.
///
/// A missing `CONF` chunk leaves the default config; a missing `PNTS`
/// chunk is corrupt.
pub fn deserialize(data: &[u8]) -> Result<TrackDocument, PersistenceError> {
    let mut reader = ChunkReader::new(data);

    if reader.remaining() < FILE_HEADER_SIZE {
        return Err(PersistenceError::TruncatedData);
    }

    let mut magic = [0u8; 4];
    for byte in &mut magic {
        *byte = reader.read_byte()?;
    }
    if magic != MAGIC {
        return Err(PersistenceError::InvalidMagic);
    }

    check_version(FILE_VERSION, reader.read_u32()?)?;

    while reader.has_data() {
        let header = reader.try_read_header()?;
        if header.chunk_type == CHUNK_CORE {
            check_version(CORE_VERSION, header.version)?;
            return read_core_chunk(&mut reader, &header);
        }
        log::debug!("skipping top-level chunk {:?}", header.chunk_type);
        reader.skip_chunk(&header)?;
    }

    Err(PersistenceError::InvalidChunkType)
}

fn check_version(expected: u32, found: u32) -> Result<(), PersistenceError> {
    if found == 0 || found > expected {
        return Err(PersistenceError::UnsupportedVersion { expected, found });
    }
    Ok(())
}

fn read_core_chunk(
    reader: &mut ChunkReader,
    core_header: &ChunkHeader,
) -> Result<TrackDocument, PersistenceError> {
    if core_header.length as usize > reader.remaining() {
        return Err(PersistenceError::TruncatedData);
    }
    let end_pos = reader.position() + core_header.length as usize;

    let mut points = None;
    let mut config = None;

    while reader.position() < end_pos {
        let sub_header = reader.try_read_header()?;
        let sub_end = reader.position() + sub_header.length as usize;
        if sub_end > end_pos {
            return Err(PersistenceError::CorruptedData);
        }

        match sub_header.chunk_type {
            CHUNK_PNTS => {
                check_version(POINTS_VERSION, sub_header.version)?;
                points = Some(track_codec::read_points(reader)?);
            }
            CHUNK_CONF => {
                check_version(CONFIG_VERSION, sub_header.version)?;
                config = Some(track_codec::read_config(reader)?);
            }
            _ => reader.skip_chunk(&sub_header)?,
        }

        if reader.position() != sub_end {
            return Err(PersistenceError::CorruptedData);
        }
    }

    let (control_points, up_vectors) = points.ok_or(PersistenceError::CorruptedData)?;
    Ok(TrackDocument::new(
        control_points,
        up_vectors,
        config.unwrap_or_default(),
    ))
}
