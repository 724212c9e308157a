//! PNTS and CONF sub-chunk contents.

use super::chunk::{ChunkReader, ChunkWriter};
use super::PersistenceError;
use crate::config::TrackConfig;
use crate::geom::Float3;

/// Positions, then up-vectors (count 0 when the track has none).
pub fn write_points(writer: &mut ChunkWriter, positions: &[Float3], up_vectors: &[Float3]) {
    writer.write_float3_slice(positions);
    writer.write_float3_slice(up_vectors);
}

pub fn read_points(
    reader: &mut ChunkReader,
) -> Result<(Vec<Float3>, Vec<Float3>), PersistenceError> {
    let positions = reader.read_float3_vec()?;
    let up_vectors = reader.read_float3_vec()?;

    if !up_vectors.is_empty() && up_vectors.len() != positions.len() {
        return Err(PersistenceError::CorruptedData);
    }
    Ok((positions, up_vectors))
}

/// A sample count beyond `u32` is stored saturated, which fails validation on load.
pub fn write_config(writer: &mut ChunkWriter, config: &TrackConfig) {
    let sample_count = u32::try_from(config.sample_count).unwrap_or_else(|_| {
        log::warn!("sample_count {} does not fit in u32", config.sample_count);
        u32::MAX
    });
    writer.write_u32(sample_count);
    writer.write_f32(config.track_width);
    writer.write_float3(config.world_up);
    writer.write_f32(config.texture_repeat_length);
}

pub fn read_config(reader: &mut ChunkReader) -> Result<TrackConfig, PersistenceError> {
    Ok(TrackConfig {
        sample_count: reader.read_u32()? as usize,
        track_width: reader.read_f32()?,
        world_up: reader.read_float3()?,
        texture_repeat_length: reader.read_f32()?,
    })
}
