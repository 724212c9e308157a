//! Little-endian chunk reader/writer.
//!
//! A chunk is a 4-byte type tag, a u32 version and a u32 content length,
//! followed by the content. Chunks nest.

use super::format::{CHUNK_HEADER_SIZE, FLOAT3_SIZE};
use super::PersistenceError;
use crate::geom::Float3;

#[derive(Debug, Clone)]
pub struct ChunkHeader {
    pub chunk_type: [u8; 4],
    pub version: u32,
    pub length: u32,
}

pub struct ChunkReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_data(&self) -> bool {
        self.position < self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], PersistenceError> {
        let end = self
            .position
            .checked_add(N)
            .filter(|&end| end <= self.data.len())
            .ok_or(PersistenceError::TruncatedData)?;
        let bytes = self.data[self.position..end]
            .try_into()
            .map_err(|_| PersistenceError::TruncatedData)?;
        self.position = end;
        Ok(bytes)
    }

    pub fn try_read_header(&mut self) -> Result<ChunkHeader, PersistenceError> {
        if self.remaining() < CHUNK_HEADER_SIZE {
            return Err(PersistenceError::TruncatedData);
        }

        let chunk_type = self.take::<4>()?;
        let version = self.read_u32()?;
        let length = self.read_u32()?;

        Ok(ChunkHeader {
            chunk_type,
            version,
            length,
        })
    }

    pub fn skip_chunk(&mut self, header: &ChunkHeader) -> Result<(), PersistenceError> {
        let length = header.length as usize;
        if length > self.remaining() {
            return Err(PersistenceError::TruncatedData);
        }
        self.position += length;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, PersistenceError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, PersistenceError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, PersistenceError> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    pub fn read_float3(&mut self) -> Result<Float3, PersistenceError> {
        Ok(Float3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Count-prefixed `Float3` sequence.
    pub fn read_float3_vec(&mut self) -> Result<Vec<Float3>, PersistenceError> {
        let count = self.read_u32()? as usize;
        // Reject counts the remaining bytes cannot hold before allocating
        if count.saturating_mul(FLOAT3_SIZE) > self.remaining() {
            return Err(PersistenceError::TruncatedData);
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_float3()?);
        }
        Ok(values)
    }
}

pub struct ChunkWriter {
    buffer: Vec<u8>,
    chunk_stack: Vec<usize>, // Start positions of open chunks
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
            chunk_stack: Vec::with_capacity(4),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn begin_chunk(&mut self, chunk_type: [u8; 4], version: u32) {
        self.chunk_stack.push(self.buffer.len());
        self.buffer.extend_from_slice(&chunk_type);
        self.write_u32(version);
        self.write_u32(0); // Length, patched by end_chunk
    }

    /// Closes the innermost open chunk. Without an open chunk this is a no-op.
    pub fn end_chunk(&mut self) {
        let Some(start_pos) = self.chunk_stack.pop() else {
            log::warn!("end_chunk without matching begin_chunk");
            return;
        };
        let content_length = self.buffer.len() - start_pos - CHUNK_HEADER_SIZE;

        // Length sits after type and version
        let length_bytes = (content_length as u32).to_le_bytes();
        self.buffer[start_pos + 8..start_pos + 12].copy_from_slice(&length_bytes);
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_float3(&mut self, value: Float3) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
    }

    pub fn write_float3_slice(&mut self, values: &[Float3]) {
        self.write_u32(values.len() as u32);
        for &value in values {
            self.write_float3(value);
        }
    }
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self::new()
    }
}
