use crate::track::TrackVertex;

use super::{BufferHandle, DrawMode, RenderBackend, RenderError};

/// Typed vertex sequence plus the backend buffer it was uploaded to.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    vertices: Vec<TrackVertex>,
    modes: Vec<DrawMode>,
    handle: Option<BufferHandle>,
}

impl VertexBuffer {
    /// `modes` are issued in order on every draw.
    pub fn new(vertices: Vec<TrackVertex>, modes: &[DrawMode]) -> Self {
        Self {
            vertices,
            modes: modes.to_vec(),
            handle: None,
        }
    }

    pub fn vertices(&self) -> &[TrackVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_uploaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Flat little-endian view of the vertices, as the GPU expects them.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Uploads once; re-uploading replaces the previous buffer.
    pub fn upload(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        if let Some(old) = self.handle.take() {
            backend.release(old);
        }
        self.handle = Some(backend.upload(self.as_bytes(), TrackVertex::STRIDE)?);
        Ok(())
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        let handle = self.handle.ok_or(RenderError::NotUploaded)?;
        for &mode in &self.modes {
            backend.draw(handle, mode, 0, self.vertices.len());
        }
        Ok(())
    }

    pub fn release(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(handle) = self.handle.take() {
            backend.release(handle);
        }
    }
}
