//! Render-API-agnostic drawing of track geometry.
//!
//! Geometry stays as typed [`TrackVertex`] sequences until upload, where it
//! is cast to a flat byte buffer. The backend behind [`RenderBackend`] owns
//! the actual GPU objects.

mod buffer;

pub use buffer::VertexBuffer;

use thiserror::Error;

use crate::track::{plain_vertices, TrackGenerator, TrackVertex};

/// Primitive assembly for a draw call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Points,
    LineStrip,
    TriangleStrip,
}

/// Opaque vertex buffer id handed out by a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Opaque texture id; textures are loaded outside this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("geometry drawn before upload")]
    NotUploaded,
    #[error("nothing to upload")]
    Empty,
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Graphics API seam. Implementations issue the real upload/draw calls.
pub trait RenderBackend {
    /// Uploads interleaved vertices; `stride` is the size of one vertex.
    fn upload(&mut self, bytes: &[u8], stride: usize) -> Result<BufferHandle, RenderError>;

    fn bind_texture(&mut self, texture: Option<TextureHandle>);

    fn draw(&mut self, buffer: BufferHandle, mode: DrawMode, first: usize, count: usize);

    fn release(&mut self, buffer: BufferHandle);
}

/// Something that can be put on the GPU, drawn, and taken off again.
pub trait Renderable {
    fn upload(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError>;

    fn draw(&self, backend: &mut dyn RenderBackend) -> Result<(), RenderError>;

    fn release(&mut self, backend: &mut dyn RenderBackend);
}

/// All drawable geometry of a generated track.
///
/// Centreline as points, each rail as points plus a line strip, the road
/// surface as a textured triangle strip.
#[derive(Debug, Clone)]
pub struct TrackRenderable {
    centreline: VertexBuffer,
    left_rail: VertexBuffer,
    right_rail: VertexBuffer,
    surface: VertexBuffer,
    texture: Option<TextureHandle>,
}

impl TrackRenderable {
    /// Snapshots the generator's current geometry.
    pub fn from_generator(track: &TrackGenerator, texture: Option<TextureHandle>) -> Self {
        let up = track.world_up();
        Self {
            centreline: VertexBuffer::new(
                plain_vertices(track.centreline(), up),
                &[DrawMode::Points],
            ),
            left_rail: VertexBuffer::new(
                plain_vertices(track.left_offset_points(), up),
                &[DrawMode::Points, DrawMode::LineStrip],
            ),
            right_rail: VertexBuffer::new(
                plain_vertices(track.right_offset_points(), up),
                &[DrawMode::Points, DrawMode::LineStrip],
            ),
            surface: VertexBuffer::new(
                track.track_vertices().to_vec(),
                &[DrawMode::TriangleStrip],
            ),
            texture,
        }
    }

    pub fn surface_vertices(&self) -> &[TrackVertex] {
        self.surface.vertices()
    }

    fn buffers_mut(&mut self) -> [&mut VertexBuffer; 4] {
        [
            &mut self.centreline,
            &mut self.left_rail,
            &mut self.right_rail,
            &mut self.surface,
        ]
    }
}

impl Renderable for TrackRenderable {
    fn upload(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        if self.surface.is_empty() {
            return Err(RenderError::Empty);
        }
        for buffer in self.buffers_mut() {
            if !buffer.is_empty() {
                buffer.upload(backend)?;
            }
        }
        log::debug!(
            "uploaded track geometry: {} surface vertices",
            self.surface.len()
        );
        Ok(())
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        backend.bind_texture(None);
        for buffer in [&self.centreline, &self.left_rail, &self.right_rail] {
            if !buffer.is_empty() {
                buffer.draw(backend)?;
            }
        }
        backend.bind_texture(self.texture);
        self.surface.draw(backend)
    }

    fn release(&mut self, backend: &mut dyn RenderBackend) {
        for buffer in self.buffers_mut() {
            buffer.release(backend);
        }
    }
}
