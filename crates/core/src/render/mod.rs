use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{Color, Geometry, Result};

/// Resolved appearance of one shape for one frame, borrowed from the player.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShapeFrame<'a> {
    pub shape_id: &'a str,
    /// Scene time in seconds.
    pub time: f64,
    pub geometry: &'a Geometry,
    pub color: Color,
}

impl ShapeFrame<'_> {
    pub fn to_rendered(&self) -> RenderedFrame {
        RenderedFrame {
            shape_id: self.shape_id.to_string(),
            time: self.time,
            geometry: self.geometry.clone(),
            color: self.color,
        }
    }
}

/// Owned copy of a [`ShapeFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedFrame {
    pub shape_id: String,
    pub time: f64,
    pub geometry: Geometry,
    pub color: Color,
}

/// Drawing surface that receives every resolved shape. Implementations should
/// return quickly compared to the poll interval; an error aborts playback.
pub trait Renderer {
    fn render(&mut self, frame: &ShapeFrame<'_>) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &ShapeFrame<'_>) -> Result<()> {
        (**self).render(frame)
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RenderedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Frames recorded for a single shape, in render order.
    pub fn frames_for<'a>(&'a self, shape_id: &'a str) -> impl Iterator<Item = &'a RenderedFrame> + 'a {
        self.frames.iter().filter(move |frame| frame.shape_id == shape_id)
    }

    pub fn into_frames(self) -> Vec<RenderedFrame> {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &ShapeFrame<'_>) -> Result<()> {
        self.frames.push(frame.to_rendered());
        Ok(())
    }
}

/// Emits each frame as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn render(&mut self, frame: &ShapeFrame<'_>) -> Result<()> {
        tracing::info!(
            shape = frame.shape_id,
            time = frame.time,
            color = %frame.color,
            points = ?frame.geometry.points(),
            "render"
        );
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
#[derive(Debug)]
pub struct JsonLinesRenderer<W> {
    writer: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &ShapeFrame<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
