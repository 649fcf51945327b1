//! Boundary between the draw surface and whatever actually puts pixels on
//! screen.

use crate::{
    rect::ScreenRect,
    sprite::TextureId,
    font::FontId,
};
use vek::*;


/// GPU state a batch needs bound. Draws with different render states can't
/// share a submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// Untextured colored geometry.
    Solid,
    /// Geometry sampling one texture.
    Textured(TextureId),
    /// Glyph runs in one font.
    Text(FontId),
}

/// Everything which must match for two draws to land in the same batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub state: RenderState,
    pub scissor: Option<ScreenRect>,
}

/// A screen-space quad, already transformed by the pose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub rect: ScreenRect,
    pub uv_min: Vec2<f32>,
    pub uv_max: Vec2<f32>,
    /// Color of the top edge.
    pub color_top: Rgba<f32>,
    /// Color of the bottom edge. Equal to `color_top` unless this is a
    /// gradient.
    pub color_bottom: Rgba<f32>,
    pub z: i32,
}

/// A single line of text at a screen-space position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub pos: Vec2<i32>,
    pub text: String,
    pub color: Rgba<f32>,
    pub shadow: bool,
    pub z: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Quad(Quad),
    Text(TextRun),
}

/// A run of draw items sharing a batch key, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub key: BatchKey,
    pub items: Vec<DrawItem>,
}


/// Something which can execute batches.
///
/// The surface calls `set_scissor` whenever the effective clip changes, and
/// before any batch drawn under it.
pub trait RenderBackend {
    fn set_scissor(&mut self, scissor: Option<ScreenRect>);

    fn draw_batch(&mut self, batch: &Batch);
}


/// A single call received by a `RecordingBackend`.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetScissor(Option<ScreenRect>),
    DrawBatch(Batch),
}

/// Backend which draws nothing and remembers everything it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of `draw_batch` calls received.
    pub fn draw_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::DrawBatch(_)))
            .count()
    }

    /// Every draw item received, in order, paired with the scissor it was
    /// drawn under.
    pub fn items(&self) -> Vec<(Option<ScreenRect>, DrawItem)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                &BackendCall::DrawBatch(ref batch) => Some(batch),
                _ => None,
            })
            .flat_map(|batch| batch.items.iter().map(move |item| (batch.key.scissor, item.clone())))
            .collect()
    }

    /// Every quad received, in order.
    pub fn quads(&self) -> Vec<Quad> {
        self.items()
            .into_iter()
            .filter_map(|(_, item)| match item {
                DrawItem::Quad(quad) => Some(quad),
                DrawItem::Text(_) => None,
            })
            .collect()
    }

    /// Text of every text run received, in order.
    pub fn texts(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|(_, item)| match item {
                DrawItem::Text(run) => Some(run.text),
                DrawItem::Quad(_) => None,
            })
            .collect()
    }

    /// Every scissor set, in order.
    pub fn scissors(&self) -> Vec<Option<ScreenRect>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                &BackendCall::SetScissor(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn set_scissor(&mut self, scissor: Option<ScreenRect>) {
        self.calls.push(BackendCall::SetScissor(scissor));
    }

    fn draw_batch(&mut self, batch: &Batch) {
        self.calls.push(BackendCall::DrawBatch(batch.clone()));
    }
}
