//! Command layer that GUI code draws through.
//!
//! Widgets never talk to a GPU. They issue fills, sprite blits and text runs
//! against a `DrawSurface`, which applies the current pose and scissor,
//! coalesces consecutive draws that share render state into batches, and
//! hands those batches to whatever `RenderBackend` the host provides.

#[macro_use]
extern crate tracing;

pub mod rect;
pub mod scissor;
pub mod modifier;
pub mod sprite;
pub mod scaling;
pub mod font;
pub mod backend;
pub mod surface;
pub mod tooltip;
pub mod util_hex_color;


pub use crate::{
    rect::ScreenRect,
    scissor::ScissorStack,
    sprite::{
        SpriteId,
        SpriteRegion,
        SpriteScaling,
        SpriteResolver,
        SpriteAtlas,
        TextureId,
    },
    font::{
        FontId,
        FontMetrics,
        FixedWidthFont,
    },
    backend::{
        RenderBackend,
        RecordingBackend,
    },
    surface::DrawSurface,
    util_hex_color::hex_color,
};
