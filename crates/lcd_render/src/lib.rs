//! Simulated segment-LCD rendering.
//!
//! A panel's artwork is authored as one sheet with every glyph drawn in
//! place. [`LcdSurface`] splits that sheet into individually addressable
//! segments via connected-component analysis, tints each one for the
//! foreground and drop-shadow layers, and recomposites the active subset
//! onto a canvas every frame. The caller owns the frame loop and the
//! per-segment state; this crate owns everything in between.

mod panel;
mod segmenting;

pub use panel::{
    segment::LcdSegment,
    surface::{LcdSurface, PanelOptions, DEFAULT_BG, DEFAULT_FG, DEFAULT_SHADOW},
    tint::{tint, tint_with, KeyedImage},
};
pub use segmenting::extract::{split_segments, SegmentDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum LcdError {
    #[error("failed to load glyph sheet: {0}")]
    Image(#[from] image::ImageError),
    #[error("segment count mismatch: panel has {expected} segments, {provided} states supplied")]
    SegmentCountMismatch { expected: usize, provided: usize },
}
