//! Panel composition: tinted segment glyphs, colorkey blitting, and the
//! surface that redraws the full panel every frame.

pub mod blit;
pub mod font;
pub mod segment;
pub mod surface;
pub mod tint;
