use image::{Rgb, RgbImage};

use crate::segmenting::extract::SegmentDescriptor;

use super::{
    blit,
    font,
    tint::{self, KeyedImage},
};

/// Drop shadow offset relative to the foreground, in canvas pixels.
const SHADOW_DX: i64 = -2;
const SHADOW_DY: i64 = 3;

/// One addressable segment of a panel: fixed position and artwork, plus an
/// active flag the owning application rewrites every frame.
#[derive(Clone, Debug)]
pub struct LcdSegment {
    position: (u32, u32),
    fg: KeyedImage,
    shadow: Option<KeyedImage>,
    pub active: bool,
}

impl LcdSegment {
    pub fn new(
        descriptor: &SegmentDescriptor,
        fg_color: Rgb<u8>,
        shadow_color: Option<Rgb<u8>>,
    ) -> Self {
        let fg = tint::tint_with(&descriptor.glyph, fg_color);
        let shadow = tint::tint(&descriptor.glyph, shadow_color);
        Self { position: descriptor.position, fg, shadow, active: false }
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn x(&self) -> u32 {
        self.position.0
    }

    pub fn y(&self) -> u32 {
        self.position.1
    }

    /// Center of the glyph's bounding box in panel coordinates; debug
    /// labels are placed around this point.
    pub fn center(&self) -> (u32, u32) {
        let (width, height) = self.fg.dimensions();
        (self.x() + width / 2, self.y() + height / 2)
    }

    pub fn render_shadow_to(&self, canvas: &mut RgbImage) {
        if let Some(shadow) = &self.shadow {
            blit::blit_keyed(canvas, shadow, self.x() as i64 + SHADOW_DX, self.y() as i64 + SHADOW_DY);
        }
    }

    pub fn render_fg_to(&self, canvas: &mut RgbImage) {
        blit::blit_keyed(canvas, &self.fg, self.x() as i64, self.y() as i64);
    }

    /// Draws this segment's index in uppercase hex, centered on the glyph,
    /// regardless of active state.
    pub fn render_debug_to(&self, canvas: &mut RgbImage, index: usize) {
        let label = font::hex_label(index);
        let (width, height) = label.dimensions();
        let (cx, cy) = self.center();
        let x = cx as i64 - width as i64 / 2;
        let y = cy as i64 - height as i64 / 2;
        blit::blit_keyed(canvas, &label, x, y);
    }
}
