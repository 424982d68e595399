use image::{Rgb, RgbImage};

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// A bitmap paired with the color treated as transparent when blitting.
#[derive(Clone, Debug)]
pub struct KeyedImage {
    pub pixels: RgbImage,
    pub colorkey: Rgb<u8>,
}

impl KeyedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Derives a colored copy of a segment glyph. Glyphs arrive from the
/// extractor as white shapes on black, so the usual treatment is a
/// channel-wise multiply against a canvas filled with the target color,
/// with black as the transparency key.
///
/// A pure black target would make the glyph indistinguishable from the
/// keyed-out background, so that case instead subtracts the glyph from a
/// white canvas and keys out white. If the glyph convention ever changes
/// from white-on-black, this branch condition needs revisiting.
///
/// `None` yields no image, which disables the layer entirely.
pub fn tint(glyph: &RgbImage, color: Option<Rgb<u8>>) -> Option<KeyedImage> {
    color.map(|color| tint_with(glyph, color))
}

pub fn tint_with(glyph: &RgbImage, color: Rgb<u8>) -> KeyedImage {
    let (width, height) = glyph.dimensions();

    if color == BLACK {
        let mut pixels = RgbImage::from_pixel(width, height, WHITE);
        for (canvas, src) in pixels.pixels_mut().zip(glyph.pixels()) {
            for channel in 0..3 {
                canvas.0[channel] = canvas.0[channel].saturating_sub(src.0[channel]);
            }
        }
        KeyedImage { pixels, colorkey: WHITE }
    } else {
        let mut pixels = RgbImage::from_pixel(width, height, color);
        for (canvas, src) in pixels.pixels_mut().zip(glyph.pixels()) {
            for channel in 0..3 {
                let product = canvas.0[channel] as u16 * src.0[channel] as u16;
                canvas.0[channel] = (product / 255) as u8;
            }
        }
        KeyedImage { pixels, colorkey: BLACK }
    }
}
