use image::{Rgb, RgbImage};

use super::tint::KeyedImage;

pub const LABEL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Transparency key for debug labels; must stay distinct from panel art
/// colors, which is why it is not the usual black key.
pub const LABEL_COLORKEY: Rgb<u8> = Rgb([255, 0, 255]);

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_GAP: u32 = 1;
const SCALE: u32 = 3;

/// 5x7 glyphs for the hexadecimal digits, one bit per column in the low
/// five bits of each row byte.
#[rustfmt::skip]
const HEX_GLYPHS: [[u8; 7]; 16] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
];

/// Renders `value` as uppercase hexadecimal on a colorkey background,
/// ready to blit over any panel content.
pub fn hex_label(value: usize) -> KeyedImage {
    let digits: Vec<usize> = {
        let mut rest = value;
        let mut digits = vec![rest % 16];
        rest /= 16;
        while rest > 0 {
            digits.push(rest % 16);
            rest /= 16;
        }
        digits.reverse();
        digits
    };

    let advance = GLYPH_WIDTH + GLYPH_GAP;
    let width = (digits.len() as u32 * advance - GLYPH_GAP) * SCALE;
    let height = GLYPH_HEIGHT * SCALE;
    let mut pixels = RgbImage::from_pixel(width, height, LABEL_COLORKEY);

    for (slot, &digit) in digits.iter().enumerate() {
        let origin_x = slot as u32 * advance * SCALE;
        let rows = &HEX_GLYPHS[digit];
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b1_0000u8 >> col) == 0 {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let x = origin_x + col * SCALE + dx;
                        let y = row as u32 * SCALE + dy;
                        pixels.put_pixel(x, y, LABEL_COLOR);
                    }
                }
            }
        }
    }

    KeyedImage { pixels, colorkey: LABEL_COLORKEY }
}
