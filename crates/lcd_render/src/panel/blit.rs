use image::{Rgb, RgbImage};

use super::tint::KeyedImage;

pub fn fill(canvas: &mut RgbImage, color: Rgb<u8>) {
    for pixel in canvas.pixels_mut() {
        *pixel = color;
    }
}

/// Copies `src` onto `canvas` at (x, y), skipping colorkey pixels and
/// clipping anything that falls outside the canvas. Offsets may be
/// negative; the shadow pass relies on that.
pub fn blit_keyed(canvas: &mut RgbImage, src: &KeyedImage, x: i64, y: i64) {
    let (src_width, src_height) = src.dimensions();
    let (canvas_width, canvas_height) = canvas.dimensions();

    for sy in 0..src_height {
        let dy = y + sy as i64;
        if dy < 0 || dy >= canvas_height as i64 {
            continue;
        }
        for sx in 0..src_width {
            let dx = x + sx as i64;
            if dx < 0 || dx >= canvas_width as i64 {
                continue;
            }
            let pixel = *src.pixels.get_pixel(sx, sy);
            if pixel == src.colorkey {
                continue;
            }
            canvas.put_pixel(dx as u32, dy as u32, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::tint::{BLACK, WHITE};

    fn keyed_square(size: u32, color: Rgb<u8>) -> KeyedImage {
        KeyedImage { pixels: RgbImage::from_pixel(size, size, color), colorkey: BLACK }
    }

    #[test]
    fn colorkey_pixels_leave_the_canvas_untouched() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let mut src = keyed_square(2, WHITE);
        src.pixels.put_pixel(0, 0, BLACK);

        blit_keyed(&mut canvas, &src, 1, 1);
        assert_eq!(canvas.get_pixel(1, 1).0, [10, 20, 30]);
        assert_eq!(*canvas.get_pixel(2, 1), WHITE);
        assert_eq!(*canvas.get_pixel(1, 2), WHITE);
        assert_eq!(*canvas.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn negative_offsets_clip_instead_of_wrapping() {
        let mut canvas = RgbImage::from_pixel(3, 3, BLACK);
        let src = keyed_square(2, WHITE);

        blit_keyed(&mut canvas, &src, -1, -1);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
        assert_eq!(*canvas.get_pixel(1, 0), BLACK);
        assert_eq!(*canvas.get_pixel(0, 1), BLACK);
        assert_eq!(*canvas.get_pixel(2, 2), BLACK);
    }

    #[test]
    fn overhang_past_the_far_edge_clips() {
        let mut canvas = RgbImage::from_pixel(3, 3, BLACK);
        let src = keyed_square(2, WHITE);

        blit_keyed(&mut canvas, &src, 2, 2);
        assert_eq!(*canvas.get_pixel(2, 2), WHITE);
        assert_eq!(*canvas.get_pixel(1, 1), BLACK);
    }
}
