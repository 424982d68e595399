use image::{Rgb, RgbImage};

use super::{binarize, labeling};

/// One addressable region of a glyph sheet: its offset in the sheet's
/// coordinate space and the cropped glyph as a white-on-black mask.
#[derive(Clone, Debug)]
pub struct SegmentDescriptor {
    pub position: (u32, u32),
    pub glyph: RgbImage,
}

/// Splits a sheet containing every glyph of one panel into per-segment
/// descriptors. Descriptor order follows label order: regions are numbered
/// by the row-major position of their first pixel, so the sequence is
/// stable for a given sheet. Callers index segments by position in this
/// sequence; the numbering carries no other meaning.
///
/// Glyphs that share an edge merge into one segment, so sheet art must keep
/// unrelated segments from touching. Corner-only contact does not merge.
pub fn split_segments(sheet: &RgbImage) -> Vec<SegmentDescriptor> {
    let inverted = binarize::invert(sheet);
    let gray = binarize::luma(&inverted);
    let level = binarize::otsu_level(&gray);
    let mask = binarize::binarize(&gray, level);
    let map = labeling::label_components(&mask, sheet.width(), sheet.height());

    let mut segments = Vec::with_capacity(map.count() as usize);
    for (index, bbox) in map.boxes.iter().enumerate() {
        let label = index as u32 + 1;
        let glyph = RgbImage::from_fn(bbox.width, bbox.height, |x, y| {
            if map.label_at(bbox.x + x, bbox.y + y) == label {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        segments.push(SegmentDescriptor { position: (bbox.x, bbox.y), glyph });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_sheet(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn draw_ink_rect(sheet: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
        for dy in 0..h {
            for dx in 0..w {
                sheet.put_pixel(x + dx, y + dy, Rgb([0, 0, 0]));
            }
        }
    }

    #[test]
    fn each_isolated_glyph_becomes_one_descriptor() {
        let mut sheet = blank_sheet(40, 20);
        draw_ink_rect(&mut sheet, 2, 3, 5, 4);
        draw_ink_rect(&mut sheet, 12, 1, 3, 7);
        draw_ink_rect(&mut sheet, 25, 10, 8, 6);

        let segments = split_segments(&sheet);
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].position, (12, 1));
        assert_eq!(segments[0].glyph.dimensions(), (3, 7));
        assert_eq!(segments[1].position, (2, 3));
        assert_eq!(segments[1].glyph.dimensions(), (5, 4));
        assert_eq!(segments[2].position, (25, 10));
        assert_eq!(segments[2].glyph.dimensions(), (8, 6));
    }

    #[test]
    fn cropped_glyph_is_a_white_on_black_mask() {
        let mut sheet = blank_sheet(10, 10);
        draw_ink_rect(&mut sheet, 4, 4, 2, 3);

        let segments = split_segments(&sheet);
        assert_eq!(segments.len(), 1);
        let glyph = &segments[0].glyph;
        assert_eq!(glyph.dimensions(), (2, 3));
        assert!(glyph.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn corner_touching_glyphs_stay_separate_segments() {
        let mut sheet = blank_sheet(12, 12);
        draw_ink_rect(&mut sheet, 2, 2, 3, 3);
        draw_ink_rect(&mut sheet, 5, 5, 3, 3);

        let segments = split_segments(&sheet);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].position, (2, 2));
        assert_eq!(segments[1].position, (5, 5));
    }

    #[test]
    fn edge_touching_glyphs_merge_into_one_segment() {
        let mut sheet = blank_sheet(12, 12);
        draw_ink_rect(&mut sheet, 2, 2, 3, 3);
        draw_ink_rect(&mut sheet, 5, 2, 3, 3);

        let segments = split_segments(&sheet);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].position, (2, 2));
        assert_eq!(segments[0].glyph.dimensions(), (6, 3));
    }

    #[test]
    fn blank_sheet_yields_no_segments() {
        let sheet = blank_sheet(16, 16);
        assert!(split_segments(&sheet).is_empty());
    }

    #[test]
    fn glyph_shape_survives_cropping() {
        // An L shape: the bounding box contains background pixels that must
        // stay black in the cropped mask.
        let mut sheet = blank_sheet(10, 10);
        draw_ink_rect(&mut sheet, 1, 1, 1, 4);
        draw_ink_rect(&mut sheet, 1, 4, 4, 1);

        let segments = split_segments(&sheet);
        assert_eq!(segments.len(), 1);
        let glyph = &segments[0].glyph;
        assert_eq!(glyph.dimensions(), (4, 4));
        assert_eq!(glyph.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(glyph.get_pixel(3, 0).0, [0, 0, 0]);
        assert_eq!(glyph.get_pixel(3, 3).0, [255, 255, 255]);
    }
}
