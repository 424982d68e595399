use std::path::Path;

use image::{Rgb, RgbImage};

use crate::segmenting::extract;
use crate::LcdError;

use super::{blit, segment::LcdSegment};

/// Default panel palette, matching classic gray-green LCD hardware.
pub const DEFAULT_FG: Rgb<u8> = Rgb([0x11, 0x1d, 0x29]);
pub const DEFAULT_SHADOW: Rgb<u8> = Rgb([0x5a, 0x60, 0x5a]);
pub const DEFAULT_BG: Rgb<u8> = Rgb([0x7d, 0x81, 0x76]);

/// Fill used when no background color is configured; exposed as the
/// surface colorkey so the presentation layer can treat it as transparent.
const TRANSPARENT_KEY: Rgb<u8> = Rgb([255, 0, 255]);

#[derive(Clone, Copy, Debug)]
pub struct PanelOptions {
    pub fg: Rgb<u8>,
    /// `None` disables the drop-shadow pass entirely.
    pub shadow: Option<Rgb<u8>>,
    /// `None` leaves the canvas transparent behind the segments.
    pub background: Option<Rgb<u8>>,
    /// Overlays every segment's index on top of the rendered panel.
    pub show_debug: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG,
            shadow: Some(DEFAULT_SHADOW),
            background: Some(DEFAULT_BG),
            show_debug: false,
        }
    }
}

/// One simulated panel: the ordered segment list extracted from a glyph
/// sheet plus the canvas the panel is composited onto. The canvas is
/// refilled and redrawn on every [`render`](Self::render) call.
pub struct LcdSurface {
    segments: Vec<LcdSegment>,
    canvas: RgbImage,
    fill: Rgb<u8>,
    colorkey: Option<Rgb<u8>>,
    show_shadow: bool,
    pub show_debug: bool,
}

impl LcdSurface {
    /// Loads a glyph sheet from disk and splits it into segments. A file
    /// that is missing or fails to decode aborts here; no partial panel is
    /// ever produced.
    pub fn from_path<P: AsRef<Path>>(path: P, options: PanelOptions) -> Result<Self, LcdError> {
        let sheet = image::open(path)?.to_rgb8();
        Ok(Self::from_sheet(&sheet, options))
    }

    pub fn from_sheet(sheet: &RgbImage, options: PanelOptions) -> Self {
        let segments = extract::split_segments(sheet)
            .iter()
            .map(|descriptor| LcdSegment::new(descriptor, options.fg, options.shadow))
            .collect();

        let (fill, colorkey) = match options.background {
            Some(color) => (color, None),
            None => (TRANSPARENT_KEY, Some(TRANSPARENT_KEY)),
        };

        Self {
            segments,
            canvas: RgbImage::new(sheet.width(), sheet.height()),
            fill,
            colorkey,
            show_shadow: options.shadow.is_some(),
            show_debug: options.show_debug,
        }
    }

    /// Recomposites the whole panel: background fill, then shadows of the
    /// active segments, then their foregrounds, then debug labels for every
    /// segment when enabled. Shadows go down before any foreground so a
    /// neighboring shadow can never obscure lit artwork.
    pub fn render(&mut self) {
        blit::fill(&mut self.canvas, self.fill);

        if self.show_shadow {
            for segment in self.segments.iter().filter(|s| s.active) {
                segment.render_shadow_to(&mut self.canvas);
            }
        }
        for segment in self.segments.iter().filter(|s| s.active) {
            segment.render_fg_to(&mut self.canvas);
        }
        if self.show_debug {
            for (index, segment) in self.segments.iter().enumerate() {
                segment.render_debug_to(&mut self.canvas, index);
            }
        }
    }

    /// Overwrites every segment's active flag in extraction order. The
    /// state slice must cover the panel exactly; a mismatched length is
    /// rejected rather than silently truncated.
    pub fn set_states(&mut self, states: &[bool]) -> Result<(), LcdError> {
        if states.len() != self.segments.len() {
            return Err(LcdError::SegmentCountMismatch {
                expected: self.segments.len(),
                provided: states.len(),
            });
        }
        for (segment, &active) in self.segments.iter_mut().zip(states) {
            segment.active = active;
        }
        Ok(())
    }

    pub fn segments(&self) -> &[LcdSegment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [LcdSegment] {
        &mut self.segments
    }

    pub fn active_segments(&self) -> impl Iterator<Item = &LcdSegment> {
        self.segments.iter().filter(|segment| segment.active)
    }

    /// The composited panel as of the last [`render`](Self::render) call.
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Color to key out of the canvas when no background is configured.
    pub fn colorkey(&self) -> Option<Rgb<u8>> {
        self.colorkey
    }

    pub fn size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::tint::WHITE;

    /// Sheet with three isolated ink blocks on a white background, yielding
    /// segments in scan order: (2,2) 3x3, (10,2) 3x3, (2,10) 4x2.
    fn three_block_sheet() -> RgbImage {
        let mut sheet = RgbImage::from_pixel(20, 16, WHITE);
        for (x, y, w, h) in [(2u32, 2u32, 3u32, 3u32), (10, 2, 3, 3), (2, 10, 4, 2)] {
            for dy in 0..h {
                for dx in 0..w {
                    sheet.put_pixel(x + dx, y + dy, Rgb([0, 0, 0]));
                }
            }
        }
        sheet
    }

    fn options(background: Option<Rgb<u8>>, shadow: Option<Rgb<u8>>) -> PanelOptions {
        PanelOptions { fg: Rgb([20, 30, 40]), shadow, background, show_debug: false }
    }

    #[test]
    fn sheet_splits_into_expected_segments() {
        let surface = LcdSurface::from_sheet(&three_block_sheet(), PanelOptions::default());
        assert_eq!(surface.segments().len(), 3);
        assert_eq!(surface.size(), (20, 16));
    }

    #[test]
    fn all_inactive_render_is_just_the_background() {
        let bg = Rgb([125, 129, 118]);
        let mut surface = LcdSurface::from_sheet(&three_block_sheet(), options(Some(bg), None));
        surface.render();
        assert!(surface.canvas().pixels().all(|p| *p == bg));
    }

    #[test]
    fn transparent_background_fills_with_the_colorkey() {
        let mut surface = LcdSurface::from_sheet(&three_block_sheet(), options(None, None));
        surface.render();
        let key = surface.colorkey().unwrap();
        assert!(surface.canvas().pixels().all(|p| *p == key));
    }

    #[test]
    fn active_segments_preserve_extraction_order() {
        let mut surface =
            LcdSurface::from_sheet(&three_block_sheet(), PanelOptions::default());
        surface.set_states(&[true, false, true]).unwrap();

        let actives: Vec<(u32, u32)> =
            surface.active_segments().map(|s| (s.x(), s.y())).collect();
        assert_eq!(actives, vec![(2, 2), (2, 10)]);
    }

    #[test]
    fn set_states_rejects_mismatched_lengths() {
        let mut surface =
            LcdSurface::from_sheet(&three_block_sheet(), PanelOptions::default());
        let err = surface.set_states(&[true, false]).unwrap_err();
        match err {
            LcdError::SegmentCountMismatch { expected, provided } => {
                assert_eq!(expected, 3);
                assert_eq!(provided, 2);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn foreground_covers_its_own_shadow() {
        let fg = Rgb([20, 30, 40]);
        let shadow = Rgb([90, 96, 90]);
        let mut surface = LcdSurface::from_sheet(
            &three_block_sheet(),
            PanelOptions { fg, shadow: Some(shadow), ..PanelOptions::default() },
        );
        surface.set_states(&[true, true, true]).unwrap();
        surface.render();

        // Every pixel of every active footprint must show foreground color.
        for (x, y, w, h) in [(2u32, 2u32, 3u32, 3u32), (10, 2, 3, 3), (2, 10, 4, 2)] {
            for dy in 0..h {
                for dx in 0..w {
                    assert_eq!(*surface.canvas().get_pixel(x + dx, y + dy), fg);
                }
            }
        }
    }

    #[test]
    fn shadow_appears_offset_when_enabled() {
        let shadow = Rgb([90, 96, 90]);
        let bg = Rgb([125, 129, 118]);
        let mut surface = LcdSurface::from_sheet(
            &three_block_sheet(),
            options(Some(bg), Some(shadow)),
        );
        surface.set_states(&[true, false, false]).unwrap();
        surface.render();

        // Segment at (2,2) is 3x3; its shadow lands at (0,5) and the lower
        // rows are not covered by the foreground.
        assert_eq!(*surface.canvas().get_pixel(0, 5), shadow);
        assert_eq!(*surface.canvas().get_pixel(1, 7), shadow);
    }

    #[test]
    fn debug_overlay_marks_inactive_segments_too() {
        let mut surface = LcdSurface::from_sheet(
            &three_block_sheet(),
            PanelOptions { show_debug: true, ..PanelOptions::default() },
        );
        surface.render();

        let label_ink = surface
            .canvas()
            .pixels()
            .filter(|p| p.0 == [255, 0, 0])
            .count();
        assert!(label_ink > 0, "debug labels should draw even with no active segments");
    }
}
