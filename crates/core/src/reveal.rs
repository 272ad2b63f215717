//! Progressive mosaic reveal.
//!
//! Elapsed round time maps to a clarity scalar; the scalar picks how small the
//! intermediate sample buffer is before it is blown back up with
//! nearest-neighbour scaling. The source bitmap is only ever borrowed.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Seconds at the start of a round during which the image stays fully obscured.
pub const HOLD_SECS: f64 = 5.0;
/// Length of the ramp after the hold.
pub const RAMP_SECS: f64 = 25.0;
/// Progress right after the hold ends.
pub const BASE_OFFSET: f64 = 0.025;
/// Ceiling of in-round progress; the image never clears while playing.
pub const CURVE_STRENGTH: f64 = 0.1;
/// Progress used on the answer screen.
pub const FULL_CLARITY: f64 = 1.0;
/// Smallest sampling fraction, so the sample buffer is never empty.
pub const MIN_SAMPLE_FRACTION: f64 = 0.01;

/// Reveal progress for `elapsed_secs` into a round.
#[must_use]
pub fn reveal_progress(elapsed_secs: f64) -> f64 {
    if elapsed_secs.is_nan() || elapsed_secs <= HOLD_SECS {
        return 0.0;
    }
    let p = ((elapsed_secs - HOLD_SECS) / RAMP_SECS).clamp(0.0, 1.0);
    (BASE_OFFSET + p * p * (CURVE_STRENGTH - BASE_OFFSET)).min(CURVE_STRENGTH)
}

/// Render target dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

impl BoxSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Uniform "contain" placement of a source inside a box, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainFit {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainFit {
    /// Returns `None` when the source or the box has a zero dimension.
    #[must_use]
    pub fn compute(source_width: u32, source_height: u32, target: BoxSize) -> Option<Self> {
        if source_width == 0 || source_height == 0 || target.width == 0 || target.height == 0 {
            return None;
        }
        let (iw, ih) = (f64::from(source_width), f64::from(source_height));
        let (bw, bh) = (f64::from(target.width), f64::from(target.height));
        let scale = (bw / iw).min(bh / ih);
        let width = iw * scale;
        let height = ih * scale;
        Some(Self {
            x: (bw - width) / 2.0,
            y: (bh - height) / 2.0,
            width,
            height,
        })
    }

    /// Fitted size rounded to whole pixels, never below one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pixel_offset(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// Size of the intermediate sampling buffer for `progress`.
///
/// `max(1, floor(d * max(progress, 0.01)))` on each fitted axis.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_size(fit: &ContainFit, progress: f64) -> (u32, u32) {
    let fraction = progress.clamp(MIN_SAMPLE_FRACTION, FULL_CLARITY);
    let w = (fit.width * fraction).floor().max(1.0) as u32;
    let h = (fit.height * fraction).floor().max(1.0) as u32;
    (w, h)
}

/// Draws the mosaic of a source image into a fixed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicRenderer {
    target: BoxSize,
}

impl MosaicRenderer {
    #[must_use]
    pub fn new(target: BoxSize) -> Self {
        Self { target }
    }

    /// Renders `source` at the given reveal progress into a fresh transparent canvas.
    #[must_use]
    pub fn render(&self, source: &DynamicImage, progress: f64) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.target.width, self.target.height);
        let Some(fit) = ContainFit::compute(source.width(), source.height(), self.target) else {
            return canvas;
        };

        let (sw, sh) = sample_size(&fit, progress);
        let sample = imageops::resize(source, sw, sh, FilterType::Triangle);
        let (dw, dh) = fit.pixel_size();
        let blocks = imageops::resize(&sample, dw, dh, FilterType::Nearest);
        let (dx, dy) = fit.pixel_offset();
        imageops::overlay(&mut canvas, &blocks, dx, dy);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn hold_period_is_fully_obscured() {
        for tenth in 0..=50 {
            assert_eq!(reveal_progress(f64::from(tenth) / 10.0), 0.0);
        }
    }

    #[test]
    fn ramp_is_monotone_and_bounded() {
        let mut last = 0.0;
        for step in 1..=2500 {
            let e = HOLD_SECS + f64::from(step) / 100.0;
            let p = reveal_progress(e);
            assert!(p >= last, "not monotone at {e}");
            assert!((BASE_OFFSET..=CURVE_STRENGTH).contains(&p), "{p} out of range at {e}");
            last = p;
        }
    }

    #[test]
    fn curve_saturates_at_round_end() {
        assert_eq!(reveal_progress(30.0), CURVE_STRENGTH);
        assert_eq!(reveal_progress(45.0), CURVE_STRENGTH);
    }

    #[test]
    fn contain_fit_centres_wide_source() {
        let fit = ContainFit::compute(400, 200, BoxSize::new(800, 500)).unwrap();
        assert_eq!(fit.width, 800.0);
        assert_eq!(fit.height, 400.0);
        assert_eq!(fit.x, 0.0);
        assert_eq!(fit.y, 50.0);
        assert!(ContainFit::compute(0, 10, BoxSize::new(8, 8)).is_none());
    }

    #[test]
    fn sample_buffer_is_never_empty() {
        let fit = ContainFit::compute(400, 200, BoxSize::new(800, 500)).unwrap();
        assert_eq!(sample_size(&fit, 0.0), (8, 4));
        assert_eq!(sample_size(&fit, 0.1), (80, 40));
        let tiny = ContainFit::compute(10, 10, BoxSize::new(20, 20)).unwrap();
        assert_eq!(sample_size(&tiny, 0.0), (1, 1));
    }

    fn split_source() -> DynamicImage {
        let mut img = RgbaImage::new(4, 2);
        for (x, _, px) in img.enumerate_pixels_mut() {
            *px = if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            };
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn coarse_mosaic_collapses_to_one_block() {
        let renderer = MosaicRenderer::new(BoxSize::new(8, 8));
        let out = renderer.render(&split_source(), 0.0);
        assert_eq!(out.dimensions(), (8, 8));
        // letterbox rows stay transparent
        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(out.get_pixel(0, 3), out.get_pixel(7, 3));
    }

    #[test]
    fn full_clarity_keeps_both_halves() {
        let renderer = MosaicRenderer::new(BoxSize::new(8, 8));
        let out = renderer.render(&split_source(), FULL_CLARITY);
        let left = out.get_pixel(0, 3);
        let right = out.get_pixel(7, 3);
        assert!(left[0] > left[2]);
        assert!(right[2] > right[0]);
    }

    #[test]
    fn source_is_left_untouched() {
        let source = split_source();
        let before = source.clone();
        let _ = MosaicRenderer::new(BoxSize::new(16, 16)).render(&source, 0.05);
        assert_eq!(source, before);
    }
}
