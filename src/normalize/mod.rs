//! Image Normalization
//!
//! Turns an arbitrary drawing raster into the fixed canonical square the
//! classifier expects: find the ink bounding box, scale it uniformly to fit
//! inside the margins, and center it on a blank background.

use image::{GrayImage, Luma};

use crate::canvas::{BACKGROUND, INK_THRESHOLD};

/// Side length of the canonical image, in pixels.
pub const CANONICAL_SIZE: u32 = 64;
/// Margin kept clear on every side of the scaled content.
pub const MARGIN_PX: u32 = 4;

/// Bounding box over inked pixels, in raster coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// Fixed-size canonical image ready for the classifier.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pixels: GrayImage,
}

impl NormalizedImage {
    fn blank() -> Self {
        Self {
            pixels: GrayImage::from_pixel(CANONICAL_SIZE, CANONICAL_SIZE, Luma([BACKGROUND])),
        }
    }

    /// Side length; always [`CANONICAL_SIZE`].
    pub fn size(&self) -> u32 {
        CANONICAL_SIZE
    }

    pub fn pixels(&self) -> &GrayImage {
        &self.pixels
    }

    /// True iff every pixel is background.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[0] >= INK_THRESHOLD)
    }
}

/// Scan the raster for the bounding box of inked pixels.
///
/// Returns `None` for a fully blank raster.
pub fn find_bounds(raster: &GrayImage) -> Option<BoundingBox> {
    let (width, height) = raster.dimensions();
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for y in 0..height {
        for x in 0..width {
            if raster.get_pixel(x, y).0[0] < INK_THRESHOLD {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                found = true;
            }
        }
    }

    found.then_some(BoundingBox {
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

/// Normalize a drawing raster into the canonical square.
///
/// Deterministic and pure. An empty raster, or degenerate content spanning a
/// single pixel row and column, yields a well-defined blank image instead of
/// an error.
pub fn normalize(raster: &GrayImage) -> NormalizedImage {
    let Some(bounds) = find_bounds(raster) else {
        return NormalizedImage::blank();
    };

    let content_size = bounds.width().max(bounds.height());
    if content_size == 0 {
        return NormalizedImage::blank();
    }

    let mut output = NormalizedImage::blank();
    let scale = (CANONICAL_SIZE - 2 * MARGIN_PX) as f32 / content_size as f32;

    let scaled_w = (bounds.width() as f32 * scale).round().max(1.0) as u32;
    let scaled_h = (bounds.height() as f32 * scale).round().max(1.0) as u32;
    let offset_x = (CANONICAL_SIZE - scaled_w) / 2;
    let offset_y = (CANONICAL_SIZE - scaled_h) / 2;

    let src_w = bounds.width() as f32;
    let src_h = bounds.height() as f32;

    // Inverse-map each destination pixel into the source box and sample
    // bilinearly, so thin strokes survive downscaling.
    for dy in 0..scaled_h {
        for dx in 0..scaled_w {
            let src_x = bounds.min_x as f32 + (dx as f32 / scale).min(src_w);
            let src_y = bounds.min_y as f32 + (dy as f32 / scale).min(src_h);

            let value = sample_bilinear(raster, src_x, src_y);
            output
                .pixels
                .put_pixel(offset_x + dx, offset_y + dy, Luma([value]));
        }
    }

    output
}

fn sample_bilinear(raster: &GrayImage, x: f32, y: f32) -> u8 {
    let (width, height) = raster.dimensions();
    let x = x.min((width - 1) as f32);
    let y = y.min((height - 1) as f32);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let v00 = raster.get_pixel(x0, y0).0[0] as f32;
    let v01 = raster.get_pixel(x1, y0).0[0] as f32;
    let v10 = raster.get_pixel(x0, y1).0[0] as f32;
    let v11 = raster.get_pixel(x1, y1).0[0] as f32;

    let v0 = v00 * (1.0 - fx) + v01 * fx;
    let v1 = v10 * (1.0 - fx) + v11 * fx;
    (v0 * (1.0 - fy) + v1 * fy).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Point, SketchPad, INK};

    #[test]
    fn test_empty_raster_yields_blank_image() {
        let raster = GrayImage::from_pixel(300, 200, Luma([BACKGROUND]));

        let normalized = normalize(&raster);
        assert_eq!(normalized.pixels().dimensions(), (CANONICAL_SIZE, CANONICAL_SIZE));
        assert!(normalized.is_blank());

        // Idempotent under repeated calls
        let again = normalize(&raster);
        assert!(again.is_blank());
    }

    #[test]
    fn test_single_pixel_is_degenerate() {
        let mut raster = GrayImage::from_pixel(100, 100, Luma([BACKGROUND]));
        raster.put_pixel(50, 50, Luma([INK]));

        // Zero-extent bounding box cannot be scaled; output is blank
        assert!(normalize(&raster).is_blank());
    }

    #[test]
    fn test_output_is_always_canonical_size() {
        for (w, h) in [(40, 500), (500, 40), (64, 64), (1000, 1000)] {
            let mut raster = GrayImage::from_pixel(w, h, Luma([BACKGROUND]));
            for x in 5..(w - 5) {
                raster.put_pixel(x, h / 2, Luma([INK]));
            }

            let normalized = normalize(&raster);
            assert_eq!(
                normalized.pixels().dimensions(),
                (CANONICAL_SIZE, CANONICAL_SIZE)
            );
            assert!(!normalized.is_blank());
        }
    }

    #[test]
    fn test_find_bounds_on_drawn_stroke() {
        let mut pad = SketchPad::new(200, 200);
        pad.begin_stroke(Point::new(50.0, 80.0));
        pad.extend_stroke(Point::new(150.0, 80.0));
        pad.end_stroke();

        let bounds = find_bounds(pad.snapshot()).expect("stroke should have bounds");
        // Round caps extend half the brush width past the endpoints
        assert!(bounds.min_x >= 40 && bounds.min_x <= 50);
        assert!(bounds.max_x >= 150 && bounds.max_x <= 160);
        assert!(bounds.width() > bounds.height());
    }

    #[test]
    fn test_aspect_ratio_is_preserved() {
        // A wide box: 200x50 of solid ink
        let mut raster = GrayImage::from_pixel(400, 400, Luma([BACKGROUND]));
        for y in 100..150 {
            for x in 100..300 {
                raster.put_pixel(x, y, Luma([INK]));
            }
        }
        let source_ratio = 200.0 / 50.0;

        let normalized = normalize(&raster);
        let bounds = find_bounds(normalized.pixels()).expect("content survives");
        let output_ratio = bounds.width() as f32 / bounds.height().max(1) as f32;

        assert!(
            (output_ratio - source_ratio).abs() / source_ratio < 0.15,
            "aspect ratio {output_ratio} strays from {source_ratio}"
        );
    }

    #[test]
    fn test_content_is_centered_within_margins() {
        let mut raster = GrayImage::from_pixel(500, 500, Luma([BACKGROUND]));
        for y in 20..480 {
            for x in 20..480 {
                raster.put_pixel(x, y, Luma([INK]));
            }
        }

        let normalized = normalize(&raster);
        let bounds = find_bounds(normalized.pixels()).expect("content survives");

        assert!(bounds.min_x >= MARGIN_PX - 1);
        assert!(bounds.min_y >= MARGIN_PX - 1);
        assert!(bounds.max_x < CANONICAL_SIZE - MARGIN_PX + 1);
        assert!(bounds.max_y < CANONICAL_SIZE - MARGIN_PX + 1);
    }
}
