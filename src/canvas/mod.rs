//! Drawing Surface
//!
//! Captures pointer strokes onto a persistent grayscale raster. Strokes are
//! rendered as thick, round-capped segments the moment they are drawn; the
//! raster is what downstream normalization consumes.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;

/// Raster background value (paper).
pub const BACKGROUND: u8 = 255;
/// Raster foreground value (ink).
pub const INK: u8 = 0;
/// Pixels darker than this count as drawn content.
pub const INK_THRESHOLD: u8 = 128;
/// Default brush diameter in pixels.
pub const DEFAULT_STROKE_WIDTH: u32 = 8;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One continuous pointer-down-to-pointer-up motion.
///
/// Immutable once the pointer is released.
#[derive(Debug, Clone)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Persistent drawing raster with stroke bookkeeping.
pub struct SketchPad {
    raster: GrayImage,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    last_point: Option<Point>,
    stroke_width: u32,
}

impl SketchPad {
    /// Create a blank pad of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: GrayImage::from_pixel(width, height, Luma([BACKGROUND])),
            strokes: Vec::new(),
            active: None,
            last_point: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Set the brush diameter.
    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width.max(1);
        self
    }

    /// Pad dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    /// Begin a new stroke at `point`. Always succeeds; out-of-range
    /// coordinates are clamped to the raster.
    pub fn begin_stroke(&mut self, point: Point) {
        let point = self.clamp(point);
        self.active = Some(Stroke {
            points: vec![point],
        });
        self.last_point = Some(point);
    }

    /// Extend the active stroke to `point`, drawing a round-capped segment
    /// from the last recorded position. No-op when no stroke is active.
    pub fn extend_stroke(&mut self, point: Point) {
        let Some(last) = self.last_point else {
            return;
        };
        if self.active.is_none() {
            return;
        }

        let point = self.clamp(point);
        self.draw_segment(last, point);

        if let Some(stroke) = self.active.as_mut() {
            stroke.points.push(point);
        }
        self.last_point = Some(point);
    }

    /// Finish the active stroke. Idempotent.
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.active.take() {
            self.strokes.push(stroke);
        }
        self.last_point = None;
    }

    /// Reset the raster to background and discard all stroke history.
    pub fn clear(&mut self) {
        for pixel in self.raster.pixels_mut() {
            *pixel = Luma([BACKGROUND]);
        }
        self.strokes.clear();
        self.active = None;
        self.last_point = None;
    }

    /// True iff any ink has been laid down.
    pub fn has_content(&self) -> bool {
        self.raster.pixels().any(|p| p.0[0] < INK_THRESHOLD)
    }

    /// Read-only view of the current raster.
    pub fn snapshot(&self) -> &GrayImage {
        &self.raster
    }

    /// Completed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of completed strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    fn clamp(&self, point: Point) -> Point {
        let (w, h) = self.raster.dimensions();
        Point {
            x: point.x.clamp(0.0, (w.saturating_sub(1)) as f32),
            y: point.y.clamp(0.0, (h.saturating_sub(1)) as f32),
        }
    }

    /// Stamp a round brush along the segment. Stamping at sub-brush spacing
    /// gives round caps and joins without a separate cap pass.
    fn draw_segment(&mut self, from: Point, to: Point) {
        let radius = (self.stroke_width / 2).max(1) as i32;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = length.ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.x + dx * t).round() as i32;
            let y = (from.y + dy * t).round() as i32;
            draw_filled_circle_mut(&mut self.raster, (x, y), radius, Luma([INK]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_horizontal_stroke(pad: &mut SketchPad) {
        pad.begin_stroke(Point::new(20.0, 100.0));
        pad.extend_stroke(Point::new(180.0, 100.0));
        pad.end_stroke();
    }

    #[test]
    fn test_blank_pad_has_no_content() {
        let pad = SketchPad::new(200, 200);
        assert!(!pad.has_content());
        assert_eq!(pad.stroke_count(), 0);
    }

    #[test]
    fn test_stroke_leaves_ink() {
        let mut pad = SketchPad::new(200, 200);
        draw_horizontal_stroke(&mut pad);

        assert!(pad.has_content());
        assert_eq!(pad.stroke_count(), 1);
        // Midpoint of the segment must be inked
        assert!(pad.snapshot().get_pixel(100, 100).0[0] < INK_THRESHOLD);
    }

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut pad = SketchPad::new(200, 200);
        pad.extend_stroke(Point::new(50.0, 50.0));

        assert!(!pad.has_content());
        assert_eq!(pad.stroke_count(), 0);
    }

    #[test]
    fn test_end_stroke_is_idempotent() {
        let mut pad = SketchPad::new(200, 200);
        draw_horizontal_stroke(&mut pad);
        pad.end_stroke();
        pad.end_stroke();

        assert_eq!(pad.stroke_count(), 1);
    }

    #[test]
    fn test_clear_resets_raster_and_history() {
        let mut pad = SketchPad::new(200, 200);
        draw_horizontal_stroke(&mut pad);
        pad.clear();

        assert!(!pad.has_content());
        assert_eq!(pad.stroke_count(), 0);
        assert!(pad.snapshot().pixels().all(|p| p.0[0] == BACKGROUND));
    }

    #[test]
    fn test_out_of_range_coordinates_are_clamped() {
        let mut pad = SketchPad::new(100, 100);
        pad.begin_stroke(Point::new(-50.0, 20.0));
        pad.extend_stroke(Point::new(500.0, 20.0));
        pad.end_stroke();

        // Never panics, and ink lands inside the raster
        assert!(pad.has_content());
        let stroke = &pad.strokes()[0];
        assert!(stroke.points().iter().all(|p| p.x >= 0.0 && p.x <= 99.0));
    }

    #[test]
    fn test_strokes_record_traversed_points() {
        let mut pad = SketchPad::new(200, 200);
        pad.begin_stroke(Point::new(10.0, 10.0));
        pad.extend_stroke(Point::new(20.0, 20.0));
        pad.extend_stroke(Point::new(30.0, 10.0));
        pad.end_stroke();

        assert_eq!(pad.strokes()[0].points().len(), 3);
    }
}
