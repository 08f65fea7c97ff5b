//! Raster drawing surface.
//!
//! The surface owns the bitmap backing the visible drawing. Geometry is built
//! with kurbo and rasterized with tiny-skia using round caps and joins.

use crate::color::Rgba8;
use crate::shapes::{PATH_TOLERANCE, Shape};
use crate::snapshot::Snapshot;
use kurbo::{BezPath, Line, PathEl, Point, Shape as KurboShape};
use thiserror::Error;
use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),
    #[error("Failed to decode snapshot: {0}")]
    Decode(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Color and width used to stroke a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgba8,
    pub width: f64,
}

impl Pen {
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self { color, width }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.color.into());
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

/// A snapshot decoded back into pixels, ready to be painted.
pub struct DecodedSnapshot {
    pixmap: Pixmap,
}

impl DecodedSnapshot {
    /// Decode a PNG snapshot.
    pub fn decode(snapshot: &Snapshot) -> SurfaceResult<Self> {
        let pixmap = Pixmap::decode_png(snapshot.as_png())
            .map_err(|e| SurfaceError::Decode(e.to_string()))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// The bitmap being drawn on.
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Create a solid white surface.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        pixmap.fill(Color::WHITE);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Replace the bitmap with a white one of the given size.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Fill the whole bitmap with white.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// Stroke a single segment of a free-hand path.
    pub fn stroke_segment(&mut self, from: Point, to: Point, pen: Pen) {
        self.stroke_path(&Line::new(from, to).to_path(PATH_TOLERANCE), pen);
    }

    /// Stroke the outline of a committed shape.
    pub fn stroke_shape(&mut self, shape: &Shape, pen: Pen) {
        self.stroke_path(&shape.to_path(), pen);
    }

    /// Stroke an arbitrary path.
    pub fn stroke_path(&mut self, path: &BezPath, pen: Pen) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        self.pixmap
            .stroke_path(&path, &pen.paint(), &pen.stroke(), Transform::identity(), None);
    }

    /// Encode the current bitmap.
    pub fn snapshot(&self) -> SurfaceResult<Snapshot> {
        Ok(Snapshot::from_png(self.encode_png()?))
    }

    /// Encode the current bitmap as PNG bytes.
    pub fn encode_png(&self) -> SurfaceResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| SurfaceError::Encode(e.to_string()))
    }

    /// Paint a decoded snapshot at the origin over the current contents.
    pub fn paint_snapshot(&mut self, decoded: &DecodedSnapshot) {
        self.pixmap.draw_pixmap(
            0,
            0,
            decoded.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Clear the bitmap to transparent, then paint the snapshot.
    ///
    /// Clearing first keeps transparent regions of the snapshot from
    /// compositing over what was drawn before.
    pub fn restore(&mut self, decoded: &DecodedSnapshot) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.paint_snapshot(decoded);
    }

    /// Read back one pixel (straight alpha).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba8::new(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

/// Convert a kurbo path into a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ink(surface: &Surface, x: u32, y: u32) -> bool {
        surface.pixel(x, y).is_some_and(|p| p.r < 128)
    }

    fn black(width: f64) -> Pen {
        Pen::new(Rgba8::BLACK, width)
    }

    #[test]
    fn test_new_surface_is_white() {
        let surface = Surface::new(8, 4).unwrap();
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 4);
        assert_eq!(surface.pixel(0, 0), Some(Rgba8::WHITE));
        assert_eq!(surface.pixel(7, 3), Some(Rgba8::WHITE));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_segment_uses_pen_color() {
        let mut surface = Surface::new(40, 40).unwrap();
        let red = Pen::new(Rgba8::rgb(255, 0, 0), 4.0);
        surface.stroke_segment(Point::new(5.0, 20.0), Point::new(35.0, 20.0), red);
        assert_eq!(surface.pixel(20, 20), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(20, 5), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_rectangle_outline() {
        let mut surface = Surface::new(80, 80).unwrap();
        let shape = Shape::rectangle(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        surface.stroke_shape(&shape, black(3.0));

        // Edges at x = 10, x = 50, y = 10, y = 40
        assert!(is_ink(&surface, 10, 25));
        assert!(is_ink(&surface, 49, 25));
        assert!(is_ink(&surface, 30, 10));
        assert!(is_ink(&surface, 30, 39));
        // Interior and exterior stay white
        assert!(!is_ink(&surface, 30, 25));
        assert!(!is_ink(&surface, 60, 25));
        assert!(!is_ink(&surface, 30, 50));
    }

    #[test]
    fn test_rectangle_negative_extent_matches_positive() {
        let mut forward = Surface::new(80, 80).unwrap();
        forward.stroke_shape(
            &Shape::rectangle(Point::new(10.0, 10.0), Point::new(50.0, 40.0)),
            black(3.0),
        );

        let mut backward = Surface::new(80, 80).unwrap();
        backward.stroke_shape(
            &Shape::rectangle(Point::new(50.0, 40.0), Point::new(10.0, 10.0)),
            black(3.0),
        );

        assert_eq!(forward.data(), backward.data());
    }

    #[test]
    fn test_circle_outline() {
        let mut surface = Surface::new(200, 200).unwrap();
        let shape = Shape::circle(Point::new(100.0, 100.0), Point::new(100.0, 150.0));
        surface.stroke_shape(&shape, black(3.0));

        assert!(is_ink(&surface, 100, 150));
        assert!(is_ink(&surface, 100, 49));
        assert!(is_ink(&surface, 150, 100));
        assert!(is_ink(&surface, 49, 100));
        assert!(!is_ink(&surface, 100, 100));
        assert!(!is_ink(&surface, 100, 160));
    }

    #[test]
    fn test_clear_resets_to_white() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), black(6.0));
        assert!(is_ink(&surface, 10, 10));
        surface.clear();
        assert_eq!(surface.pixel(10, 10), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_restore_is_pixel_identical() {
        let mut surface = Surface::new(32, 32).unwrap();
        surface.stroke_segment(Point::new(2.0, 2.0), Point::new(30.0, 28.0), black(5.0));
        let snapshot = surface.snapshot().unwrap();
        let before = surface.data().to_vec();

        surface.clear();
        surface.stroke_segment(Point::new(30.0, 2.0), Point::new(2.0, 30.0), black(9.0));
        assert_ne!(surface.data(), before.as_slice());

        let decoded = DecodedSnapshot::decode(&snapshot).unwrap();
        surface.restore(&decoded);
        assert_eq!(surface.data(), before.as_slice());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let snapshot = Snapshot::from_png(vec![1, 2, 3, 4]);
        assert!(matches!(
            DecodedSnapshot::decode(&snapshot),
            Err(SurfaceError::Decode(_))
        ));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.stroke_segment(Point::new(0.0, 5.0), Point::new(10.0, 5.0), black(4.0));
        surface.resize(20, 15).unwrap();
        assert_eq!(surface.width(), 20);
        assert_eq!(surface.height(), 15);
        assert_eq!(surface.pixel(5, 5), Some(Rgba8::WHITE));
    }
}
