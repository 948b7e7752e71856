use crate::geometry::Point;

/// Drawing surface size in CSS pixels. Only finite, strictly positive sizes
/// can be built, so normalization never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    width: f64,
    height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Option<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Device pixels to fractions of the canvas captured at draw time.
pub fn normalize(path: &[Point], canvas: CanvasSize) -> Vec<Point> {
    path.iter()
        .map(|p| Point {
            x: p.x / canvas.width,
            y: p.y / canvas.height,
        })
        .collect()
}

/// Fractions back to device pixels of the canvas as it is now.
pub fn denormalize(path: &[Point], canvas: CanvasSize) -> Vec<Point> {
    path.iter()
        .map(|p| Point {
            x: p.x * canvas.width,
            y: p.y * canvas.height,
        })
        .collect()
}
